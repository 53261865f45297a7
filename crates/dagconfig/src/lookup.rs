//! Lookups over a loaded [`GraphConfig`].
//!
//! All lookups share one algorithm: scan the collection in document order and
//! return the first element whose key matches the query under the lookup's
//! [`MatchPolicy`]. Each element is tested for an exact match and then, if the
//! policy allows, for a case-insensitive match before the scan moves on, so an
//! earlier miscased match wins over a later exact one.
//!
//! Results borrow from the graph. Reloading the graph needs `&mut GraphConfig`,
//! which cannot happen while any result is still in use.
//!
//! Scans are linear; deployment graphs are small and no index is kept.

use crate::config::LookupConfig;
use crate::domain::{GraphConfig, Relationship, Service};
use crate::matching::MatchPolicy;

/// Read-only query view over a [`GraphConfig`] with a fixed [`MatchPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    graph: &'a GraphConfig,
    policy: MatchPolicy,
}

impl<'a> Lookup<'a> {
    /// Create a lookup over `graph` using `policy` for every comparison.
    #[must_use]
    pub fn new(graph: &'a GraphConfig, policy: MatchPolicy) -> Self {
        Self { graph, policy }
    }

    /// The matching policy used by this lookup.
    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// The graph being queried.
    #[must_use]
    pub fn graph(&self) -> &'a GraphConfig {
        self.graph
    }

    /// Find the first service with the given name.
    #[must_use]
    pub fn find_service_by_name(&self, name: &str) -> Option<&'a Service> {
        self.find_first("find_service_by_name", &self.graph.services, name, |s| {
            s.name.as_str()
        })
    }

    /// Find the first service with the given identifier.
    #[must_use]
    pub fn find_service_by_id(&self, id: &str) -> Option<&'a Service> {
        self.find_first("find_service_by_id", &self.graph.services, id, |s| {
            s.id.as_str()
        })
    }

    /// Find the first relationship with the given name.
    #[must_use]
    pub fn find_relationship_by_name(&self, name: &str) -> Option<&'a Relationship> {
        self.find_first(
            "find_relationship_by_name",
            &self.graph.relationships,
            name,
            |r| r.name.as_str(),
        )
    }

    /// Find the first relationship with the given identifier.
    #[must_use]
    pub fn find_relationship_by_id(&self, id: &str) -> Option<&'a Relationship> {
        self.find_first(
            "find_relationship_by_id",
            &self.graph.relationships,
            id,
            |r| r.id.as_str(),
        )
    }

    /// Find the first relationship whose source is the given service identifier.
    #[must_use]
    pub fn find_relationship_by_from_id(&self, from: &str) -> Option<&'a Relationship> {
        self.find_first(
            "find_relationship_by_from_id",
            &self.graph.relationships,
            from,
            |r| r.from.as_str(),
        )
    }

    /// Find the first relationship whose target is the given service identifier.
    #[must_use]
    pub fn find_relationship_by_to_id(&self, to: &str) -> Option<&'a Relationship> {
        self.find_first(
            "find_relationship_by_to_id",
            &self.graph.relationships,
            to,
            |r| r.to.as_str(),
        )
    }

    /// Iterate over every relationship whose source matches `from`, in order.
    ///
    /// The first item is what [`Lookup::find_relationship_by_from_id`] returns.
    pub fn relationships_from<'q>(
        &self,
        from: &'q str,
    ) -> impl Iterator<Item = &'a Relationship> + use<'a, 'q> {
        let policy = self.policy;
        self.graph
            .relationships
            .iter()
            .filter(move |r| policy.matches(r.from.as_str(), from))
    }

    /// Iterate over every relationship whose target matches `to`, in order.
    ///
    /// The first item is what [`Lookup::find_relationship_by_to_id`] returns.
    pub fn relationships_to<'q>(
        &self,
        to: &'q str,
    ) -> impl Iterator<Item = &'a Relationship> + use<'a, 'q> {
        let policy = self.policy;
        self.graph
            .relationships
            .iter()
            .filter(move |r| policy.matches(r.to.as_str(), to))
    }

    fn find_first<T>(
        &self,
        operation: &'static str,
        items: &'a [T],
        query: &str,
        key: impl Fn(&T) -> &str,
    ) -> Option<&'a T> {
        let found = items
            .iter()
            .find(|&item| self.policy.matches(key(item), query));
        if found.is_none() {
            tracing::trace!(operation, query, policy = %self.policy, "no match");
        }
        found
    }
}

impl GraphConfig {
    /// Query this graph with the given matching policy.
    #[must_use]
    pub fn lookup(&self, policy: MatchPolicy) -> Lookup<'_> {
        Lookup::new(self, policy)
    }

    /// Query this graph with exact matching only.
    #[must_use]
    pub fn exact_lookup(&self) -> Lookup<'_> {
        Lookup::new(self, MatchPolicy::Exact)
    }

    /// Query this graph with the policy selected by `config`.
    #[must_use]
    pub fn lookup_with(&self, config: &LookupConfig) -> Lookup<'_> {
        Lookup::new(self, config.match_policy())
    }
}
