//! Key matching policy for lookups.
//!
//! Every lookup compares a stored key against the query key with a
//! [`MatchPolicy`]. An exact match is always accepted. With
//! [`MatchPolicy::TolerateMiscased`], a key that differs only in letter case
//! (`ABC` vs `abc`) is accepted too.

use std::fmt;

/// How lookups compare keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MatchPolicy {
    /// Only exact, case-sensitive matches
    #[default]
    Exact,

    /// Exact matches, falling back to a case-insensitive comparison
    TolerateMiscased,
}

impl MatchPolicy {
    /// Build a policy from a "tolerate miscased keys" flag.
    #[must_use]
    pub fn from_tolerate_miscased(tolerate: bool) -> Self {
        if tolerate {
            Self::TolerateMiscased
        } else {
            Self::Exact
        }
    }

    /// Returns `true` if the case-insensitive fallback is enabled.
    #[must_use]
    pub fn tolerates_miscased(self) -> bool {
        self == Self::TolerateMiscased
    }

    /// Test whether `candidate` matches `query` under this policy.
    ///
    /// The exact comparison runs first; the case-insensitive one only runs
    /// when that fails and the policy allows it.
    #[must_use]
    pub fn matches(self, candidate: &str, query: &str) -> bool {
        candidate == query || (self.tolerates_miscased() && eq_ignore_case(candidate, query))
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::TolerateMiscased => write!(f, "tolerate-miscased"),
        }
    }
}

/// Case-insensitive equality under Unicode simple case folding.
///
/// Characters compare one to one, so `ß` never equals `ss`.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().map(simple_fold).eq(b.chars().map(simple_fold))
}

/// Map `c` to a representative of its case-fold class.
///
/// Round-tripping through the uppercase form joins variants that share an
/// uppercase letter (`σ`, `ς` and `Σ`; `s`, `ſ` and `S`). Mappings that
/// expand to several characters are not simple folds and are skipped.
fn simple_fold(c: char) -> char {
    let upper = single(c.to_uppercase()).unwrap_or(c);
    single(upper.to_lowercase())
        .or_else(|| single(c.to_lowercase()))
        .unwrap_or(upper)
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
