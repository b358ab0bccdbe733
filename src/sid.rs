//! Security identifier value type.
//!
//! Modeled as the dash-separated component list of a Windows SID
//! (`S-1-5-21-<domain>-<domain>-<domain>-<rid>` parses to components
//! `[1, 5, 21, ..., rid]`), so `component(2)` is the identifier-authority
//! sub-authority that carries the well-known `21` "this is a domain SID"
//! marker spec.md §9 refers to.

use std::fmt;

/// An optional SID: `None` represents "no SID" (`IsNull()` in spec.md §3).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Sid {
    components: Vec<u32>,
}

impl Sid {
    /// Build a SID from its raw dash-separated components, e.g.
    /// `Sid::new(&[1, 5, 21, 111, 222, 333, 1001])`.
    pub fn new(components: &[u32]) -> Self {
        Sid {
            components: components.to_vec(),
        }
    }

    /// Component at the given 0-based index, or `None` if out of range.
    pub fn component(&self, i: usize) -> Option<u32> {
        self.components.get(i).copied()
    }

    /// `true` if `component(2) == 21`, the Windows domain-authority marker.
    pub fn is_domain_sid(&self) -> bool {
        self.component(2) == Some(21)
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S")?;
        for c in &self.components {
            write!(f, "-{}", c)?;
        }
        Ok(())
    }
}

/// `Option<Sid>` carries `IsNull()` for free (`None` == null). This helper
/// spells out the spec.md §4.3 backlink exception:
///
/// > not a cross-domain SID match (i.e. not "both SIDs non-null and
/// > sharing SID component 2 == 21 and equal SIDs")
///
/// i.e. two distinct node handles that both carry the identical SID of a
/// domain principal (the shape a foreign-security-principal mirror takes
/// across a trust boundary) are always allowed to reappear as a backlink
/// target, regardless of the `Backlinks` window.
pub fn is_cross_domain_exempt(a: &Option<Sid>, b: &Option<Sid>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.is_domain_sid() && b.is_domain_sid() && a == b,
        _ => false,
    }
}

lazy_static::lazy_static! {
    /// The well-known "Everyone" SID, `S-1-1-0`.
    pub static ref EVERYONE_SID: Sid = Sid::new(&[1, 1, 0]);
    /// The well-known "Authenticated Users" SID, `S-1-5-11`.
    pub static ref AUTHENTICATED_USERS_SID: Sid = Sid::new(&[1, 5, 11]);
}
