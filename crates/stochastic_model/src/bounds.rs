//! Serialised form of variable and row bounds.
//!
//! JSON has no infinities, so an unbounded side is omitted and restored on
//! deserialisation: a missing `lower` means `-inf`, a missing `upper` means
//! `+inf`.

pub(crate) fn unbounded_below() -> f64 {
    f64::NEG_INFINITY
}

pub(crate) fn unbounded_above() -> f64 {
    f64::INFINITY
}

pub(crate) fn is_unbounded_below(bound: &f64) -> bool {
    *bound == f64::NEG_INFINITY
}

pub(crate) fn is_unbounded_above(bound: &f64) -> bool {
    *bound == f64::INFINITY
}
