use std::fmt;
use crate::config::enums::validation_strictness::ValidationStrictness;

impl fmt::Display for ValidationStrictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStrictness::lenient => write!(f, "lenient"),
            ValidationStrictness::standard => write!(f, "standard"),
            ValidationStrictness::strict => write!(f, "strict"),
        }
    }
}

impl ValidationStrictness {
    /// Whether a peer that declared a different metadata size than the running
    /// assembly may still be asked for pieces.
    pub fn tolerates_size_mismatch(&self) -> bool {
        *self == ValidationStrictness::lenient
    }

    /// Whether a hash-valid info dictionary that cannot be parsed fails the session.
    pub fn requires_parsable_info(&self) -> bool {
        *self == ValidationStrictness::strict
    }
}
