//! Logic gates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::EventId;

/// Boolean operator of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateKind {
    And,
    Or,
}

impl GateKind {
    /// Parses a gate operator, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "AND" => Some(GateKind::And),
            "OR" => Some(GateKind::Or),
            _ => None,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateKind::And => write!(f, "AND"),
            GateKind::Or => write!(f, "OR"),
        }
    }
}

/// A gate and its ordered inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    pub kind: GateKind,
    pub children: Vec<EventId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(GateKind::parse("and"), Some(GateKind::And));
        assert_eq!(GateKind::parse("Or"), Some(GateKind::Or));
        assert_eq!(GateKind::parse("XOR"), None);
    }

    #[test]
    fn displays_uppercase() {
        assert_eq!(GateKind::And.to_string(), "AND");
        assert_eq!(GateKind::Or.to_string(), "OR");
    }
}
