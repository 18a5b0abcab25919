//! Tri-state variant availability.

use serde::{Deserialize, Serialize};

/// Availability of one (product, size, color) variant.
///
/// `Unknown` means the durable store could not be reached — it must never be
/// conflated with a known quantity of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    /// The store answered. `exists` is false when the product is not carried
    /// in that variant at all (no inventory record).
    Known { exists: bool, quantity: u32 },
    /// The store was unreachable; stock state is indeterminate.
    Unknown,
}

impl Availability {
    pub fn not_carried() -> Self {
        Self::Known {
            exists: false,
            quantity: 0,
        }
    }

    pub fn in_stock(&self) -> bool {
        matches!(self, Self::Known { quantity, .. } if *quantity > 0)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_is_not_out_of_stock() {
        assert!(!Availability::Unknown.in_stock());
        assert!(Availability::Unknown.is_unknown());
        // A known zero is a real answer, not an unknown.
        let empty = Availability::Known {
            exists: true,
            quantity: 0,
        };
        assert!(!empty.is_unknown());
        assert!(!empty.in_stock());
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(Availability::Unknown).unwrap();
        assert_eq!(json["status"], "unknown");
        let json = serde_json::to_value(Availability::Known {
            exists: true,
            quantity: 4,
        })
        .unwrap();
        assert_eq!(json["status"], "known");
        assert_eq!(json["quantity"], 4);
    }
}
