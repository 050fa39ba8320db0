//! Domain types for generated proposals.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel used on the wire for materials without a catalog price.
const UNRESOLVED_PRICE: &str = "NA";

/// Per-unit price of a material.
///
/// Serializes as a JSON number when resolved and as the string `"NA"` when
/// the catalog had no adequately similar priced entry. Keeping the
/// unresolved case out of the numeric domain means cost aggregation can
/// never produce NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitPrice {
    Resolved(f64),
    Unresolved,
}

impl UnitPrice {
    /// The price, if resolved.
    pub fn resolved(&self) -> Option<f64> {
        match self {
            Self::Resolved(p) => Some(*p),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl Serialize for UnitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Resolved(p) => serializer.serialize_f64(*p),
            Self::Unresolved => serializer.serialize_str(UNRESOLVED_PRICE),
        }
    }
}

impl<'de> Deserialize<'de> for UnitPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UnitPriceVisitor;

        impl<'de> Visitor<'de> for UnitPriceVisitor {
            type Value = UnitPrice;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "a number or the string \"{}\"", UNRESOLVED_PRICE)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(UnitPrice::Resolved(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(UnitPrice::Resolved(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(UnitPrice::Resolved(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v == UNRESOLVED_PRICE {
                    Ok(UnitPrice::Unresolved)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }
        }

        deserializer.deserialize_any(UnitPriceVisitor)
    }
}

/// A material line within a task. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: UnitPrice,
}

/// A priced task in a proposal. Constructed once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub label: String,
    pub materials: Vec<Material>,
    pub estimated_duration: String,
    /// Final customer-facing price after markup and VAT, in whole currency units.
    pub margin_protected_price: i64,
    /// Bounded confidence in the generated pricing, in [0, 1].
    pub confidence_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price_serializes_number_or_na() {
        let resolved = serde_json::to_value(UnitPrice::Resolved(20.5)).unwrap();
        assert_eq!(resolved, serde_json::json!(20.5));

        let unresolved = serde_json::to_value(UnitPrice::Unresolved).unwrap();
        assert_eq!(unresolved, serde_json::json!("NA"));
    }

    #[test]
    fn test_unit_price_deserializes_both_forms() {
        let resolved: UnitPrice = serde_json::from_str("12").unwrap();
        assert_eq!(resolved, UnitPrice::Resolved(12.0));

        let unresolved: UnitPrice = serde_json::from_str("\"NA\"").unwrap();
        assert_eq!(unresolved, UnitPrice::Unresolved);

        assert!(serde_json::from_str::<UnitPrice>("\"free\"").is_err());
    }

    #[test]
    fn test_material_round_trip() {
        let material = Material {
            name: "ceramic tile".to_string(),
            quantity: 10.0,
            unit: "m2".to_string(),
            unit_price: UnitPrice::Unresolved,
        };
        let json = serde_json::to_string(&material).unwrap();
        assert!(json.contains("\"unit_price\":\"NA\""));
    }
}
