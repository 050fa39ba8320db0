//! Types for the material catalog and quote/feedback store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who submitted feedback on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Contractor,
    Client,
}

impl UserType {
    /// Parse a wire value; anything outside the enumeration is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "contractor" => Some(Self::Contractor),
            "client" => Some(Self::Client),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contractor => write!(f, "contractor"),
            Self::Client => write!(f, "client"),
        }
    }
}

/// A user's accuracy verdict on a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Overpriced,
    Underpriced,
    Accurate,
}

impl Verdict {
    /// Parse a wire value; anything outside the enumeration is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "overpriced" => Some(Self::Overpriced),
            "underpriced" => Some(Self::Underpriced),
            "accurate" => Some(Self::Accurate),
            _ => None,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overpriced => write!(f, "overpriced"),
            Self::Underpriced => write!(f, "underpriced"),
            Self::Accurate => write!(f, "accurate"),
        }
    }
}

/// A catalog row returned by the semantic search RPC.
///
/// The stored embedding column is intentionally absent; unknown columns from
/// PostgREST are dropped on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialRow {
    pub id: Option<Uuid>,
    pub name: String,
    pub unit: Option<String>,
    /// Catalog price per unit; null when the entry has no price yet.
    pub price: Option<f64>,
    /// Cosine similarity to the query, in [0, 1].
    pub similarity_score: f64,
}

/// A quote row, looked up by its external identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRow {
    pub quote_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A feedback row. `id` and `created_at` are assigned at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub task_id: Option<String>,
    pub quote_id: String,
    pub user_type: UserType,
    pub verdict: Verdict,
    pub comment: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_parse_rejects_unknown() {
        assert_eq!(UserType::parse("contractor"), Some(UserType::Contractor));
        assert_eq!(UserType::parse("client"), Some(UserType::Client));
        assert_eq!(UserType::parse("inspector"), None);
        assert_eq!(UserType::parse("Contractor"), None);
    }

    #[test]
    fn test_verdict_parse_rejects_unknown() {
        assert_eq!(Verdict::parse("accurate"), Some(Verdict::Accurate));
        assert_eq!(Verdict::parse("overpriced"), Some(Verdict::Overpriced));
        assert_eq!(Verdict::parse("underpriced"), Some(Verdict::Underpriced));
        assert_eq!(Verdict::parse("fair"), None);
    }

    #[test]
    fn test_material_row_ignores_embedding_column() {
        let row: MaterialRow = serde_json::from_str(
            r#"{
                "id": "7f1e4e6a-9f6b-4c3e-8a52-0a9cb1a7d9a1",
                "name": "ceramic tile",
                "unit": "m2",
                "price": 20.0,
                "similarity_score": 0.91,
                "embedding": [0.1, 0.2]
            }"#,
        )
        .unwrap();
        assert_eq!(row.name, "ceramic tile");
        assert_eq!(row.price, Some(20.0));
    }
}
