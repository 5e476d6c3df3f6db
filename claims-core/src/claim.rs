use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Closed set of claim categories accepted by the intake flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimCategory {
    Theft,
    Loss,
    #[serde(rename = "Accidental Damage")]
    AccidentalDamage,
}

impl ClaimCategory {
    pub const ALL: [ClaimCategory; 3] = [
        ClaimCategory::Theft,
        ClaimCategory::Loss,
        ClaimCategory::AccidentalDamage,
    ];

    /// Exact, case-sensitive match against the wire/display form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Theft" => Some(ClaimCategory::Theft),
            "Loss" => Some(ClaimCategory::Loss),
            "Accidental Damage" => Some(ClaimCategory::AccidentalDamage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::Theft => "Theft",
            ClaimCategory::Loss => "Loss",
            ClaimCategory::AccidentalDamage => "Accidental Damage",
        }
    }
}

impl fmt::Display for ClaimCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw candidate state as entered in the form. Missing fields deserialize as
/// empty strings so absent and empty input surface the same "required" errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClaimForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl ClaimForm {
    pub fn clear(&mut self) {
        self.date.clear();
        self.category.clear();
        self.description.clear();
    }
}

/// A validated, sanitized claim that has not been acknowledged yet.
/// Serializes to exactly the `{date, category, description}` wire payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimDraft {
    pub date: NaiveDate,
    pub category: ClaimCategory,
    pub description: String,
}

/// An accepted claim. The id is assigned only at promotion, after the backend
/// acknowledged the draft; claims are immutable once in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: Uuid,
    pub date: NaiveDate,
    pub category: ClaimCategory,
    pub description: String,
}

impl Claim {
    /// Promote an acknowledged draft, assigning a fresh v4 id
    pub fn accept(draft: ClaimDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: draft.date,
            category: draft.category,
            description: draft.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_exact_members_only() {
        assert_eq!(ClaimCategory::parse("Theft"), Some(ClaimCategory::Theft));
        assert_eq!(
            ClaimCategory::parse("Accidental Damage"),
            Some(ClaimCategory::AccidentalDamage)
        );
        assert_eq!(ClaimCategory::parse("theft"), None);
        assert_eq!(ClaimCategory::parse(" Theft"), None);
        assert_eq!(ClaimCategory::parse("Delay"), None);
    }

    #[test]
    fn category_round_trips_through_serde() {
        let json = serde_json::to_string(&ClaimCategory::AccidentalDamage).unwrap();
        assert_eq!(json, "\"Accidental Damage\"");
        let back: ClaimCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClaimCategory::AccidentalDamage);
    }

    #[test]
    fn draft_serializes_to_wire_payload() {
        let draft = ClaimDraft {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            category: ClaimCategory::Theft,
            description: "Stolen laptop from car".to_string(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "date": "2025-01-01",
                "category": "Theft",
                "description": "Stolen laptop from car"
            })
        );
    }

    #[test]
    fn accepted_claims_get_distinct_ids() {
        let draft = ClaimDraft {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            category: ClaimCategory::Loss,
            description: "Lost keys at the station".to_string(),
        };
        let a = Claim::accept(draft.clone());
        let b = Claim::accept(draft);
        assert_ne!(a.id, b.id);
    }
}
