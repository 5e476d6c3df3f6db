use chrono::{Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::claim::{ClaimCategory, ClaimDraft, ClaimForm};
use crate::sanitize::sanitize;

pub const MIN_DESCRIPTION_CHARS: usize = 10;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

lazy_static! {
    /// Known dangerous content shapes. A denylist that rejects, never rewrites.
    static ref DANGEROUS_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap(),
        Regex::new(r"(?i)javascript:").unwrap(),
        Regex::new(r"(?i)on\w+\s*=").unwrap(),
        Regex::new(r"(?is)<iframe[^>]*>.*?</iframe>").unwrap(),
        Regex::new(r"(?i)data:text/html").unwrap(),
        Regex::new(r"(?i)vbscript:").unwrap(),
    ];

    static ref DATE_SHAPE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Parse a claim date, requiring the exact `YYYY-MM-DD` shape and a real
/// calendar date
pub fn parse_claim_date(s: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn is_valid_date(s: &str) -> bool {
    parse_claim_date(s).is_some()
}

/// True iff the date is on or before the end of the current local calendar day
pub fn is_not_future_date(s: &str) -> bool {
    match parse_claim_date(s) {
        Some(date) => date <= Local::now().date_naive(),
        None => false,
    }
}

pub fn is_known_category(s: &str) -> bool {
    ClaimCategory::parse(s).is_some()
}

pub fn has_no_malicious_content(text: &str) -> bool {
    !DANGEROUS_PATTERNS.iter().any(|p| p.is_match(text))
}

/// Form fields, declared in surfacing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Date,
    Category,
    Description,
    /// Catch-all for candidates whose shape could not be read at all
    General,
}

/// Per-field validation messages, ordered by field priority
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn general() -> Self {
        let mut errors = Self::new();
        errors.insert(Field::General, "Validation failed");
        errors
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Highest-priority entry (date, then category, then description)
    pub fn first(&self) -> Option<(Field, &str)> {
        self.0.iter().next().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Validate a candidate form, producing either a sanitized, typed draft or a
/// map of per-field messages. Fields are checked independently; each
/// contributes at most its first failing rule. Length bounds apply to the raw
/// description; sanitization is applied only in the success value.
pub fn validate_form(form: &ClaimForm) -> Result<ClaimDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let date = if form.date.is_empty() {
        errors.insert(Field::Date, "Date is required");
        None
    } else {
        match parse_claim_date(&form.date) {
            None => {
                errors.insert(Field::Date, "Please enter a valid date");
                None
            }
            Some(date) if date > Local::now().date_naive() => {
                errors.insert(Field::Date, "Date cannot be in the future");
                None
            }
            Some(date) => Some(date),
        }
    };

    let category = if form.category.is_empty() {
        errors.insert(Field::Category, "Category is required");
        None
    } else {
        match ClaimCategory::parse(&form.category) {
            None => {
                errors.insert(Field::Category, "Please select a valid category");
                None
            }
            Some(category) => Some(category),
        }
    };

    let description_chars = form.description.chars().count();
    if form.description.is_empty() {
        errors.insert(Field::Description, "Description is required");
    } else if description_chars < MIN_DESCRIPTION_CHARS {
        errors.insert(
            Field::Description,
            "Description must be at least 10 characters",
        );
    } else if description_chars > MAX_DESCRIPTION_CHARS {
        errors.insert(
            Field::Description,
            "Description cannot exceed 1000 characters",
        );
    } else if !has_no_malicious_content(&form.description) {
        errors.insert(Field::Description, "Description contains invalid content");
    }

    match (date, category, errors.is_empty()) {
        (Some(date), Some(category), true) => Ok(ClaimDraft {
            date,
            category,
            description: sanitize(&form.description),
        }),
        _ => Err(errors),
    }
}

/// Untyped entry point for the HTTP boundary. Candidates whose shape cannot
/// be read map to a single `general` message instead of a raw fault; missing
/// fields read as empty and fall through to the per-field "required" rules.
pub fn validate_value(value: &Value) -> Result<ClaimDraft, FieldErrors> {
    match serde_json::from_value::<ClaimForm>(value.clone()) {
        Ok(form) => validate_form(&form),
        Err(_) => Err(FieldErrors::general()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn today() -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }

    fn form(date: &str, category: &str, description: &str) -> ClaimForm {
        ClaimForm {
            date: date.to_string(),
            category: category.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn date_shape_and_calendar_checks() {
        assert!(is_valid_date("2025-01-01"));
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2025-13-40"));
        assert!(!is_valid_date("2025-02-30"));
        assert!(!is_valid_date("2025-1-1"));
        assert!(!is_valid_date("01-01-2025"));
        assert!(!is_valid_date("2025-01-01T00:00:00"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn future_date_check_uses_local_day() {
        let today = Local::now().date_naive();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
        assert!(is_not_future_date(&today.format("%Y-%m-%d").to_string()));
        assert!(!is_not_future_date(&tomorrow.format("%Y-%m-%d").to_string()));
        assert!(is_not_future_date("2020-06-15"));
    }

    #[test]
    fn category_membership_is_exact() {
        assert!(is_known_category("Theft"));
        assert!(is_known_category("Loss"));
        assert!(is_known_category("Accidental Damage"));
        assert!(!is_known_category("theft"));
        assert!(!is_known_category("Damage"));
        assert!(!is_known_category(""));
    }

    #[test]
    fn denylist_catches_known_patterns() {
        assert!(has_no_malicious_content("a perfectly ordinary description"));
        assert!(!has_no_malicious_content("<script>alert(1)</script>"));
        assert!(!has_no_malicious_content("click javascript:alert(1)"));
        assert!(!has_no_malicious_content("<img onerror=alert(1)>"));
        assert!(!has_no_malicious_content("onclick = \"x\""));
        assert!(!has_no_malicious_content("<iframe src=x>y</iframe>"));
        assert!(!has_no_malicious_content("data:text/html,<b>x</b>"));
        assert!(!has_no_malicious_content("VBSCRIPT:msgbox"));
    }

    #[test]
    fn valid_form_yields_sanitized_draft() {
        let result = validate_form(&form(
            "2025-01-01",
            "Theft",
            "  <b>Stolen laptop</b> from car  ",
        ));
        let draft = result.expect("expected a valid draft");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(draft.category, ClaimCategory::Theft);
        assert_eq!(draft.description, "Stolen laptop from car");
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let errors = validate_form(&form("2025-13-40", "Theft", "a valid description"))
            .unwrap_err();
        assert_eq!(errors.get(Field::Date), Some("Please enter a valid date"));
    }

    #[test]
    fn tomorrow_is_rejected_today_is_accepted() {
        let tomorrow = Local::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap()
            .format("%Y-%m-%d")
            .to_string();
        let errors =
            validate_form(&form(&tomorrow, "Loss", "a valid description")).unwrap_err();
        assert_eq!(errors.get(Field::Date), Some("Date cannot be in the future"));

        assert!(validate_form(&form(&today(), "Loss", "a valid description")).is_ok());
    }

    #[test]
    fn category_errors() {
        let errors = validate_form(&form(&today(), "", "a valid description")).unwrap_err();
        assert_eq!(errors.get(Field::Category), Some("Category is required"));

        let errors =
            validate_form(&form(&today(), "Gadgets", "a valid description")).unwrap_err();
        assert_eq!(
            errors.get(Field::Category),
            Some("Please select a valid category")
        );
    }

    #[test]
    fn description_length_boundaries() {
        let errors = validate_form(&form(&today(), "Theft", "123456789")).unwrap_err();
        assert_eq!(
            errors.get(Field::Description),
            Some("Description must be at least 10 characters")
        );

        assert!(validate_form(&form(&today(), "Theft", "1234567890")).is_ok());
        assert!(validate_form(&form(&today(), "Theft", &"x".repeat(1000))).is_ok());

        let errors =
            validate_form(&form(&today(), "Theft", &"x".repeat(1001))).unwrap_err();
        assert_eq!(
            errors.get(Field::Description),
            Some("Description cannot exceed 1000 characters")
        );
    }

    #[test]
    fn empty_description_is_required_not_too_short() {
        let errors = validate_form(&form(&today(), "Theft", "")).unwrap_err();
        assert_eq!(errors.get(Field::Description), Some("Description is required"));
    }

    #[test]
    fn malicious_description_is_rejected_not_cleaned() {
        let errors = validate_form(&form(
            &today(),
            "Theft",
            "<script>alert(1)</script> stole my bag",
        ))
        .unwrap_err();
        assert_eq!(
            errors.get(Field::Description),
            Some("Description contains invalid content")
        );
    }

    #[test]
    fn all_fields_report_independently_with_date_first() {
        let errors = validate_form(&form("", "", "")).unwrap_err();
        assert_eq!(errors.get(Field::Date), Some("Date is required"));
        assert_eq!(errors.get(Field::Category), Some("Category is required"));
        assert_eq!(errors.get(Field::Description), Some("Description is required"));
        assert_eq!(errors.first(), Some((Field::Date, "Date is required")));
    }

    #[test]
    fn value_entry_point_maps_missing_fields_to_required() {
        let errors =
            validate_value(&serde_json::json!({ "date": "2025-01-01" })).unwrap_err();
        assert_eq!(errors.get(Field::Category), Some("Category is required"));
        assert_eq!(errors.get(Field::Description), Some("Description is required"));
    }

    #[test]
    fn value_entry_point_maps_malformed_shapes_to_general() {
        for bad in [
            serde_json::json!([1, 2, 3]),
            serde_json::json!("not an object"),
            serde_json::json!({ "date": 5, "category": "Theft", "description": "x" }),
        ] {
            let errors = validate_value(&bad).unwrap_err();
            assert_eq!(errors.get(Field::General), Some("Validation failed"));
            assert_eq!(errors.first(), Some((Field::General, "Validation failed")));
        }
    }
}
