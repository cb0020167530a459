use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// A single check applied to a field value that is present in the payload
///
/// Absent fields never reach these checks; `FieldRule::required` decides
/// whether absence is itself a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// At least this many characters
    MinLength(usize),
    /// At most this many characters
    MaxLength(usize),
    /// Exactly this many ASCII digits and nothing else
    Digits(usize),
    /// One of a closed set of values
    OneOf(&'static [&'static str]),
    /// Email address syntax; the empty string is left to `FieldRule::required`
    Email,
    /// Calendar date in `YYYY-MM-DD` form
    Date,
}

impl Constraint {
    /// Returns true if `value` satisfies this constraint
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        match *self {
            Constraint::MinLength(min) => value.chars().count() >= min,
            Constraint::MaxLength(max) => value.chars().count() <= max,
            Constraint::Digits(len) => {
                value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
            }
            Constraint::OneOf(allowed) => allowed.contains(&value),
            Constraint::Email => value.is_empty() || is_email(value),
            Constraint::Date => parse_date(value).is_some(),
        }
    }

    /// Violation message for a field with the given human-readable label
    pub fn message(&self, label: &str) -> String {
        match *self {
            Constraint::MinLength(min) => {
                format!("{} must be at least {} characters", label, min)
            }
            Constraint::MaxLength(max) => {
                format!("{} must be at most {} characters", label, max)
            }
            Constraint::Digits(len) => format!("{} must be a {}-digit number", label, len),
            Constraint::OneOf(_) => format!("Invalid {}", label),
            Constraint::Email => "Invalid email".to_string(),
            Constraint::Date => format!("{} must be a date in YYYY-MM-DD format", label),
        }
    }
}

/// Declarative rule for one field of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Key in the incoming JSON object
    pub field: &'static str,
    /// Name used in violation messages
    pub label: &'static str,
    pub required: bool,
    pub constraints: &'static [Constraint],
}

impl FieldRule {
    /// A field that must be present and non-empty
    pub const fn required(
        field: &'static str,
        label: &'static str,
        constraints: &'static [Constraint],
    ) -> Self {
        Self {
            field,
            label,
            required: true,
            constraints,
        }
    }

    /// A field that is only checked when present
    pub const fn optional(
        field: &'static str,
        label: &'static str,
        constraints: &'static [Constraint],
    ) -> Self {
        Self {
            field,
            label,
            required: false,
            constraints,
        }
    }

    pub fn required_message(&self) -> String {
        format!("{} is required", self.label)
    }

    pub fn type_message(&self) -> String {
        format!("{} must be a string", self.label)
    }
}

/// Parses a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Returns true if `value` is a syntactically valid email address
pub fn is_email(value: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email regex is valid")
    });

    value.len() <= 254 && regex.is_match(value)
}
