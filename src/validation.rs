//! Field rules for brief requests.
//!
//! Every field is checked on its own and all violations are reported together.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::models::{BriefCandidate, BriefRequest};

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 200;
pub const AUDIENCE_MIN_CHARS: usize = 10;
pub const AUDIENCE_MAX_CHARS: usize = 500;
pub const PRIMARY_KEYWORDS_MIN: usize = 1;
pub const PRIMARY_KEYWORDS_MAX: usize = 5;
pub const SECONDARY_KEYWORDS_MAX: usize = 10;

/// Field name to human-readable violation messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for one field, empty when the field is valid.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message for a field, the one shown inline next to it.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = BTreeMap::new();
        for (field, field_errors) in errors.field_errors() {
            let messages = field_errors
                .iter()
                .map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => err.code.to_string(),
                })
                .collect();
            map.insert(field.to_string(), messages);
        }
        FieldErrors(map)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    (min, max): (usize, usize),
    (too_short, too_long): (&'static str, &'static str),
) {
    let len = value.chars().count();
    if len < min {
        errors.add(field, violation("too_short", too_short));
    } else if len > max {
        errors.add(field, violation("too_long", too_long));
    }
}

fn check_keywords(
    errors: &mut ValidationErrors,
    field: &'static str,
    keywords: &[String],
    (min, max): (usize, usize),
    (too_few, too_many): (&'static str, &'static str),
) {
    if keywords.iter().any(|k| k.is_empty()) {
        errors.add(field, violation("empty_keyword", "Keyword cannot be empty"));
    }
    if keywords.len() < min {
        errors.add(field, violation("too_few", too_few));
    } else if keywords.len() > max {
        errors.add(field, violation("too_many", too_many));
    }
    let mut seen = HashSet::new();
    if keywords.iter().any(|k| !seen.insert(k.as_str())) {
        errors.add(field, violation("duplicate_keyword", "Duplicate keywords are not allowed"));
    }
}

impl Validate for BriefCandidate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_length(
            &mut errors,
            "title",
            &self.title,
            (TITLE_MIN_CHARS, TITLE_MAX_CHARS),
            (
                "Title must be at least 5 characters",
                "Title must be less than 200 characters",
            ),
        );
        check_length(
            &mut errors,
            "target_audience",
            &self.target_audience,
            (AUDIENCE_MIN_CHARS, AUDIENCE_MAX_CHARS),
            (
                "Target audience description must be at least 10 characters",
                "Target audience description must be less than 500 characters",
            ),
        );
        check_keywords(
            &mut errors,
            "primary_keywords",
            &self.primary_keywords,
            (PRIMARY_KEYWORDS_MIN, PRIMARY_KEYWORDS_MAX),
            (
                "At least one primary keyword is required",
                "Maximum 5 primary keywords allowed",
            ),
        );
        check_keywords(
            &mut errors,
            "secondary_keywords",
            &self.secondary_keywords,
            (0, SECONDARY_KEYWORDS_MAX),
            ("", "Maximum 10 secondary keywords allowed"),
        );

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl BriefCandidate {
    /// Validates the candidate and turns it into a sendable request.
    pub fn into_request(self) -> Result<BriefRequest, FieldErrors> {
        self.validate()?;
        Ok(BriefRequest::from_validated(self))
    }
}
