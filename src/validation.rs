//! Field validation rules applied to movie info records on create.
//!
//! Every rule is evaluated; a record collects at most one error per field.

use std::fmt;

use crate::movie_info::MovieInfo;

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// A per-field predicate with the message reported when it fails.
pub struct Rule {
    pub field: &'static str,
    pub message: &'static str,
    check: fn(&MovieInfo) -> bool,
}

impl Rule {
    /// Returns the field error if `movie` violates this rule.
    pub fn apply(&self, movie: &MovieInfo) -> Option<FieldError> {
        if (self.check)(movie) {
            None
        } else {
            Some(FieldError {
                field: self.field,
                message: self.message,
            })
        }
    }
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// The rules checked by `validate`.
pub const RULES: &[Rule] = &[
    Rule {
        field: "name",
        message: "movieInfo.name must be present",
        check: |movie| is_present(&movie.name),
    },
    Rule {
        field: "year",
        message: "movieInfo.year must be positive",
        check: |movie| movie.year > 0,
    },
    Rule {
        field: "cast",
        message: "movieInfo.cast must be present",
        check: |movie| movie.cast.iter().all(|member| is_present(member)),
    },
];

/// Evaluate every rule against `movie`, returning all failures in rule order.
pub fn validate(movie: &MovieInfo) -> Vec<FieldError> {
    RULES.iter().filter_map(|rule| rule.apply(movie)).collect()
}
