//! Error translator: field errors to the plain-text body clients expect.
//!
//! Messages are sorted lexicographically and joined with `,` (no space).
//! Existing clients compare this string verbatim.

use crate::validation::FieldError;

/// Separator between messages in a translated body.
pub const MESSAGE_SEPARATOR: &str = ",";

/// Join the messages of `errors` into a single deterministic string.
pub fn translate(errors: &[FieldError]) -> String {
    let mut messages: Vec<&str> = errors.iter().map(|e| e.message).collect();
    messages.sort_unstable();
    messages.dedup();
    messages.join(MESSAGE_SEPARATOR)
}
