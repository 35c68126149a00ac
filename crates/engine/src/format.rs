//! Number rendering for expression descriptions.
//!
//! Only the textual rendering is capped; evaluation results keep full
//! precision.

/// Fractional digit cap for rendered numbers.
pub const MAX_FRACTION_DIGITS: usize = 6;

/// Format a value for the expression description.
///
/// At most [`MAX_FRACTION_DIGITS`] fractional digits, at least one integer
/// digit (`0.5`, never `.5`), trailing zeros trimmed.
pub fn format_number(value: f64) -> String {
    let mut text = format!("{value:.prec$}", prec = MAX_FRACTION_DIGITS);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    text
}
