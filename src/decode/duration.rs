//! Duration string parsing
//!
//! Accepted forms:
//! - `""` is zero
//! - plain digits are a count of seconds (`"90"`)
//! - anything else is a human-readable duration (`"30s"`, `"5m"`, `"1h 30m"`)
//!
//! A leading `-` or `+` applies to the whole duration. A leading `.` reads as
//! `0.` (`".5s"`). Surrounding whitespace is not trimmed. Sub-second parts are
//! truncated.

use crate::schema::DurationError;

/// Parses `text` into a whole number of seconds.
pub fn parse_duration_seconds(text: &str) -> Result<i64, DurationError> {
    if text.is_empty() {
        return Ok(0);
    }
    if text.trim().len() != text.len() {
        return Err(invalid(text, "surrounding whitespace"));
    }

    let (negative, body) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    if body.is_empty() {
        return Err(invalid(text, "missing value"));
    }

    let magnitude = if body.bytes().all(|b| b.is_ascii_digit()) {
        body.parse::<u64>()
            .map_err(|_| DurationError::Overflow(text.to_string()))?
    } else {
        let duration = match body.strip_prefix('.') {
            Some(fraction) => humantime::parse_duration(&format!("0.{}", fraction)),
            None => humantime::parse_duration(body),
        }
        .map_err(|e| invalid(text, e))?;
        duration.as_secs()
    };

    let seconds = if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };
    seconds.ok_or_else(|| DurationError::Overflow(text.to_string()))
}

fn invalid(input: &str, reason: impl ToString) -> DurationError {
    DurationError::Invalid {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
