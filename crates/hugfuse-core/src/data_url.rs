//! Parsing of `data:<mime-type>;base64,<payload>` URLs.
//!
//! Accepts exactly the strings matched by `^data:(.+);base64,(.+)$`
//! where `.` excludes line terminators. The MIME type is matched
//! greedily, so it extends to the last `;base64,` that still leaves a
//! non-empty payload.

use crate::types::{DataUrlError, ImageData};

const SCHEME: &str = "data:";
const SEPARATOR: &str = ";base64,";

/// Split a data URL into its MIME type and base64 payload.
///
/// Failures are logged at error level before being returned.
///
/// # Errors
///
/// Returns a [`DataUrlError`] describing the first rule the input
/// violates.
pub fn parse_data_url(input: &str) -> Result<ImageData, DataUrlError> {
    let parsed = split(input);
    if let Err(e) = &parsed {
        tracing::error!(error = %e, "invalid data URL format");
    }
    parsed.map(|(mime_type, data)| ImageData::new(mime_type, data))
}

fn split(input: &str) -> Result<(&str, &str), DataUrlError> {
    if input.chars().any(is_line_terminator) {
        return Err(DataUrlError::LineBreak);
    }
    let rest = input
        .strip_prefix(SCHEME)
        .ok_or(DataUrlError::MissingScheme)?;

    let mut separators = rest.rmatch_indices(SEPARATOR).peekable();
    if separators.peek().is_none() {
        return Err(DataUrlError::MissingSeparator);
    }
    let (mime_type, payload) = separators
        .map(|(i, _)| (&rest[..i], &rest[i + SEPARATOR.len()..]))
        .find(|(_, payload)| !payload.is_empty())
        .ok_or(DataUrlError::EmptyPayload)?;

    if mime_type.is_empty() {
        return Err(DataUrlError::EmptyMimeType);
    }
    Ok((mime_type, payload))
}

/// Characters a regex `.` refuses to match.
const fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
