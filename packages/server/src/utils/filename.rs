use chrono::{DateTime, Utc};

/// Result of sanitizing an uploaded filename.
#[derive(Debug)]
pub enum FilenameError {
    /// Filename is empty or whitespace-only.
    Empty,
    /// Filename contains null bytes.
    NullByte,
    /// Filename contains control characters (CR, LF, etc.).
    ControlCharacter,
    /// Nothing usable remains after stripping unsafe characters.
    NoSafeCharacters,
}

impl FilenameError {
    /// Returns a human-readable error message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Filename cannot be empty",
            Self::NullByte => "Invalid filename: null bytes are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::NoSafeCharacters => "Invalid filename: no usable characters",
        }
    }
}

/// Checks whether a filename carries an allow-listed extension.
///
/// True iff the name contains a `.` and the part after the last `.` is in
/// `allowed` (case-insensitive). Extension-less names are rejected.
pub fn extension_allowed(filename: &str, allowed: &[String]) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|a| a.eq_ignore_ascii_case(&ext))
        }
        None => false,
    }
}

/// Reduces a user-supplied filename to a safe flat name.
///
/// Directory components are dropped, spaces become underscores, and only
/// ASCII alphanumerics plus `.`, `_`, `-` survive. Leading dots and
/// underscores are stripped so the result is never a hidden file.
pub fn sanitize_filename(filename: &str) -> Result<String, FilenameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(FilenameError::Empty);
    }

    if trimmed.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    // Reject ASCII control characters to prevent
    // HTTP header injection (e.g. CRLF in Content-Disposition).
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    let base = trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed);

    let cleaned: String = base
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let cleaned = cleaned.trim_start_matches(['.', '_']);

    if cleaned.is_empty() {
        return Err(FilenameError::NoSafeCharacters);
    }

    Ok(cleaned.to_string())
}

/// Composes the on-disk name for an upload.
///
/// Deterministic for a given (customer, filename, second): two uploads of the
/// same filename for the same customer within one second collide, and the
/// later write wins.
pub fn storage_name(customer_id: i32, sanitized: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}_{}", customer_id, now.format("%Y%m%d_%H%M%S"), sanitized)
}
