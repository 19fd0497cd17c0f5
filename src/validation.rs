use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Reasons a chat message is rejected with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message is required and must be a string")]
    Missing,
    #[error("Message too long (max 2000 characters)")]
    TooLong,
    #[error("Message cannot be empty")]
    Empty,
}

/// Patterns worth a log line. They never reject a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspiciousPattern {
    ExploitKeyword,
    CredentialAssignment,
}

impl SuspiciousPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuspiciousPattern::ExploitKeyword => "exploit_keyword",
            SuspiciousPattern::CredentialAssignment => "credential_assignment",
        }
    }
}

lazy_static! {
    static ref SUSPICIOUS_PATTERNS: Vec<(SuspiciousPattern, Regex)> = vec![
        (
            SuspiciousPattern::ExploitKeyword,
            Regex::new(r"(?i)(?:hack|exploit|bypass|injection|xss|script)").unwrap(),
        ),
        (
            SuspiciousPattern::CredentialAssignment,
            Regex::new(r"(?i)(?:admin|password|token|secret|key)\s*[:=]").unwrap(),
        ),
    ];
}

/// Apply the message rules in order, first failure wins.
///
/// Length is counted in UTF-16 code units, as browsers count it. Returns
/// the accepted message.
pub fn validate(message: Option<&str>) -> Result<&str, ValidationError> {
    let message = message.ok_or(ValidationError::Missing)?;

    if message.encode_utf16().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::TooLong);
    }

    // "" lands here, not on Missing: it is present and a string, so the
    // reply is "cannot be empty" rather than the required/type text
    if message.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    Ok(message)
}

/// First suspicious pattern found in the message, if any.
pub fn scan_suspicious(message: &str) -> Option<SuspiciousPattern> {
    SUSPICIOUS_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(message))
        .map(|(pattern, _)| *pattern)
}
