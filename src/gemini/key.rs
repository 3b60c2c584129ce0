use reqwest::header::HeaderValue;
use std::fmt;

use crate::error::VeritasError;

/// Caller-supplied Gemini API key.
///
/// Stored only as a sensitive header value; `Debug` never prints it.
#[derive(Clone)]
pub struct ApiKey(HeaderValue);

impl ApiKey {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, VeritasError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(VeritasError::InvalidApiKey);
        }
        let mut value = HeaderValue::from_str(raw).map_err(|_| VeritasError::InvalidApiKey)?;
        value.set_sensitive(true);
        Ok(Self(value))
    }

    pub(crate) fn header_value(&self) -> &HeaderValue {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let key = ApiKey::new("AIzaSy-secret-value").expect("valid key");
        let printed = format!("{key:?}");
        assert!(!printed.contains("secret"));
        assert!(key.header_value().is_sensitive());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let key = ApiKey::new("  abc123\n").expect("valid key");
        assert_eq!(key.header_value().as_bytes(), b"abc123");
    }

    #[test]
    fn blank_or_non_header_keys_rejected() {
        assert!(matches!(ApiKey::new("   "), Err(VeritasError::InvalidApiKey)));
        assert!(matches!(
            ApiKey::new("bad\u{7f}key"),
            Err(VeritasError::InvalidApiKey)
        ));
    }
}
