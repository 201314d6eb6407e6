/// Result of one decode attempt, or of a whole scan.
///
/// Decoding is all-or-nothing: `Success` always carries non-empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Decoded payload
    Success(String),
    /// No readable symbol
    NotFound,
}

impl DecodeOutcome {
    /// Map optional decoder text, treating empty text as not found
    pub fn from_text(text: Option<String>) -> Self {
        match text {
            Some(t) if !t.is_empty() => DecodeOutcome::Success(t),
            _ => DecodeOutcome::NotFound,
        }
    }

    /// Whether a payload was decoded
    pub fn is_success(&self) -> bool {
        matches!(self, DecodeOutcome::Success(_))
    }

    /// Decoded payload, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            DecodeOutcome::Success(t) => Some(t),
            DecodeOutcome::NotFound => None,
        }
    }

    /// Consume into the payload
    pub fn into_text(self) -> Option<String> {
        match self {
            DecodeOutcome::Success(t) => Some(t),
            DecodeOutcome::NotFound => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_not_found() {
        assert_eq!(DecodeOutcome::from_text(Some(String::new())), DecodeOutcome::NotFound);
        assert_eq!(DecodeOutcome::from_text(None), DecodeOutcome::NotFound);
        let ok = DecodeOutcome::from_text(Some("DL123".into()));
        assert!(ok.is_success());
        assert_eq!(ok.text(), Some("DL123"));
    }
}
