use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Read-only snapshot of the editor taken when a prompt is composed.
///
/// Nothing downstream mutates it; code changes go back through the editor's
/// own setter.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionContext {
    pub source_code: String,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl SessionContext {
    pub fn new(source_code: impl Into<String>, language: Language) -> Self {
        Self {
            source_code: source_code.into(),
            language,
            last_error: None,
        }
    }

    /// Attach the last error. Blank errors are treated as absent.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        let error = error.into();
        self.last_error = if error.trim().is_empty() {
            None
        } else {
            Some(error)
        };
        self
    }

    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_error_is_absent() {
        let ctx = SessionContext::new("x = 1", Language::Python).with_error("   ");
        assert!(!ctx.has_error());
    }

    #[test]
    fn test_error_is_kept_verbatim() {
        let ctx = SessionContext::new("x = 1", Language::Python).with_error("  NameError: y\n");
        assert_eq!(ctx.last_error.as_deref(), Some("  NameError: y\n"));
    }
}
