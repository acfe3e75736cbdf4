//! Language tags and the refinement register

use std::fmt;

use serde::{Deserialize, Serialize};

/// ISO 639-1 language code carried through recognition and translation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Stylistic mode recognized text is rewritten into before translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    #[default]
    Formal,
    Slang,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::Formal => write!(f, "formal"),
            Register::Slang => write!(f, "slang"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_default_is_formal() {
        assert_eq!(Register::default(), Register::Formal);
    }

    #[test]
    fn test_register_serde_lowercase() {
        let register: Register = serde_json::from_str("\"slang\"").unwrap();
        assert_eq!(register, Register::Slang);
        assert_eq!(serde_json::to_string(&Register::Formal).unwrap(), "\"formal\"");
    }

    #[test]
    fn test_language_tag_display() {
        assert_eq!(LanguageTag::new("ko").to_string(), "ko");
    }
}
