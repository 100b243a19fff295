//! Compiled route tokens.
//!
//! Route exporters ship tokens as positional JSON arrays:
//!
//! ```text
//! ["text", "/article"]
//! ["variable", "/", "\\d+", "id"]
//! ```
//!
//! They are parsed into [`Token`] once, when the route table is loaded.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, UrlGenError};

/// Tag of a token in its positional wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Literal text.
    Text,
    /// Named placeholder.
    Variable,
}

impl TokenType {
    /// Parses a wire tag.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(Self::Text),
            "variable" => Some(Self::Variable),
            _ => None,
        }
    }

    /// Returns the wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Variable => "variable",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment of a compiled path or host template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A literal fragment, emitted verbatim.
    Text {
        /// The literal text.
        pattern: String,
    },
    /// A placeholder replaced by a parameter value.
    Variable {
        /// Literal text emitted right before the value (usually `/`).
        prefix: String,
        /// Matching fragment; generation ignores it.
        pattern: String,
        /// Parameter name.
        name: String,
    },
}

impl Token {
    /// Creates a text token.
    #[must_use]
    pub fn text(pattern: impl Into<String>) -> Self {
        Self::Text {
            pattern: pattern.into(),
        }
    }

    /// Creates a variable token.
    #[must_use]
    pub fn variable(
        prefix: impl Into<String>,
        pattern: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::Variable {
            prefix: prefix.into(),
            pattern: pattern.into(),
            name: name.into(),
        }
    }

    /// Returns the token tag.
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        match self {
            Self::Text { .. } => TokenType::Text,
            Self::Variable { .. } => TokenType::Variable,
        }
    }

    /// Parses a token from its positional wire form.
    ///
    /// Elements past the ones a token needs are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`UrlGenError::UnsupportedToken`] for an unknown tag or a
    /// missing or non-string element.
    pub fn from_parts(parts: &[Value]) -> Result<Self> {
        let unsupported = || UrlGenError::UnsupportedToken(Value::from(parts.to_vec()).to_string());
        let field = |index: usize| {
            parts
                .get(index)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(unsupported)
        };

        let tag = parts
            .first()
            .and_then(Value::as_str)
            .and_then(TokenType::parse)
            .ok_or_else(unsupported)?;

        match tag {
            TokenType::Text => Ok(Self::Text { pattern: field(1)? }),
            TokenType::Variable => Ok(Self::Variable {
                prefix: field(1)?,
                pattern: field(2)?,
                name: field(3)?,
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let parts = Vec::<Value>::deserialize(deserializer)?;
        Self::from_parts(&parts).map_err(de::Error::custom)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text { pattern } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(TokenType::Text.as_str())?;
                seq.serialize_element(pattern)?;
                seq.end()
            }
            Self::Variable {
                prefix,
                pattern,
                name,
            } => {
                let mut seq = serializer.serialize_seq(Some(4))?;
                seq.serialize_element(TokenType::Variable.as_str())?;
                seq.serialize_element(prefix)?;
                seq.serialize_element(pattern)?;
                seq.serialize_element(name)?;
                seq.end()
            }
        }
    }
}
