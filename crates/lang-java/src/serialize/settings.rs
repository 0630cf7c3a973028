use crate::compile::ShorteningPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How nested type payloads are pooled in a saved document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryMode {
    /// Slots rendered as an object keyed by index.
    Dictionary,
    /// Slots rendered as an ordered list.
    List,
    /// No dictionary; every type is inlined.
    #[default]
    None,
}

impl DictionaryMode {
    pub fn is_enabled(self) -> bool {
        self != DictionaryMode::None
    }
}

impl FromStr for DictionaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dictionary" => Ok(DictionaryMode::Dictionary),
            "list" => Ok(DictionaryMode::List),
            "none" => Ok(DictionaryMode::None),
            _ => Err(format!("Unknown dictionary mode: {}", s)),
        }
    }
}

impl fmt::Display for DictionaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            DictionaryMode::Dictionary => "dictionary",
            DictionaryMode::List => "list",
            DictionaryMode::None => "none",
        };
        f.write_str(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeSettings {
    pub type_mode: DictionaryMode,
    pub write_full_type: bool,
    pub shortening: ShorteningPolicy,
}

impl SerializeSettings {
    pub fn with_type_mode(mut self, mode: DictionaryMode) -> Self {
        self.type_mode = mode;
        self
    }

    pub fn with_full_type(mut self, write_full_type: bool) -> Self {
        self.write_full_type = write_full_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_from_partial_json() {
        let settings: SerializeSettings =
            serde_json::from_str(r#"{ "type_mode": "list" }"#).unwrap();
        assert_eq!(settings.type_mode, DictionaryMode::List);
        assert!(!settings.write_full_type);
        assert_eq!(settings.shortening, ShorteningPolicy::Qualified);
    }

    #[test]
    fn test_mode_parse_and_display() {
        for mode in [
            DictionaryMode::Dictionary,
            DictionaryMode::List,
            DictionaryMode::None,
        ] {
            assert_eq!(mode.to_string().parse::<DictionaryMode>().unwrap(), mode);
        }
        assert!("tree".parse::<DictionaryMode>().is_err());
        assert!(!DictionaryMode::default().is_enabled());
    }
}
