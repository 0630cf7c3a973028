use anyhow::{Context, Result};
use clap::Args;
use rosetta_java::{DictionaryMode, DiscoverySettings, SerializeSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ID: &str = "rosetta";

/// Settings file read through `--config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosettaConfig {
    pub discovery: DiscoverySettings,
    pub serialize: SerializeSettings,
    /// Names that resolve as concrete types when loading documents
    pub known_types: Vec<String>,
}

impl RosettaConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialization settings with command-line overrides applied.
    pub fn serialize_settings(&self, args: &OutputArgs) -> SerializeSettings {
        let mut settings = self.serialize.clone();
        if let Some(mode) = args.types {
            settings.type_mode = mode;
        }
        if args.full {
            settings.write_full_type = true;
        }
        settings
    }
}

/// Options shared by commands that write a document.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Document id used in type tokens
    #[arg(long, default_value = DEFAULT_ID)]
    pub id: String,

    /// Type dictionary mode: dictionary, list or none
    #[arg(long = "types", value_name = "MODE")]
    pub types: Option<DictionaryMode>,

    /// Write the full compiled form of structured types
    #[arg(long)]
    pub full: bool,

    /// Output file. Defaults to stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Default for OutputArgs {
    fn default() -> Self {
        Self {
            config: None,
            id: DEFAULT_ID.to_string(),
            types: None,
            full: false,
            output: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosetta_java::{ShorteningPolicy, SuperPolicy};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "discovery": {{ "super_policy": "expose" }},
                "serialize": {{ "type_mode": "list", "shortening": "package_relative" }},
                "known_types": ["java.lang.String"]
            }}"#
        )
        .unwrap();

        let config = RosettaConfig::load(file.path()).unwrap();
        assert_eq!(config.discovery.super_policy, SuperPolicy::Expose);
        assert!(config.discovery.expose_methods);
        assert_eq!(config.serialize.type_mode, DictionaryMode::List);
        assert_eq!(config.serialize.shortening, ShorteningPolicy::PackageRelative);
        assert_eq!(config.known_types, vec!["java.lang.String".to_string()]);
    }

    #[test]
    fn test_overrides() {
        let config = RosettaConfig::default();
        let args = OutputArgs {
            types: Some(DictionaryMode::Dictionary),
            full: true,
            ..OutputArgs::default()
        };
        let settings = config.serialize_settings(&args);
        assert_eq!(settings.type_mode, DictionaryMode::Dictionary);
        assert!(settings.write_full_type);

        let untouched = config.serialize_settings(&OutputArgs::default());
        assert_eq!(untouched, SerializeSettings::default());
    }

    #[test]
    fn test_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "serialize": {{ "type_mode": "tree" }} }}"#).unwrap();
        let err = RosettaConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config file"));

        let missing = RosettaConfig::load(Path::new("/nonexistent/rosetta.json"));
        assert!(missing.is_err());
    }
}
