use crate::config::{OutputArgs, RosettaConfig};
use anyhow::{Context, Result};
use rosetta_api::KnownTypes;
use rosetta_java::JavaLanguage;
use serde_json::Value;
use std::path::Path;
use tracing::info;

pub fn run(document: &Path, output: &OutputArgs) -> Result<()> {
    let normalized = normalize(document, output)?;
    super::write_json(&normalized, output.output.as_deref())
}

fn normalize(document: &Path, output: &OutputArgs) -> Result<Value> {
    let config = RosettaConfig::load_or_default(output.config.as_deref())?;
    let text = std::fs::read_to_string(document)
        .with_context(|| format!("Failed to read document {}", document.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Document {} is not valid JSON", document.display()))?;

    let universe = KnownTypes::new(config.known_types.iter().cloned());
    let language = JavaLanguage::load(&value, &output.id, &universe)
        .with_context(|| format!("Invalid document {}", document.display()))?;
    info!(
        "Loaded {} package(s) from {}",
        language.packages().count(),
        document.display()
    );

    let settings = config.serialize_settings(output);
    Ok(language.save(&settings, &output.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosetta_java::DictionaryMode;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn document_file(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    #[test]
    fn test_normalize_switches_dictionary_mode() {
        let file = document_file(&json!({
            "packages": { "demo": { "classes": { "Box": {
                "type_parameters": ["$rosetta:0"],
                "fields": { "items": { "type": "$rosetta:1" } }
            }}}},
            "types": [
                { "base": "T", "generic": true },
                { "base": "java.util.List", "parameters": ["$rosetta:0"] }
            ]
        }));

        let inline = normalize(
            file.path(),
            &OutputArgs {
                types: Some(DictionaryMode::None),
                ..OutputArgs::default()
            },
        )
        .unwrap();
        let class = &inline["packages"]["demo"]["classes"]["Box"];
        assert_eq!(class["type_parameters"][0], json!({ "base": "T", "generic": true }));
        assert_eq!(class["fields"]["items"]["type"]["base"], "java.util.List");
        assert!(inline.get("types").is_none());
    }

    #[test]
    fn test_normalize_reports_invalid_document() {
        let file = document_file(&json!({
            "packages": { "demo": { "classes": { "Box": { "scope": "friends" } } } }
        }));
        let err = normalize(file.path(), &OutputArgs::default()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid document"));
        assert!(format!("{:#}", err).contains("friends"));
    }
}
