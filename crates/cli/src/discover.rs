use crate::config::{OutputArgs, RosettaConfig};
use anyhow::{Context, Result};
use rosetta_java::{JavaLanguage, SnapshotSource};
use serde_json::Value;
use std::path::Path;
use tracing::info;

pub fn run(snapshot: &Path, classes: &[String], output: &OutputArgs) -> Result<()> {
    let document = discover(snapshot, classes, output)?;
    super::write_json(&document, output.output.as_deref())
}

fn discover(snapshot: &Path, classes: &[String], output: &OutputArgs) -> Result<Value> {
    let config = RosettaConfig::load_or_default(output.config.as_deref())?;
    let text = std::fs::read_to_string(snapshot)
        .with_context(|| format!("Failed to read snapshot {}", snapshot.display()))?;
    let source = SnapshotSource::from_json(&text)
        .with_context(|| format!("Invalid snapshot {}", snapshot.display()))?;
    info!(
        "Loaded snapshot {} with {} class(es)",
        snapshot.display(),
        source.len()
    );

    let requested: Vec<String> = if classes.is_empty() {
        let mut all: Vec<String> = source.class_names().map(str::to_string).collect();
        all.sort();
        all
    } else {
        classes.to_vec()
    };

    let mut language = JavaLanguage::new();
    for fqn in &requested {
        language
            .discover(&config.discovery, &source, fqn)
            .with_context(|| format!("Failed to discover {}", fqn))?;
    }
    info!("Discovered {} requested class(es)", requested.len());

    let settings = config.serialize_settings(output);
    Ok(language.save(&settings, &output.id))
}
