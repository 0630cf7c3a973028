use anyhow::Result;
use rosetta_java::Snapshot;

pub fn run() -> Result<()> {
    let schema = schemars::schema_for!(Snapshot);
    super::write_json(&serde_json::to_value(&schema)?, None)
}
