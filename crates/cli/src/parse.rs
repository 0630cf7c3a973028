use anyhow::Result;
use rosetta_api::{KnownTypes, TypeRef};
use rosetta_java::serialize::{PayloadOptions, to_payload};
use rosetta_java::{ShorteningPolicy, TypeContext, TypeParser, compile};
use serde_json::{Value, json};
use tracing::info;

pub fn run(expr: &str, known: &[String], full: bool) -> Result<()> {
    let report = describe(expr, known, full)?;
    super::write_json(&report, None)
}

fn describe(expr: &str, known: &[String], full: bool) -> Result<Value> {
    let universe = KnownTypes::new(known.iter().cloned());
    let parser = TypeParser::new(&universe);
    let ty: TypeRef = parser.parse(expr)?;
    info!(
        "Parsed '{}' (generic: {}, array depth: {})",
        expr,
        ty.is_generic(),
        ty.array_depth()
    );

    let ctx = TypeContext::new("", "", &ShorteningPolicy::Qualified);
    let options = PayloadOptions {
        write_full_type: full,
    };
    Ok(json!({
        "canonical": compile(&ty),
        "payload": to_payload(&ty, &ctx, &options, None),
        "type": serde_json::to_value(&ty)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_normalizes_spacing() {
        let known = vec!["java.util.Map".to_string(), "java.lang.String".to_string()];
        let report = describe("java.util.Map< K ,java.lang.String[] >", &known, false).unwrap();
        assert_eq!(report["canonical"], "java.util.Map<K, java.lang.String[]>");
        assert_eq!(report["payload"]["base"], "java.util.Map");
        assert_eq!(
            report["payload"]["parameters"][1],
            Value::String("java.lang.String[]".into())
        );
    }

    #[test]
    fn test_describe_rejects_malformed() {
        assert!(describe("java.util.List<", &[], false).is_err());
    }
}
