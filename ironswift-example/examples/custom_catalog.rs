//! Custom Catalog Example
//!
//! Extends the built-in catalog with field types loaded from JSON and parses
//! values with them.

use ironswift_core::Tag;
use ironswift_dictionary::{FieldConfig, RegistryBuilder};
use ironswift_field::FieldLookup;
use tracing::{info, warn};

const CATALOG: &str = r#"[
    {
        "name": "92A",
        "parser_pattern": ":S//[1!a]S",
        "validator_pattern": ":4!c//[1!a]15d",
        "components": [
            { "label": "Qualifier" },
            { "label": "Sign" },
            { "label": "Rate", "format": "Amount" }
        ]
    },
    {
        "name": "20",
        "parser_pattern": "S",
        "validator_pattern": "35x",
        "components": [{ "label": "Reference" }]
    }
]"#;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let mut builder = RegistryBuilder::with_standard_catalog()?.with_config(FieldConfig::new());
    for result in builder.load_json(CATALOG)? {
        match result {
            Ok(descriptor) => info!("Registered {}", descriptor.name()),
            Err(e) => warn!("Rejected: {}", e),
        }
    }
    let registry = builder.build();

    let tags = vec![
        Tag::new("92A", ":INTR//N0,25")?,
        Tag::new("92A", ":TAXR//15,")?,
    ];
    for field in registry.get_all(&tags, "92A") {
        info!(
            "{} sign={:?} rate={:?} valid={}",
            field.component(1).unwrap_or_default(),
            field.component(2),
            field.component_as_decimal(3),
            field.is_valid()
        );
    }
    Ok(())
}
