//! Field Tour Example
//!
//! Parses a customer transfer, reads components by label, builds a field from
//! components and validates a broken one.

use anyhow::Context;
use ironswift_core::Tag;
use ironswift_dictionary::Registry;
use ironswift_example::sample_transfer;
use ironswift_field::{Field32A, Field50F, Field59, FieldLookup};
use tracing::{info, warn};

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
    let tags = sample_transfer()?;
    let registry = Registry::standard();
    info!("Standard registry holds {} field types", registry.len());

    for tag in &tags {
        let field = registry.parse_tag(tag)?;
        info!("{} -> {}", tag.name(), serde_json::to_string(&field)?);
    }

    let amount = Field32A::get_first(&tags).context("no 32A in transfer")?;
    info!(
        "Value date {:?}, {} {:?}",
        amount.value_date(),
        amount.currency().unwrap_or_default(),
        amount.amount_decimal()
    );

    let ordering = Field50F::get_first(&tags).context("no 50F in transfer")?;
    info!("Party identifier {:?}", ordering.party_identifier());

    let mut beneficiary = Field59::new()?;
    beneficiary.set_name_and_address("ACME CORP")?;
    beneficiary.set_name_and_address_2("LONDON")?;
    info!("Built {}", beneficiary.to_tag());

    let broken = Tag::new("32A", "091315EU1100,")?;
    let outcome = Field32A::from_tag(&broken)?;
    for failure in outcome.validate().failures() {
        warn!("{}", failure);
    }
    Ok(())
}
