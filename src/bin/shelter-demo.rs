//! Demo consumer: opens the store from env config, subscribes to change
//! events, seeds one sample pet, and lists the collection.

use serde_json::json;
use shelter_store::{contract, FieldSet, Pet, PetProvider, StoreConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("shelter_store=debug".parse()?),
        )
        .init();

    let config = StoreConfig::from_env();
    tracing::info!(path = %config.database_path.display(), "opening store");
    let provider = PetProvider::open(&config).await?;

    let subscription = provider.subscribe(Box::new(|event| {
        tracing::info!(uri = %event.uri, kind = ?event.kind, "change event");
    }));

    let fields = FieldSet::from([
        (contract::COL_NAME.to_string(), json!("Some Pet")),
        (contract::COL_BREED.to_string(), json!("Some Breed")),
        (contract::COL_GENDER.to_string(), json!(0)),
        (contract::COL_WEIGHT.to_string(), json!(0)),
    ]);
    let new_uri = provider.insert(&contract::collection_uri(), &fields).await?;
    println!("inserted {}", new_uri);

    let rows = provider
        .query(
            &contract::collection_uri(),
            None,
            None,
            &[],
            Some(contract::COL_NAME),
        )?
        .collect_rows()
        .await?;
    let count = rows.len();
    for row in rows {
        let pet = Pet::from_row(row)?;
        println!("{} ({:?}): {:?}, {} kg", pet.name, pet.gender(), pet.breed, pet.weight);
    }
    println!("{} pets in the shelter", count);

    provider.unsubscribe(subscription);
    Ok(())
}
