// core/examples/catalog_sync.rs

//! End-to-end wiring against live services: environment → config → HTTP
//! clients → pipeline. Requires SOKONI_STORE_URL, SOKONI_UPLOAD_URL and
//! SOKONI_UPLOAD_PRESET (a .env file works).

use sokoni::{CatalogConfig, CatalogPipeline, ListingFields};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  info!("--- Catalog Sync Example ---");

  // 1. Load endpoints and wire the production clients.
  let config = CatalogConfig::from_env()?;
  let pipeline = CatalogPipeline::from_config(&config);

  // 2. Create a listing without an image.
  let fields = ListingFields {
    name: Some("Chair".to_string()),
    category: Some("furniture".to_string()),
    price: Some("1500".to_string()),
    description: Some("Solid oak".to_string()),
    stock_quantity: Some("4".to_string()),
    seller_phone: Some("+254700000000".to_string()),
    image_url: None,
  };
  let id = pipeline.create(fields, None).await?;
  info!(%id, "Created listing.");

  // 3. Refresh the catalog and show what the UI would render.
  let listings = pipeline.list().await?;
  info!(count = listings.len(), "Catalog fetched.");
  for listing in &listings {
    info!(
      id = %listing.id,
      name = listing.fields.name.as_deref().unwrap_or("-"),
      price = listing.fields.price.as_deref().unwrap_or("-"),
      "entry"
    );
  }

  // 4. Re-price it: merge unchanged fields from the current record.
  let mut fields = pipeline.fetch(&id).await?.fields;
  fields.price = Some("1400".to_string());
  pipeline.update(&id, fields, None).await?;
  info!(%id, "Updated listing.");

  // 5. Clean up. The cache entry goes with the document.
  pipeline.delete(&id).await?;
  info!(%id, cached = pipeline.cache().len(), "Deleted listing.");

  Ok(())
}
