// core/src/listing.rs

//! The catalog entity and its wire shape.

use serde::{Deserialize, Serialize};

/// Everything a listing carries besides its key.
///
/// All fields are optional from the pipeline's point of view; validation is
/// the UI collaborator's concern. `price` and `stock_quantity` are carried
/// as text and never parsed here. Serde renames pin the wire names the
/// store dialect fixes (`stock`, `phoneNumber`, `imageUrl`); an absent
/// value serializes as `null`, and both `null` and an omitted key read back
/// as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFields {
  pub name: Option<String>,
  pub category: Option<String>,
  pub price: Option<String>,
  pub description: Option<String>,
  #[serde(rename = "stock")]
  pub stock_quantity: Option<String>,
  #[serde(rename = "phoneNumber")]
  pub seller_phone: Option<String>,
  #[serde(rename = "imageUrl")]
  pub image_url: Option<String>,
}

/// One catalog entry: the store-assigned key plus the field set.
///
/// Serialized, this is the full document shape
/// `{id, name, category, price, description, stock, phoneNumber, imageUrl}`.
/// An `id` is only ever present on a listing that has been persisted at
/// least once; it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
  pub id: String,
  #[serde(flatten)]
  pub fields: ListingFields,
}

impl Listing {
  pub fn new(id: impl Into<String>, fields: ListingFields) -> Self {
    Self {
      id: id.into(),
      fields,
    }
  }
}
