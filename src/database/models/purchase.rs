use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

use super::{non_empty, FieldErrors, Validate};
use crate::database::document::parse_object_id;

/// Body of `POST /purchasedFood`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    /// Hex id of the purchased food item; not checked against the collection
    pub food_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buying_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl NewPurchase {
    /// Filter for the referenced food item, if `foodId` is a valid ObjectId
    pub fn food_item_filter(&self) -> Option<Document> {
        parse_object_id(&self.food_id)
            .ok()
            .map(|id| doc! { "_id": id })
    }
}

impl Validate for NewPurchase {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.require("foodId", &self.food_id);
        errors.require_email("email", &self.email);
        if let Some(price) = self.price {
            errors.non_negative("price", price);
        }
        if self.quantity.is_some_and(|q| q < 1) {
            errors.add("quantity", "Must be at least 1");
        }
        errors.into_result()
    }
}

pub fn increment_purchase_count() -> Document {
    doc! { "$inc": { "purchaseCount": 1 } }
}

/// Body of `PATCH /purchasedFood/:id`. Status is free-form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

impl StatusUpdate {
    pub fn set_document(&self) -> Document {
        doc! { "$set": { "status": self.status.as_str() } }
    }
}

impl Validate for StatusUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.require("status", &self.status);
        errors.into_result()
    }
}

/// Query string of `GET /purchasedFood`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseListQuery {
    pub email: Option<String>,
}

impl PurchaseListQuery {
    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn filter(&self) -> Document {
        match self.email() {
            Some(email) => doc! { "email": email },
            None => Document::new(),
        }
    }
}
