use mongodb::{
    bson::{self, doc, Document},
    options::{FindOneOptions, FindOptions},
};
use serde::{Deserialize, Serialize};

use super::{empty_as_none, non_empty, FieldErrors, Validate};

/// Fields returned by `GET /allFoodItems/:id` (plus `_id`)
pub const DETAIL_FIELDS: &[&str] = &[
    "foodName",
    "foodImageUrl",
    "foodCategory",
    "price",
    "userName",
    "description",
    "foodOrigin",
    "quantity",
    "email",
    "purchaseCount",
];

/// Body of `POST /allFoodItems`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFoodItem {
    pub food_name: String,
    pub food_image_url: String,
    pub food_category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_origin: Option<String>,
    pub quantity: i64,
    pub email: String,
}

impl NewFoodItem {
    /// Stored shape: the payload plus a zeroed purchase counter
    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        let mut doc = bson::to_document(self)?;
        doc.insert("purchaseCount", 0_i32);
        Ok(doc)
    }
}

impl Validate for NewFoodItem {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        errors.require("foodName", &self.food_name);
        errors.require("foodImageUrl", &self.food_image_url);
        errors.require("foodCategory", &self.food_category);
        errors.non_negative("price", self.price);
        if self.quantity < 0 {
            errors.add("quantity", "Must be a non-negative number");
        }
        errors.require_email("email", &self.email);
        errors.into_result()
    }
}

/// Body of `PUT /allFoodItems/:id`. Only the fields present are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_origin: Option<String>,
}

impl FoodItemUpdate {
    pub fn set_document(&self) -> Result<Document, bson::ser::Error> {
        Ok(doc! { "$set": bson::to_document(self)? })
    }

    fn is_empty(&self) -> bool {
        self.food_name.is_none()
            && self.food_image_url.is_none()
            && self.food_category.is_none()
            && self.price.is_none()
            && self.user_name.is_none()
            && self.description.is_none()
            && self.food_origin.is_none()
    }
}

impl Validate for FoodItemUpdate {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.is_empty() {
            errors.add("body", "At least one field must be provided");
        }
        if let Some(name) = &self.food_name {
            errors.require("foodName", name);
        }
        if let Some(url) = &self.food_image_url {
            errors.require("foodImageUrl", url);
        }
        if let Some(category) = &self.food_category {
            errors.require("foodCategory", category);
        }
        if let Some(price) = self.price {
            errors.non_negative("price", price);
        }
        errors.into_result()
    }
}

/// Query string of `GET /allFoodItems`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodItemListQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<u64>,
    pub sort: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max: Option<f64>,
}

impl FoodItemListQuery {
    pub fn filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(email) = non_empty(&self.email) {
            filter.insert("email", email);
        }

        let mut price = Document::new();
        if let Some(min) = self.min {
            price.insert("$gte", min);
        }
        if let Some(max) = self.max {
            price.insert("$lte", max);
        }
        if !price.is_empty() {
            filter.insert("price", price);
        }

        filter
    }

    /// Price ordering plus skip/limit paging. A missing or zero `size`
    /// returns everything, matching the driver's `limit(0)`.
    pub fn find_options(&self, max_page_size: u64) -> FindOptions {
        let direction = if self.sort.as_deref() == Some("asc") { 1 } else { -1 };

        let mut options = FindOptions::default();
        options.sort = Some(doc! { "price": direction });

        if let Some(size) = self.size.filter(|s| *s > 0) {
            let size = size.min(max_page_size.max(1));
            options.skip = Some(self.page.unwrap_or(0).saturating_mul(size));
            options.limit = Some(i64::try_from(size).unwrap_or(i64::MAX));
        }

        options
    }
}

pub fn by_id_filter(id: bson::oid::ObjectId) -> Document {
    doc! { "_id": id }
}

pub fn detail_options() -> FindOneOptions {
    let mut projection = Document::new();
    for field in DETAIL_FIELDS {
        projection.insert(*field, 1);
    }

    let mut options = FindOneOptions::default();
    options.projection = Some(projection);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;

    fn item_json() -> &'static str {
        r#"{
            "foodName": "Pad Thai",
            "foodImageUrl": "https://img.example.com/pad-thai.png",
            "foodCategory": "Noodles",
            "price": 9.5,
            "userName": "Chef Ana",
            "description": "Classic",
            "foodOrigin": "Thailand",
            "quantity": 12,
            "email": "ana@example.com",
            "purchaseCount": 99
        }"#
    }

    #[test]
    fn new_item_starts_with_zero_purchases() {
        let item: NewFoodItem = serde_json::from_str(item_json()).unwrap();
        assert!(item.validate().is_ok());

        let doc = item.to_document().unwrap();
        assert_eq!(doc.get_i32("purchaseCount").unwrap(), 0);
        assert_eq!(doc.get_str("foodName").unwrap(), "Pad Thai");
        assert_eq!(doc.get_i64("quantity").unwrap(), 12);
    }

    #[test]
    fn absent_optional_fields_are_not_stored() {
        let item: NewFoodItem = serde_json::from_value(serde_json::json!({
            "foodName": "Pad Thai",
            "foodImageUrl": "https://img.example.com/pad-thai.png",
            "foodCategory": "Noodles",
            "price": 9.5,
            "quantity": 12,
            "email": "ana@example.com"
        }))
        .unwrap();
        assert!(item.validate().is_ok());

        let doc = item.to_document().unwrap();
        assert!(!doc.contains_key("userName"));
        assert!(!doc.contains_key("description"));
        assert!(!doc.contains_key("foodOrigin"));
        assert_eq!(doc.get_i32("purchaseCount").unwrap(), 0);
    }

    #[test]
    fn invalid_item_reports_each_field() {
        let item = NewFoodItem {
            food_name: String::new(),
            food_image_url: "x".to_string(),
            food_category: "y".to_string(),
            price: -3.0,
            user_name: None,
            description: None,
            food_origin: None,
            quantity: -1,
            email: "nope".to_string(),
        };
        let errors = item.validate().unwrap_err();
        assert!(errors.get("foodName").is_some());
        assert!(errors.get("price").is_some());
        assert!(errors.get("quantity").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("foodCategory").is_none());
    }

    #[test]
    fn update_sets_only_present_fields() {
        let update: FoodItemUpdate =
            serde_json::from_str(r#"{"price": 11.0, "description": "Spicier", "quantity": 4}"#).unwrap();
        assert!(update.validate().is_ok());
        assert_eq!(
            update.set_document().unwrap(),
            doc! { "$set": { "price": 11.0, "description": "Spicier" } }
        );
    }

    #[test]
    fn empty_update_is_rejected() {
        let update: FoodItemUpdate = serde_json::from_str("{}").unwrap();
        let errors = update.validate().unwrap_err();
        assert!(errors.get("body").is_some());
    }

    #[test]
    fn list_filter_combines_owner_and_price_range() {
        let query = FoodItemListQuery {
            email: Some("ana@example.com".to_string()),
            min: Some(5.0),
            max: Some(20.0),
            ..Default::default()
        };
        assert_eq!(
            query.filter(),
            doc! { "email": "ana@example.com", "price": { "$gte": 5.0, "$lte": 20.0 } }
        );
    }

    #[test]
    fn blank_email_does_not_filter() {
        let query = FoodItemListQuery {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(query.filter().is_empty());
    }

    #[test]
    fn paging_skips_page_times_size() {
        let query = FoodItemListQuery {
            page: Some(3),
            size: Some(10),
            sort: Some("asc".to_string()),
            ..Default::default()
        };
        let options = query.find_options(100);
        assert_eq!(options.sort, Some(doc! { "price": 1 }));
        assert_eq!(options.skip, Some(30));
        assert_eq!(options.limit, Some(10));
    }

    #[test]
    fn sort_defaults_to_descending_and_size_is_capped() {
        let query = FoodItemListQuery {
            page: Some(1),
            size: Some(500),
            sort: Some("whatever".to_string()),
            ..Default::default()
        };
        let options = query.find_options(50);
        assert_eq!(options.sort, Some(doc! { "price": -1 }));
        assert_eq!(options.limit, Some(50));
        assert_eq!(options.skip, Some(50));
    }

    #[test]
    fn empty_numeric_params_read_as_absent() {
        let uri: axum::http::Uri = "/allFoodItems?page=0&size=10&sort=asc&min=&max=".parse().unwrap();
        let Query(query) = Query::<FoodItemListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.page, Some(0));
        assert_eq!(query.size, Some(10));
        assert_eq!(query.min, None);
        assert_eq!(query.max, None);
        assert!(query.filter().is_empty());

        let uri: axum::http::Uri = "/allFoodItems?page=&size=&min=2.5".parse().unwrap();
        let Query(query) = Query::<FoodItemListQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.page, None);
        assert_eq!(query.size, None);
        assert_eq!(query.filter(), doc! { "price": { "$gte": 2.5 } });
    }

    #[test]
    fn non_numeric_params_are_still_rejected() {
        let uri: axum::http::Uri = "/allFoodItems?min=cheap".parse().unwrap();
        assert!(Query::<FoodItemListQuery>::try_from_uri(&uri).is_err());
    }

    #[test]
    fn missing_size_disables_paging() {
        let options = FoodItemListQuery::default().find_options(100);
        assert_eq!(options.skip, None);
        assert_eq!(options.limit, None);
    }

    #[test]
    fn detail_projection_lists_allowed_fields() {
        let projection = detail_options().projection.unwrap();
        assert_eq!(projection.len(), DETAIL_FIELDS.len());
        assert_eq!(projection.get_i32("purchaseCount").unwrap(), 1);
        assert!(projection.get("_id").is_none());
    }
}
