//! The backend as a storefront store.

use crate::{ApiClient, FetchError};
use async_trait::async_trait;
use priceflow_commerce::catalog::Product;
use priceflow_commerce::checkout::OrderDraft;
use priceflow_commerce::discount::Discount;
use priceflow_commerce::storefront::{OrderReceipt, StorefrontStore};
use priceflow_commerce::wishlist::WishlistEntry;
use priceflow_commerce::{CommerceError, ProductId};
use serde::de::DeserializeOwned;
use serde_json::Value;

const PRODUCTS: &str = "/products";
const ACTIVE_DISCOUNTS: &str = "/discounts/active";
const WISHLIST: &str = "/users/wishlist";
const ORDERS: &str = "/orders";

/// [`StorefrontStore`] over the request pipeline.
#[derive(Debug, Clone)]
pub struct HttpStorefront {
    client: ApiClient,
}

impl HttpStorefront {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn list<T: DeserializeOwned>(&self, path: &str, key: &str) -> Result<Vec<T>, FetchError> {
        let body: Value = self.client.get(path).send_json().await?;
        unwrap_list(body, key)?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|e| FetchError::Parse(e.to_string())))
            .collect()
    }
}

#[async_trait]
impl StorefrontStore for HttpStorefront {
    async fn products(&self) -> Result<Vec<Product>, CommerceError> {
        Ok(self.list(PRODUCTS, "products").await?)
    }

    async fn active_discounts(&self) -> Result<Vec<Discount>, CommerceError> {
        Ok(self.list(ACTIVE_DISCOUNTS, "discounts").await?)
    }

    async fn wishlist(&self) -> Result<Vec<ProductId>, CommerceError> {
        let entries: Vec<WishlistEntry> = self.list(WISHLIST, "wishlist").await?;
        Ok(entries.into_iter().map(WishlistEntry::into_id).collect())
    }

    async fn add_to_wishlist(&self, product_id: &ProductId) -> Result<(), CommerceError> {
        self.client
            .post(&wishlist_item(product_id))
            .send()
            .await?;
        Ok(())
    }

    async fn remove_from_wishlist(&self, product_id: &ProductId) -> Result<(), CommerceError> {
        self.client
            .delete(&wishlist_item(product_id))
            .send()
            .await?;
        Ok(())
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderReceipt, CommerceError> {
        let body: Value = self
            .client
            .post(ORDERS)
            .json(draft)?
            .send_json()
            .await?;
        Ok(serde_json::from_value(unwrap_record(body, "order"))?)
    }
}

/// `/users/wishlist/{id}` with the id as a single encoded segment.
fn wishlist_item(product_id: &ProductId) -> String {
    format!("{}/{}", WISHLIST, urlencoding::encode(product_id.as_str()))
}

/// Pull a list out of a bare array or a `{"data": ...}`/`{key: ...}` envelope.
fn unwrap_list(body: Value, key: &str) -> Result<Vec<Value>, FetchError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            for field in ["data", key] {
                match map.remove(field) {
                    Some(Value::Array(items)) => return Ok(items),
                    Some(inner @ Value::Object(_)) => return unwrap_list(inner, key),
                    _ => {}
                }
            }
            Err(FetchError::Parse(format!(
                "expected a list or an object with `data` or `{}`",
                key
            )))
        }
        _ => Err(FetchError::Parse("expected a list".to_string())),
    }
}

/// Pull a single record out of an optional `data`/`{key}` envelope.
fn unwrap_record(body: Value, key: &str) -> Value {
    match body {
        Value::Object(mut map) => {
            for field in ["data", key] {
                if let Some(inner @ Value::Object(_)) = map.remove(field) {
                    return unwrap_record(inner, key);
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}
