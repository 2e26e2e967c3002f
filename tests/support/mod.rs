#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;

use catalog_store::{
    Brand, CatalogApi, Category, ClientError, Product, ProductPage, ProductQuery, Tag, Vendor,
};

pub fn product(id: &str, name: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        ..Product::default()
    }
}

pub fn tagged_product(id: &str, name: &str, tags: &[&str]) -> Product {
    Product {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..product(id, name)
    }
}

pub fn tag(id: &str, title: &str) -> Tag {
    Tag {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
    }
}

pub fn brand(id: &str, name: &str) -> Brand {
    Brand {
        id: id.to_string(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
    }
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        parent_id: None,
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
    }
}

pub fn vendor(id: &str, name: &str) -> Vendor {
    Vendor {
        id: id.to_string(),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
    }
}

/// An API whose every operation fails at the transport level. Stands in
/// for an unreachable backend.
pub struct UnreachableApi;

impl UnreachableApi {
    fn refused<T>(&self) -> Result<T, ClientError> {
        Err(ClientError::Transport("connection refused".to_string()))
    }
}

#[async_trait]
impl CatalogApi for UnreachableApi {
    async fn brands(&self) -> Result<Vec<Brand>, ClientError> {
        self.refused()
    }

    async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.refused()
    }

    async fn vendors(&self) -> Result<Vec<Vendor>, ClientError> {
        self.refused()
    }

    async fn tags(&self) -> Result<Vec<Tag>, ClientError> {
        self.refused()
    }

    async fn products(&self, _query: &ProductQuery) -> Result<ProductPage, ClientError> {
        self.refused()
    }

    async fn create_product(&self) -> Result<Product, ClientError> {
        self.refused()
    }

    async fn update_product(&self, _id: &str, _product: &Product) -> Result<Product, ClientError> {
        self.refused()
    }

    async fn delete_product(&self, _id: &str) -> Result<bool, ClientError> {
        self.refused()
    }

    async fn create_tag(&self, _tag: &Tag) -> Result<Tag, ClientError> {
        self.refused()
    }

    async fn update_tag(&self, _id: &str, _tag: &Tag) -> Result<Tag, ClientError> {
        self.refused()
    }

    async fn delete_tag(&self, _id: &str) -> Result<bool, ClientError> {
        self.refused()
    }

    async fn dashboard(&self) -> Result<Value, ClientError> {
        self.refused()
    }
}
