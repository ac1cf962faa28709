//! Generic CRUD access over one REST collection.
//!
//! # Responsibilities
//! - Bind to a base path (e.g. `/rounds`) under the versioned API root
//! - Expose `execute` as the single dispatch primitive
//! - Provide list / page / get / create / update / delete on top of it
//!
//! # Design Decisions
//! - Generic over the record type only; no knowledge of its fields
//! - No cache: every call goes to the network, invalidation is the caller's job
//! - Partial updates are sent as-is; the server owns merge semantics

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use url::Url;

use crate::config::ApiRoot;
use crate::error::ApiError;
use crate::http::{ApiResponse, Method, Page, Pipeline, QueryParams};

/// Integer identifier, unique within a collection.
pub type ResourceId = i64;

/// Client for one resource collection.
pub struct ResourceClient<T> {
    pipeline: Pipeline,
    base_path: String,
    collection: String,
    _resource: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            base_path: self.base_path.clone(),
            collection: self.collection.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("base_path", &self.base_path)
            .field("collection", &self.collection)
            .finish()
    }
}

impl<T: DeserializeOwned> ResourceClient<T> {
    pub fn new(root: &ApiRoot, pipeline: Pipeline, base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        let collection = root.versioned(&base_path);
        Self {
            pipeline,
            base_path,
            collection,
            _resource: PhantomData,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Absolute collection URL, e.g. `http://host/api/v1/rounds`.
    pub fn collection_url(&self) -> &str {
        &self.collection
    }

    /// Resolve a path relative to the collection. `""` and `"/"` mean the collection itself.
    pub fn url(&self, relative_path: &str, query: Option<&QueryParams>) -> Result<Url, ApiError> {
        let relative = relative_path.trim_start_matches('/');
        let raw = if relative.is_empty() {
            self.collection.clone()
        } else {
            format!("{}/{}", self.collection, relative)
        };

        let mut url = Url::parse(&raw).map_err(|e| ApiError::invalid_request(format!("invalid URL '{}': {}", raw, e)))?;
        if let Some(query) = query {
            query.apply(&mut url);
        }
        Ok(url)
    }

    /// Dispatch one call. GET/DELETE ignore `body`; POST/PUT send it (`None` = no payload).
    pub async fn execute(
        &self,
        method: Method,
        relative_path: &str,
        body: Option<Value>,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(relative_path, query)?;
        let request = method.prepare(url, body);
        self.pipeline.send(request).await
    }

    /// `execute` and decode the body as `R`.
    pub async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        relative_path: &str,
        body: Option<Value>,
        query: Option<&QueryParams>,
    ) -> Result<R, ApiError> {
        self.execute(method, relative_path, body, query).await?.decode()
    }

    /// All items from the collection; pagination metadata, if any, is dropped.
    pub async fn get_all(&self, query: Option<&QueryParams>) -> Result<Vec<T>, ApiError> {
        let response = self.execute(Method::Get, "", None, query).await?;
        Ok(response.decode_list::<T>()?.into_items())
    }

    /// The full paginated envelope. A bare array is a decode error.
    pub async fn get_all_paginated(&self, query: Option<&QueryParams>) -> Result<Page<T>, ApiError> {
        let response = self.execute(Method::Get, "", None, query).await?;
        response.decode_list::<T>()?.into_page().ok_or_else(|| ApiError::Decode {
            message: format!("Expected a paginated envelope from {}", self.base_path),
        })
    }

    pub async fn get_by_id(&self, id: ResourceId) -> Result<T, ApiError> {
        self.request(Method::Get, &id.to_string(), None, None).await
    }

    /// Create a record; the server's representation (with its id) is returned.
    pub async fn create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<T, ApiError> {
        let body = to_body(payload)?;
        self.request(Method::Post, "", Some(body), None).await
    }

    /// Partial update.
    pub async fn update<P: Serialize + ?Sized>(&self, id: ResourceId, payload: &P) -> Result<T, ApiError> {
        let body = to_body(payload)?;
        self.request(Method::Put, &id.to_string(), Some(body), None).await
    }

    pub async fn delete(&self, id: ResourceId) -> Result<(), ApiError> {
        self.execute(Method::Delete, &id.to_string(), None, None).await?;
        Ok(())
    }
}

pub(crate) fn to_body<P: Serialize + ?Sized>(payload: &P) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::invalid_request(format!("payload is not serializable: {}", e)))
}
