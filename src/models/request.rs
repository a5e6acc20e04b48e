use std::collections::HashMap;

use actix_web::http::Method;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    crop::Crop,
    garden::{Garden, GardenPreview},
    user::PublicUser,
};

/// Serde adapter for `actix_web::http::Method` (serialises as its uppercase string).
mod method_serde {
    use actix_web::http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let s = String::deserialize(d)?;
        Method::from_bytes(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// A single HAL-style hyperlink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
    #[serde(with = "method_serde")]
    #[schema(value_type = String, example = "GET")]
    pub method: Method,
}

/// Map of relation name → link, serialised as the `_links` field in responses.
pub type Links = HashMap<String, Link>;

/// Helper to build a `Link` from an href and an HTTP method.
pub fn link(href: impl Into<String>, method: Method) -> Link {
    Link {
        href: href.into(),
        method,
    }
}

/// Builds a `Links` map from `(relation, link)` pairs.
pub fn links<const N: usize>(pairs: [(&str, Link); N]) -> Links {
    pairs
        .into_iter()
        .map(|(rel, l)| (rel.to_string(), l))
        .collect()
}

/// Pagination metadata included in responses that return lists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Metadata for a list returned in one page.
    pub fn single_page(total: usize) -> Self {
        Self {
            page: 1,
            per_page: total,
            total,
            total_pages: 1,
        }
    }
}

/// Generic single-item response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    CropApiResponse = ApiResponse<Crop>,
    GardenApiResponse = ApiResponse<Garden>,
    PublicUserApiResponse = ApiResponse<PublicUser>,
    ReloadApiResponse = ApiResponse<ReloadSummary>
)]
pub struct ApiResponse<T> {
    pub payload: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl<T> ApiResponse<T> {
    pub fn new(payload: T, links: Links) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
        }
    }
}

/// Generic paginated list response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    CropListResponse = PaginatedResponse<Crop>,
    GardenListResponse = PaginatedResponse<Garden>,
    GardenPreviewListResponse = PaginatedResponse<GardenPreview>
)]
pub struct PaginatedResponse<T> {
    pub payload: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    #[schema(value_type = Object)]
    pub links: Links,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    /// Wraps a complete list as a single page.
    pub fn single_page(payload: Vec<T>, links: Links) -> Self {
        let pagination = Pagination::single_page(payload.len());
        Self {
            payload,
            errors: vec![],
            links,
            pagination,
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Result of an explicit catalog reload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReloadSummary {
    pub crops: usize,
}
