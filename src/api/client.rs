//! REST client implementing every backend seam over HTTP.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::core::backend::{CatalogBackend, FavoritesBackend, FetchedBlob, ResourceBackend};
use crate::core::catalog::{CatalogPage, FilterQuery};
use crate::core::error::{Result, TourdeskError};
use crate::core::gallery::{LocalBlob, RemoteUrl};

/// Multipart field carrying each uploaded image.
pub const IMAGES_FIELD: &str = "images";

/// Multipart field selecting append (`false`) or replace (`true`).
pub const REPLACE_FIELD: &str = "replaceExisting";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteCheckResponse {
    is_favorite: bool,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    images: Vec<RemoteUrl>,
}

#[derive(Debug, Serialize)]
struct ImageOrderRequest<'a> {
    images: &'a [RemoteUrl],
}

/// HTTP client for the storefront API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TourdeskError::Config(format!("Invalid endpoint {path}: {e}")))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self.authorize(self.client.get(url).query(query)).send().await?;
        let response = check_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| TourdeskError::Config(format!("Invalid base URL {raw}: {e}")))
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Map non-success statuses onto the error taxonomy.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if status == StatusCode::CONFLICT {
        warn!(body = %message, "Backend reported a conflict");
        return Err(TourdeskError::Conflict(message));
    }

    Err(TourdeskError::api(status.as_u16(), message))
}

/// Endpoint path and query string for a resolved filter query.
pub fn catalog_request(query: &FilterQuery) -> (&'static str, Vec<(&'static str, String)>) {
    let page = query.page();
    let mut params = Vec::new();
    let path = match query {
        FilterQuery::DateRange { from, to, .. } => {
            params.push(("startDate", from.format("%Y-%m-%d").to_string()));
            params.push(("endDate", to.format("%Y-%m-%d").to_string()));
            "tours/date-range"
        }
        FilterQuery::Period {
            min_days, max_days, ..
        } => {
            push_opt(&mut params, "minDays", min_days);
            push_opt(&mut params, "maxDays", max_days);
            "tours/period"
        }
        FilterQuery::PriceSegment {
            min_price,
            max_price,
            ..
        } => {
            push_opt(&mut params, "minPrice", min_price);
            push_opt(&mut params, "maxPrice", max_price);
            "tours/price-range"
        }
        FilterQuery::TextSearch { keyword, .. } => {
            params.push(("keyword", keyword.clone()));
            "tours/search"
        }
        FilterQuery::Listing { .. } => "tours",
    };
    params.push(("page", page.page.to_string()));
    params.push(("limit", page.limit.to_string()));
    (path, params)
}

fn push_opt<T: ToString>(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<T>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

#[async_trait]
impl CatalogBackend for ApiClient {
    async fn fetch_catalog(&self, query: &FilterQuery) -> Result<CatalogPage> {
        let (path, params) = catalog_request(query);
        self.get_json(path, &params).await
    }
}

#[async_trait]
impl FavoritesBackend for ApiClient {
    async fn check_favorite(&self, tour_id: &str) -> Result<bool> {
        let response: FavoriteCheckResponse = self
            .get_json(&format!("favorites/{tour_id}/check"), &[])
            .await?;
        Ok(response.is_favorite)
    }

    async fn add_favorite(&self, tour_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("favorites/{tour_id}"))?;
        let response = self.authorize(self.client.post(url)).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn remove_favorite(&self, tour_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("favorites/{tour_id}"))?;
        let response = self.authorize(self.client.delete(url)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ResourceBackend for ApiClient {
    async fn fetch_bytes(&self, locator: &RemoteUrl) -> Result<FetchedBlob> {
        // Relative locators are served by the API host.
        let url = match Url::parse(locator.as_str()) {
            Ok(absolute) => absolute,
            Err(_) => self.endpoint(locator.as_str())?,
        };
        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let bytes = response.bytes().await?;
        Ok(FetchedBlob {
            bytes,
            content_type,
        })
    }

    async fn upload_resources(
        &self,
        owner_id: &str,
        items: Vec<LocalBlob>,
        replace_existing: bool,
    ) -> Result<Vec<RemoteUrl>> {
        let url = self.endpoint(&format!("tours/{owner_id}/images"))?;

        let mut form = Form::new().text(REPLACE_FIELD, replace_existing.to_string());
        for blob in items {
            let part = Part::bytes(blob.bytes.to_vec())
                .file_name(blob.file_name.clone())
                .mime_str(&blob.content_type)
                .map_err(|e| {
                    TourdeskError::Validation(format!(
                        "Invalid content type {} for {}: {e}",
                        blob.content_type, blob.file_name
                    ))
                })?;
            form = form.part(IMAGES_FIELD, part);
        }

        let response = self
            .authorize(self.client.post(url).multipart(form))
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: ImagesResponse = serde_json::from_slice(&response.bytes().await?)?;
        Ok(body.images)
    }

    async fn update_order(&self, owner_id: &str, order: &[RemoteUrl]) -> Result<Vec<RemoteUrl>> {
        let url = self.endpoint(&format!("tours/{owner_id}/images/order"))?;
        let response = self
            .authorize(self.client.put(url).json(&ImageOrderRequest { images: order }))
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: ImagesResponse = serde_json::from_slice(&response.bytes().await?)?;
        Ok(body.images)
    }
}
