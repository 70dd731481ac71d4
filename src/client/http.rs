//! [`ClothesBackend`] over the wardrobe JSON API.

use reqwest::{Client, Response, Url, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::client::backend::ClothesBackend;
use crate::client::error::BackendError;
use crate::domain::clothing::{Clothing, NewClothing, UpdateClothing};
use crate::domain::types::ClothingId;

/// Where to reach the wardrobe API.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `http://127.0.0.1:3030/api`.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3030/api".to_string(),
        }
    }
}

pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
    base: Url,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self, BackendError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(config.base_url));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Ok(Self {
            client,
            config,
            base,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn clothes_url(&self) -> Url {
        self.endpoint(&["clothes"])
    }

    /// Ids are opaque, so they are percent-encoded as a single path segment.
    fn clothing_url(&self, id: &ClothingId) -> Url {
        self.endpoint(&["clothes", id.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejects bases that cannot carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn network_error(err: reqwest::Error) -> BackendError {
    BackendError::Network(err.to_string())
}

/// Turns a non-2xx response into [`BackendError::RequestFailed`].
async fn ensure_success(resp: Response) -> Result<Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp.text().await.unwrap_or_default();
    Err(BackendError::RequestFailed {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
    let resp = ensure_success(resp).await?;
    resp.json()
        .await
        .map_err(|e| BackendError::InvalidResponse(e.to_string()))
}

impl ClothesBackend for HttpBackend {
    async fn list_clothes(&self) -> Result<Vec<Clothing>, BackendError> {
        let resp = self
            .client
            .get(self.clothes_url())
            .send()
            .await
            .map_err(network_error)?;
        decode(resp).await
    }

    async fn create_clothing(&self, new_clothing: &NewClothing) -> Result<Clothing, BackendError> {
        let resp = self
            .client
            .post(self.clothes_url())
            .header(header::CONTENT_TYPE, "application/json")
            .json(new_clothing)
            .send()
            .await
            .map_err(network_error)?;
        decode(resp).await
    }

    async fn update_clothing(
        &self,
        id: &ClothingId,
        updates: &UpdateClothing,
    ) -> Result<Clothing, BackendError> {
        let resp = self
            .client
            .put(self.clothing_url(id))
            .header(header::CONTENT_TYPE, "application/json")
            .json(updates)
            .send()
            .await
            .map_err(network_error)?;
        decode(resp).await
    }

    async fn delete_clothing(&self, id: &ClothingId) -> Result<(), BackendError> {
        let resp = self
            .client
            .delete(self.clothing_url(id))
            .send()
            .await
            .map_err(network_error)?;
        ensure_success(resp).await?;
        Ok(())
    }
}
