//! Read-only client for the Lighthouse `/api/v1` endpoints.

use async_trait::async_trait;
use lbp_presence_store::{LiveStatus, Player, Slot};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

const USER_AGENT: &str = concat!("lbp-presence/", env!("CARGO_PKG_VERSION"));

/// The three lookups the resolvers need from the server.
#[async_trait]
pub trait LighthouseApi: Send + Sync {
    /// `GET /api/v1/username/{name}`
    async fn player(&self, name: &str) -> Result<Player, ApiError>;

    /// `GET /api/v1/user/{id}/status`
    async fn status(&self, user_id: i64) -> Result<LiveStatus, ApiError>;

    /// `GET /api/v1/slot/{id}`
    async fn slot(&self, slot_id: i64) -> Result<Slot, ApiError>;
}

/// JSON-over-HTTP implementation backed by a shared reqwest client.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// `server_url` is the instance root, e.g. `https://lighthouse.lbpunion.com`.
    pub fn new(server_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: format!("{}/api/v1", server_url.trim_end_matches('/')),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "GET");

        let to_unreachable = |err: reqwest::Error| ApiError::Unreachable {
            url: url.clone(),
            reason: err.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(to_unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(to_unreachable)?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode {
            url,
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl LighthouseApi for HttpApi {
    async fn player(&self, name: &str) -> Result<Player, ApiError> {
        self.get_json(&format!("username/{name}")).await
    }

    async fn status(&self, user_id: i64) -> Result<LiveStatus, ApiError> {
        self.get_json(&format!("user/{user_id}/status")).await
    }

    async fn slot(&self, slot_id: i64) -> Result<Slot, ApiError> {
        self.get_json(&format!("slot/{slot_id}")).await
    }
}
