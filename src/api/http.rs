use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::api::{ApiError, ApiResult, ConnectionRepository};
use crate::config::ClientConfig;
use crate::models::ConnectionRecord;

/// Production repository over the DataChat HTTP API.
///
/// Every payload is wrapped in a `{"data": ..}` envelope by the backend.
/// This layer owns the request timeout; the workflow above it never retries.
pub struct HttpRepository {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ConnectionList {
    connections: Vec<ConnectionRecord>,
}

#[derive(Deserialize)]
struct ConnectionHolder {
    connection: ConnectionRecord,
}

#[derive(Serialize)]
struct ConnectIn<'a> {
    dsn: &'a str,
    name: &'a str,
    is_sample: bool,
}

impl HttpRepository {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(envelope.data)
    }

    async fn failure(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ApiError::Status {
            status,
            message: failure_message(&body),
        }
    }
}

/// Pull the `detail` field out of an error body when there is one.
fn failure_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|detail| detail.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait::async_trait]
impl ConnectionRepository for HttpRepository {
    async fn create_connection(
        &self,
        dsn: &str,
        name: &str,
        is_sample: bool,
    ) -> ApiResult<ConnectionRecord> {
        tracing::debug!(name, is_sample, "POST /connect");
        let response = self
            .http
            .post(self.url("/connect"))
            .json(&ConnectIn {
                dsn,
                name,
                is_sample,
            })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Self::decode::<ConnectionRecord>(response).await
    }

    async fn list_connections(&self) -> ApiResult<Vec<ConnectionRecord>> {
        let response = self
            .http
            .get(self.url("/connections"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let list = Self::decode::<ConnectionList>(response).await?;
        Ok(list.connections)
    }

    async fn get_connection(&self, id: Uuid) -> ApiResult<ConnectionRecord> {
        let response = self
            .http
            .get(self.url(&format!("/connection/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let holder = Self::decode::<ConnectionHolder>(response).await?;
        Ok(holder.connection)
    }

    async fn delete_connection(&self, id: Uuid) -> ApiResult<()> {
        tracing::debug!(%id, "DELETE /connection");
        let response = self
            .http
            .delete(self.url(&format!("/connection/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        Ok(())
    }
}
