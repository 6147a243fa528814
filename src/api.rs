use crate::errors::ApiError;
use crate::models::{Credentials, Query, Record, TokenResponse};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// The remote auth and data endpoints.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn request_token(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError>;

    async fn fetch_records(&self, token: &str, query: &Query) -> Result<Vec<Record>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn request_token(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/token"))
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;
        decode(response).await
    }

    async fn fetch_records(&self, token: &str, query: &Query) -> Result<Vec<Record>, ApiError> {
        let response = self
            .client
            .get(self.url("/users/"))
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
