use crate::api::ApiClient;
use crate::app::Route;
use crate::models::Credentials;
use crate::session::SessionStore;
use std::sync::Arc;
use tracing::{info, warn};

pub const NO_TOKEN_ALERT: &str = "Login failed: No access token received.";
pub const LOGIN_FAILED_ALERT: &str = "Login failed. Please check your username and password.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Navigate(Route),
    Alert(&'static str),
}

pub struct LoginFlow {
    api: Arc<dyn ApiClient>,
    session: Arc<dyn SessionStore>,
}

impl LoginFlow {
    pub fn new(api: Arc<dyn ApiClient>, session: Arc<dyn SessionStore>) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, credentials: &Credentials) -> LoginOutcome {
        let response = match self.api.request_token(credentials).await {
            Ok(response) => response,
            Err(err) => {
                warn!("login failed for {}: {err}", credentials.username);
                return LoginOutcome::Alert(LOGIN_FAILED_ALERT);
            }
        };

        match response.token() {
            Some(token) => {
                self.session.set(token).await;
                info!("user {} logged in", credentials.username);
                LoginOutcome::Navigate(Route::Data)
            }
            None => {
                warn!("login response for {} carried no access token", credentials.username);
                LoginOutcome::Alert(NO_TOKEN_ALERT)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::models::{Query, Record, TokenResponse};
    use crate::session::MemorySessionStore;
    use async_trait::async_trait;

    enum Reply {
        Token(Option<&'static str>),
        Rejected,
    }

    struct ScriptedAuth(Reply);

    #[async_trait]
    impl ApiClient for ScriptedAuth {
        async fn request_token(&self, _: &Credentials) -> Result<TokenResponse, ApiError> {
            match self.0 {
                Reply::Token(token) => Ok(TokenResponse {
                    access_token: token.map(str::to_string),
                    token_type: Some("bearer".into()),
                }),
                Reply::Rejected => Err(ApiError::Status(reqwest::StatusCode::UNAUTHORIZED)),
            }
        }

        async fn fetch_records(&self, _: &str, _: &Query) -> Result<Vec<Record>, ApiError> {
            unreachable!("login never fetches records")
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "admin".into(),
            password: "secret".into(),
        }
    }

    fn flow(reply: Reply) -> (LoginFlow, Arc<MemorySessionStore>) {
        let session = Arc::new(MemorySessionStore::new());
        let flow = LoginFlow::new(Arc::new(ScriptedAuth(reply)), session.clone());
        (flow, session)
    }

    #[tokio::test]
    async fn persists_token_and_navigates_to_data() {
        let (flow, session) = flow(Reply::Token(Some("tok-1")));
        assert_eq!(
            flow.login(&credentials()).await,
            LoginOutcome::Navigate(Route::Data)
        );
        assert_eq!(session.get().await.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn missing_token_alerts_without_persisting() {
        for token in [None, Some("")] {
            let (flow, session) = flow(Reply::Token(token));
            assert_eq!(
                flow.login(&credentials()).await,
                LoginOutcome::Alert(NO_TOKEN_ALERT)
            );
            assert_eq!(session.get().await, None);
        }
    }

    #[tokio::test]
    async fn rejected_credentials_alert_and_keep_existing_session() {
        let session = Arc::new(MemorySessionStore::with_token("old"));
        let flow = LoginFlow::new(Arc::new(ScriptedAuth(Reply::Rejected)), session.clone());
        assert_eq!(
            flow.login(&credentials()).await,
            LoginOutcome::Alert(LOGIN_FAILED_ALERT)
        );
        assert_eq!(session.get().await.as_deref(), Some("old"));
    }
}
