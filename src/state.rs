use crate::api::ApiClient;
use crate::config::TimeZoneMode;
use crate::data::DataFlow;
use crate::login::LoginFlow;
use crate::session::SessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<dyn SessionStore>,
    pub login: Arc<LoginFlow>,
    pub data: Arc<DataFlow>,
}

impl AppState {
    pub fn new(
        api: Arc<dyn ApiClient>,
        session: Arc<dyn SessionStore>,
        zone: TimeZoneMode,
    ) -> Self {
        Self {
            login: Arc::new(LoginFlow::new(api.clone(), session.clone())),
            data: Arc::new(DataFlow::new(api, session.clone(), zone)),
            session,
        }
    }

    pub async fn has_session(&self) -> bool {
        self.session.get().await.is_some()
    }
}
