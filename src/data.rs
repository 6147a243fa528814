//! Data screen state machine.
//!
//! Each submit takes a new generation number. A response is applied only while
//! its generation is still current, so a superseded request or one that was
//! pending across a logout can never overwrite what the user sees.

use crate::api::ApiClient;
use crate::app::Route;
use crate::config::TimeZoneMode;
use crate::errors::{ApiError, InputError};
use crate::models::{DataForm, Query, Record, Row};
use crate::rows::project;
use crate::session::SessionStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const SESSION_EXPIRED_ALERT: &str = "Session expired. Please log in again.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please check your inputs.";

/// Alert carried across a redirect to the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    SessionExpired,
}

impl Notice {
    pub fn as_str(self) -> &'static str {
        match self {
            Notice::SessionExpired => "session_expired",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::SessionExpired => SESSION_EXPIRED_ALERT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DataView {
    pub status: FetchStatus,
    pub error: Option<String>,
    pub form: DataForm,
    pub records: Vec<Record>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Applied(FetchStatus),
    /// A later submit or a logout took over before this response arrived.
    Superseded,
    Redirect { notice: Notice, to: Route },
}

#[derive(Default)]
struct Inner {
    generation: u64,
    view: DataView,
}

pub struct DataFlow {
    api: Arc<dyn ApiClient>,
    session: Arc<dyn SessionStore>,
    zone: TimeZoneMode,
    inner: Mutex<Inner>,
}

impl DataFlow {
    pub fn new(
        api: Arc<dyn ApiClient>,
        session: Arc<dyn SessionStore>,
        zone: TimeZoneMode,
    ) -> Self {
        Self {
            api,
            session,
            zone,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub async fn view(&self) -> DataView {
        self.inner.lock().await.view.clone()
    }

    pub async fn rows(&self) -> Vec<Row> {
        self.inner.lock().await.view.rows.clone()
    }

    pub async fn submit(&self, form: &DataForm) -> SubmitOutcome {
        // Token read and generation bump share the lock that logout clears under.
        let (token, generation) = {
            let mut inner = self.inner.lock().await;
            let Some(token) = self.session.get().await else {
                warn!("data request without a session, redirecting to login");
                return SubmitOutcome::Redirect {
                    notice: Notice::SessionExpired,
                    to: Route::Login,
                };
            };
            inner.generation += 1;
            inner.view.status = FetchStatus::Loading;
            inner.view.error = None;
            inner.view.form = form.clone();
            (token, inner.generation)
        };

        let result = match Query::from_form(form, self.zone) {
            Ok(query) => {
                debug!(?query, generation, "fetching records");
                self.api
                    .fetch_records(&token, &query)
                    .await
                    .map_err(FetchError::Api)
            }
            Err(err) => Err(FetchError::Input(err)),
        };

        self.finish(generation, result).await
    }

    async fn finish(
        &self,
        generation: u64,
        result: Result<Vec<Record>, FetchError>,
    ) -> SubmitOutcome {
        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!(
                generation,
                current = inner.generation,
                "discarding superseded response"
            );
            return SubmitOutcome::Superseded;
        }

        let view = &mut inner.view;
        match result {
            Ok(records) => {
                info!("retrieved {} records", records.len());
                view.rows = project(&records, self.zone);
                view.records = records;
                view.status = FetchStatus::Success;
            }
            Err(err) => {
                warn!("error fetching data: {err}");
                view.records.clear();
                view.rows.clear();
                view.error = Some(FETCH_FAILED_MESSAGE.to_string());
                view.status = FetchStatus::Failed;
            }
        }
        SubmitOutcome::Applied(view.status)
    }

    /// Starts the screen over; any pending response is dropped when it lands.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        Self::restart(&mut inner);
    }

    pub async fn logout(&self) {
        let mut inner = self.inner.lock().await;
        self.session.clear().await;
        Self::restart(&mut inner);
        info!("user logged out");
    }

    fn restart(inner: &mut Inner) {
        inner.generation += 1;
        inner.view = DataView::default();
    }
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error(transparent)]
    Api(ApiError),
    #[error(transparent)]
    Input(InputError),
}
