use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

/// Screens the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Data,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Data => "/data",
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(Route::Login.path(), get(handlers::login_page))
        .route("/login", post(handlers::login))
        .route(Route::Data.path(), get(handlers::data_page).post(handlers::submit_data))
        .route("/data.csv", get(handlers::export_csv))
        .route("/logout", post(handlers::logout))
        .route("/api/data", get(handlers::get_data))
        .with_state(state)
}
