use crate::app::Route;
use crate::data::{DataView, Notice, SubmitOutcome};
use crate::errors::AppError;
use crate::login::LoginOutcome;
use crate::models::{Credentials, DataForm};
use crate::rows::{to_csv, CSV_FILENAME};
use crate::state::AppState;
use crate::ui::{render_data, render_login};
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub notice: Option<Notice>,
}

pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Html<String> {
    Html(render_login(query.notice.map(Notice::message), ""))
}

pub async fn login(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Response {
    match state.login.login(&credentials).await {
        LoginOutcome::Navigate(route) => {
            state.data.reset().await;
            Redirect::to(route.path()).into_response()
        }
        LoginOutcome::Alert(alert) => {
            Html(render_login(Some(alert), &credentials.username)).into_response()
        }
    }
}

pub async fn data_page(State(state): State<AppState>) -> Response {
    if !state.has_session().await {
        return Redirect::to(Route::Login.path()).into_response();
    }
    Html(render_data(&state.data.view().await)).into_response()
}

pub async fn submit_data(
    State(state): State<AppState>,
    Form(form): Form<DataForm>,
) -> Redirect {
    match state.data.submit(&form).await {
        SubmitOutcome::Redirect { notice, to } => {
            Redirect::to(&format!("{}?notice={}", to.path(), notice.as_str()))
        }
        SubmitOutcome::Applied(_) | SubmitOutcome::Superseded => Redirect::to(Route::Data.path()),
    }
}

pub async fn export_csv(State(state): State<AppState>) -> Response {
    if !state.has_session().await {
        return Redirect::to(Route::Login.path()).into_response();
    }
    let body = to_csv(&state.data.rows().await);
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        body,
    )
        .into_response()
}

pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.data.logout().await;
    Redirect::to(Route::Login.path())
}

pub async fn get_data(State(state): State<AppState>) -> Result<Json<DataView>, AppError> {
    if !state.has_session().await {
        return Err(AppError::unauthorized("not logged in"));
    }
    Ok(Json(state.data.view().await))
}
