pub mod api;
pub mod app;
pub mod config;
pub mod data;
pub mod errors;
pub mod handlers;
pub mod login;
pub mod models;
pub mod rows;
pub mod session;
pub mod state;
pub mod time;
pub mod ui;

pub use app::{router, Route};
pub use config::Config;
pub use state::AppState;
