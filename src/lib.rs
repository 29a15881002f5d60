pub mod app;
pub mod config;
pub mod controller;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod render;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
