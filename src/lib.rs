pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod state;
pub mod store;

pub use app::router;
pub use config::AppConfig;
pub use error::ApiError;
pub use state::AppState;
