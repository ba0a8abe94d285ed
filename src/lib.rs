pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod service;
pub mod state;
pub mod store;

pub use router::app_router;
pub use state::AppState;
