pub mod app;
pub mod card;
pub mod client;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod stats;
pub mod storage;

pub use app::run;
pub use client::GithubClient;
pub use config::Config;
pub use errors::{AppError, Result};
