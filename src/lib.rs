pub mod alert_manager;
pub mod config;
pub mod models;
pub mod parser;
pub mod plugins;
pub mod scheduler;
pub mod scraper;
pub mod utils;

// Re-export commonly used types
pub use alert_manager::{AlertManager, PriceCheckResult};
pub use config::PipelineConfig;
pub use models::Listing;
pub use scheduler::{AlertScheduler, PeriodicTask};
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
