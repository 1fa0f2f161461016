#![forbid(unsafe_code)]

pub mod dashboard_service;
pub mod error;
pub mod progress_service;

pub use dashboard_service::{DashboardService, DashboardView};
pub use error::{DashboardError, ProgressError};
pub use progress_service::ProgressService;
