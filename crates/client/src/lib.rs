mod client;
mod dashboard;
mod error;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use dashboard::{Dashboard, load_dashboard};
pub use error::{ClientError, Result};
