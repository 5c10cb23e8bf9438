//! REST API implementation
//!
//! - types: Request/response type definitions
//! - extractors: JSON and CSV upload extractors
//! - handlers: API endpoint handlers
//! - router: Router creation and configuration

mod extractors;
mod handlers;
mod router;
pub mod types;

// Re-export public API
pub use extractors::{CsvUpload, JsonExtractor};
pub use router::{create_router, create_router_with_limit, DEFAULT_UPLOAD_LIMIT};
pub use types::{
    AppState, FeatureImportanceResponse, HealthResponse, LoadModelResponse, ServiceDescriptor,
    TrainResponse,
};
