pub mod extract;
pub mod preflight;
pub mod request_log;

pub use extract::{JsonObject, QueryParams, ResourcePath};
pub use preflight::reject_bare_options;
pub use request_log::log_request;
