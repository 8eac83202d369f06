// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID spans and the CORS layer applied to every route

pub mod cors;
pub mod tracing;

// CORS configuration
pub use self::cors::setup_cors;

// Request tracing
pub use self::tracing::{create_request_span, http_trace_layer, REQUEST_ID_HEADER};
