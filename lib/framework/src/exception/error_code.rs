pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const HTTP_REQUEST_FAILED: &str = "HTTP_REQUEST_FAILED";
