/// Errors returned by the command surface.
pub mod api_error;
