/// Errors raised while resolving an identifier.
pub mod parse_error;
