/// Length-prefixed peer wire messages.
pub mod message;

/// `ut_metadata` message kinds.
pub mod metadata_message_type;

/// Codec errors.
pub mod wire_error;
