/// Plain message error used during boot.
pub mod custom_error;
