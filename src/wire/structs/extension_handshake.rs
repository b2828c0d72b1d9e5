use std::collections::BTreeMap;

/// Extension handshake payload.
///
/// `extensions` is the `m` dictionary: extension name to the message id the
/// sender wants to receive that extension on. An id of 0 means disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionHandshake {
    pub extensions: BTreeMap<String, u8>,
    pub metadata_size: Option<u32>,
    pub client: Option<String>,
}
