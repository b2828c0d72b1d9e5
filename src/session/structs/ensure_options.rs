use crate::session::enums::session_role::SessionRole;

#[derive(Debug, Clone, Default)]
pub struct EnsureOptions {
    pub role: SessionRole,
    /// Raw info dictionary, when the caller already has it.
    pub metadata: Option<Vec<u8>>,
}
