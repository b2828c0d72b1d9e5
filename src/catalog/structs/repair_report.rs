use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub upserted: usize,
    pub removed: usize,
}
