use crate::catalog::structs::catalog_record::CatalogRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum PendingWrite {
    Upsert(Box<CatalogRecord>),
    Remove,
}
