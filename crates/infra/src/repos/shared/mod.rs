pub mod inmemory_repo;

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteResult {
    pub deleted_count: i64,
}
