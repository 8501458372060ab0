pub mod memory_record_store;
pub mod postgres_record_store;

pub use memory_record_store::MemoryRecordStore;
pub use postgres_record_store::PostgresRecordStore;
