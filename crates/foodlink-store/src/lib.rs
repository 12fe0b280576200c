//! # Foodlink Store
//!
//! 記憶體儲存庫：以明確的查詢與整列更新取代 ORM 的延遲載入

pub mod memory;

// Re-export 主要類型
pub use memory::MemoryStore;
