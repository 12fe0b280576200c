//! # Foodlink Core
//!
//! 核心資料模型與類型定義

pub mod allocation;
pub mod config;
pub mod donation;
pub mod food_type;
pub mod ids;
pub mod order;
pub mod party;
pub mod recurrence;
pub mod request;

// Re-export 主要類型
pub use allocation::Allocation;
pub use config::SchedulerConfig;
pub use donation::{Donation, DonationItem, DonationItemDraft, DonationStatus};
pub use food_type::FoodType;
pub use ids::{
    AllocationId, DonationId, DonationItemId, ManufacturerId, OrderId, PantryId, RequestId,
};
pub use order::{Order, OrderStatus};
pub use party::{Manufacturer, Pantry};
pub use recurrence::{Recurrence, RecurrenceInterval};
pub use request::{FoodRequest, RequestedSize};

/// 平台錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum FoodlinkError {
    #[error("找不到{entity}: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("無效參數: {0}")]
    InvalidArgument(String),

    #[error("庫存不足：需要 {requested}, 可用 {available}")]
    InsufficientInventory { requested: u32, available: u32 },

    #[error("違反約束: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, FoodlinkError>;
