//! # Foodlink Engine
//!
//! 媒合、庫存帳務、分配與訂單生命週期的核心操作

pub mod allocation;
pub mod ledger;
pub mod lifecycle;
pub mod matching;
pub mod scheduling;

// Re-export 主要類型
pub use allocation::{AllocationManager, AllocationRequest};
pub use ledger::InventoryLedger;
pub use lifecycle::OrderLifecycle;
pub use matching::{AvailableItem, ItemMatch, ManufacturerMatch, MatchCalculator};
pub use scheduling::{DonationScheduler, SchedulerRunReport};
