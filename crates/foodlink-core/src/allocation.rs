//! 分配模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AllocationId, DonationItemId, OrderId};

/// 分配記錄
///
/// 訂單與捐贈品項之間的承諾：建立當下即完成預留，
/// 履行時間在所屬需求確認收貨時補上。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    /// 分配ID
    pub id: AllocationId,

    /// 所屬訂單ID
    pub order_id: OrderId,

    /// 被分配的捐贈品項ID
    pub donation_item_id: DonationItemId,

    /// 分配單位數
    pub allocated_quantity: u32,

    /// 預留時間
    pub reserved_at: DateTime<Utc>,

    /// 履行時間
    pub fulfilled_at: Option<DateTime<Utc>>,
}

impl Allocation {
    /// 創建新的分配記錄
    pub fn new(
        id: AllocationId,
        order_id: OrderId,
        donation_item_id: DonationItemId,
        allocated_quantity: u32,
        reserved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            donation_item_id,
            allocated_quantity,
            reserved_at,
            fulfilled_at: None,
        }
    }

    /// 標記為已履行
    pub fn mark_fulfilled(&mut self, fulfilled_at: DateTime<Utc>) {
        self.fulfilled_at = Some(fulfilled_at);
    }

    /// 檢查是否已履行
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_allocation_is_unfulfilled() {
        let allocation = Allocation::new(
            AllocationId::new(1),
            OrderId::new(1),
            DonationItemId::new(1),
            30,
            Utc::now(),
        );

        assert_eq!(allocation.allocated_quantity, 30);
        assert!(!allocation.is_fulfilled());
    }

    #[test]
    fn test_mark_fulfilled() {
        let mut allocation = Allocation::new(
            AllocationId::new(1),
            OrderId::new(1),
            DonationItemId::new(1),
            30,
            Utc::now(),
        );

        let fulfilled_at = Utc::now();
        allocation.mark_fulfilled(fulfilled_at);

        assert!(allocation.is_fulfilled());
        assert_eq!(allocation.fulfilled_at, Some(fulfilled_at));
    }
}
