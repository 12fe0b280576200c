//! 分配管理
//!
//! 把媒合決策寫入持久狀態：先經庫存帳務預留，成功後建立
//! 分配記錄。

use foodlink_core::{Allocation, DonationItemId, FoodlinkError, OrderId, Result};
use foodlink_store::MemoryStore;

use crate::ledger::InventoryLedger;

/// 單筆分配請求（品項與數量）
#[derive(Debug, Clone, Copy)]
pub struct AllocationRequest {
    /// 品項ID
    pub item_id: DonationItemId,

    /// 分配數量
    pub quantity: u32,
}

impl AllocationRequest {
    /// 創建新的分配請求
    pub fn new(item_id: DonationItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// 分配管理器
pub struct AllocationManager;

impl AllocationManager {
    /// 建立單筆分配
    ///
    /// 預留失敗時不建立任何記錄，錯誤原樣回傳；不重試、
    /// 不自動改配其他品項。
    pub fn allocate(
        store: &mut MemoryStore,
        order_id: OrderId,
        item_id: DonationItemId,
        quantity: u32,
    ) -> Result<Allocation> {
        if !order_id.is_valid() {
            return Err(FoodlinkError::InvalidArgument(format!(
                "無效的訂單ID: {}",
                order_id
            )));
        }
        if quantity == 0 {
            return Err(FoodlinkError::InvalidArgument(
                "分配數量必須為正整數".to_string(),
            ));
        }

        store.order(order_id)?;

        InventoryLedger::reserve(store, item_id, quantity)?;
        let allocation = store.add_allocation(order_id, item_id, quantity)?;

        tracing::info!("訂單 {} 分配品項 {} × {} 單位", order_id, item_id, quantity);
        Ok(allocation)
    }

    /// 依序建立多筆分配
    ///
    /// 逐筆提交，沒有跨品項的原子性：中途失敗時，先前成功的
    /// 預留與分配記錄保持已提交狀態，可由
    /// [`MemoryStore::allocations_of_order`] 查得；是否補償由
    /// 呼叫端決定。
    pub fn allocate_many(
        store: &mut MemoryStore,
        order_id: OrderId,
        requests: &[AllocationRequest],
    ) -> Result<Vec<Allocation>> {
        let mut created = Vec::with_capacity(requests.len());
        for request in requests {
            created.push(Self::allocate(
                store,
                order_id,
                request.item_id,
                request.quantity,
            )?);
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodlink_core::{DonationItemDraft, FoodType, Recurrence, RequestedSize};
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn seeded_store() -> (MemoryStore, OrderId, Vec<DonationItemId>) {
        let mut store = MemoryStore::new();
        let manufacturer = store.add_manufacturer("統一食品".to_string());
        let donation = store
            .add_donation(
                manufacturer.id,
                vec![
                    DonationItemDraft::new(
                        "燕麥脆穀".to_string(),
                        FoodType::Granola,
                        50,
                        Decimal::from(12),
                        Decimal::new(450, 2),
                    ),
                    DonationItemDraft::new(
                        "即食麥片".to_string(),
                        FoodType::Cereal,
                        30,
                        Decimal::from(18),
                        Decimal::new(325, 2),
                    ),
                ],
                Recurrence::once(),
            )
            .unwrap();

        let pantry = store.add_pantry("南區食物銀行".to_string());
        let request = store
            .add_food_request(
                pantry.id,
                RequestedSize::Medium,
                HashSet::from([FoodType::Granola, FoodType::Cereal]),
                None,
            )
            .unwrap();
        let order = store.add_order(request.id, manufacturer.id).unwrap();

        let item_ids = store
            .items_of_donation(donation.id)
            .into_iter()
            .map(|i| i.id)
            .collect();
        (store, order.id, item_ids)
    }

    #[test]
    fn test_allocate_reserves_then_records() {
        let (mut store, order_id, items) = seeded_store();

        let allocation = AllocationManager::allocate(&mut store, order_id, items[0], 20).unwrap();

        assert_eq!(allocation.order_id, order_id);
        assert_eq!(allocation.allocated_quantity, 20);
        assert!(allocation.fulfilled_at.is_none());

        // 預留同步寫入品項列
        assert_eq!(store.donation_item(items[0]).unwrap().reserved_quantity, 20);
        assert_eq!(store.allocations_of_order(order_id).len(), 1);
    }

    #[test]
    fn test_failed_reserve_creates_no_record() {
        let (mut store, order_id, items) = seeded_store();

        let err = AllocationManager::allocate(&mut store, order_id, items[0], 51).unwrap_err();
        assert!(matches!(err, FoodlinkError::InsufficientInventory { .. }));

        assert!(store.allocations_of_order(order_id).is_empty());
        assert_eq!(store.donation_item(items[0]).unwrap().reserved_quantity, 0);
    }

    #[test]
    fn test_allocate_validates_before_touching_store() {
        let (mut store, order_id, items) = seeded_store();

        assert!(matches!(
            AllocationManager::allocate(&mut store, OrderId::new(0), items[0], 5),
            Err(FoodlinkError::InvalidArgument(_))
        ));
        assert!(matches!(
            AllocationManager::allocate(&mut store, order_id, items[0], 0),
            Err(FoodlinkError::InvalidArgument(_))
        ));
        assert!(matches!(
            AllocationManager::allocate(&mut store, OrderId::new(77), items[0], 5),
            Err(FoodlinkError::NotFound { .. })
        ));
    }

    #[test]
    fn test_allocate_many_is_not_atomic() {
        let (mut store, order_id, items) = seeded_store();

        let requests = vec![
            AllocationRequest::new(items[0], 40), // 成功
            AllocationRequest::new(items[1], 99), // 超量，失敗
            AllocationRequest::new(items[1], 10), // 不會執行
        ];

        let err = AllocationManager::allocate_many(&mut store, order_id, &requests).unwrap_err();
        assert!(matches!(err, FoodlinkError::InsufficientInventory { .. }));

        // 第一筆保持已提交，其後的都沒有發生
        let committed = store.allocations_of_order(order_id);
        assert_eq!(committed.len(), 1);
        assert_eq!(committed[0].allocated_quantity, 40);
        assert_eq!(store.donation_item(items[0]).unwrap().reserved_quantity, 40);
        assert_eq!(store.donation_item(items[1]).unwrap().reserved_quantity, 0);
    }

    #[test]
    fn test_allocate_many_all_success() {
        let (mut store, order_id, items) = seeded_store();

        let requests = vec![
            AllocationRequest::new(items[0], 25),
            AllocationRequest::new(items[1], 30),
        ];

        let created = AllocationManager::allocate_many(&mut store, order_id, &requests).unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(store.allocations_of_order(order_id).len(), 2);
    }

    #[test]
    fn test_reallocation_sees_remaining_only() {
        let (mut store, order_id, items) = seeded_store();

        AllocationManager::allocate(&mut store, order_id, items[0], 30).unwrap();

        // 第二次分配僅剩 20 可用
        let err = AllocationManager::allocate(&mut store, order_id, items[0], 21).unwrap_err();
        assert!(matches!(
            err,
            FoodlinkError::InsufficientInventory {
                requested: 21,
                available: 20
            }
        ));
        AllocationManager::allocate(&mut store, order_id, items[0], 20).unwrap();
        assert_eq!(store.donation_item(items[0]).unwrap().available_quantity(), 0);
    }
}
