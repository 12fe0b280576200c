//! 媒合計算
//!
//! 依需求的食物類型集合對製造商與品項做二元劃分。唯讀
//! 操作，不改動任何庫存狀態；比對單位是品項的食物類型，
//! 數量門檻只看未預留的部分。

use serde::Serialize;

use foodlink_core::{
    DonationItem, DonationItemId, FoodType, FoodlinkError, Manufacturer, ManufacturerId,
    RequestId, Result,
};
use foodlink_store::MemoryStore;

/// 製造商劃分結果
#[derive(Debug, Clone, Serialize)]
pub struct ManufacturerMatch {
    /// 至少有一個符合品項的製造商
    pub matching: Vec<Manufacturer>,
    /// 有未預留庫存但沒有符合品項的製造商
    pub non_matching: Vec<Manufacturer>,
}

/// 品項劃分結果
#[derive(Debug, Clone, Serialize)]
pub struct ItemMatch {
    /// 食物類型在需求集合內的品項
    pub matching_items: Vec<AvailableItem>,
    /// 其餘仍有可用數量的品項
    pub non_matching_items: Vec<AvailableItem>,
}

/// 可分配品項檢視
///
/// 對外只揭露可用數量，不帶出總數與已預留數。
#[derive(Debug, Clone, Serialize)]
pub struct AvailableItem {
    /// 品項ID
    pub item_id: DonationItemId,

    /// 品項名稱
    pub item_name: String,

    /// 食物類型
    pub food_type: FoodType,

    /// 可用數量
    pub available_quantity: u32,
}

impl AvailableItem {
    fn from_item(item: &DonationItem) -> Self {
        Self {
            item_id: item.id,
            item_name: item.item_name.clone(),
            food_type: item.food_type,
            available_quantity: item.available_quantity(),
        }
    }
}

/// 媒合計算器
pub struct MatchCalculator;

impl MatchCalculator {
    /// 依需求劃分所有製造商
    ///
    /// 製造商只要有任一品項「食物類型屬於需求集合」且
    /// 「可用數量大於零」即列入符合側；有未預留庫存但無此類
    /// 品項者列入不符合側；完全沒有未預留庫存的製造商
    /// 兩側都不出現。
    pub fn matching_manufacturers(
        store: &MemoryStore,
        request_id: RequestId,
    ) -> Result<ManufacturerMatch> {
        Self::validate_request_id(request_id)?;
        let request = store.food_request(request_id)?;

        let mut matching = Vec::new();
        let mut non_matching = Vec::new();

        for manufacturer in store.manufacturers() {
            let items = store.items_of_manufacturer(manufacturer.id);
            let mut has_available = false;
            let mut has_match = false;

            for item in &items {
                if item.available_quantity() == 0 {
                    continue;
                }
                has_available = true;
                if request.wants(item.food_type) {
                    has_match = true;
                    break;
                }
            }

            // 沒有任何未預留庫存的製造商不參與劃分
            if !has_available {
                continue;
            }

            if has_match {
                matching.push(manufacturer);
            } else {
                non_matching.push(manufacturer);
            }
        }

        tracing::debug!(
            "需求 {} 製造商劃分：符合 {} 家、不符合 {} 家",
            request_id,
            matching.len(),
            non_matching.len()
        );

        Ok(ManufacturerMatch {
            matching,
            non_matching,
        })
    }

    /// 劃分單一製造商的可分配品項
    ///
    /// 回傳列僅含可用數量大於零的品項；已完全預留的品項
    /// 不出現在任何一側。
    pub fn available_items(
        store: &MemoryStore,
        request_id: RequestId,
        manufacturer_id: ManufacturerId,
    ) -> Result<ItemMatch> {
        Self::validate_request_id(request_id)?;
        if !manufacturer_id.is_valid() {
            return Err(FoodlinkError::InvalidArgument(format!(
                "無效的製造商ID: {}",
                manufacturer_id
            )));
        }

        let request = store.food_request(request_id)?;
        store.manufacturer(manufacturer_id)?;

        let mut matching_items = Vec::new();
        let mut non_matching_items = Vec::new();

        for item in store.items_of_manufacturer(manufacturer_id) {
            if item.available_quantity() == 0 {
                continue;
            }

            let view = AvailableItem::from_item(&item);
            if request.wants(item.food_type) {
                matching_items.push(view);
            } else {
                non_matching_items.push(view);
            }
        }

        Ok(ItemMatch {
            matching_items,
            non_matching_items,
        })
    }

    fn validate_request_id(request_id: RequestId) -> Result<()> {
        if !request_id.is_valid() {
            return Err(FoodlinkError::InvalidArgument(format!(
                "無效的需求ID: {}",
                request_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InventoryLedger;
    use foodlink_core::{DonationItemDraft, PantryId, Recurrence, RequestedSize};
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn draft(name: &str, food_type: FoodType, quantity: u32) -> DonationItemDraft {
        DonationItemDraft::new(
            name.to_string(),
            food_type,
            quantity,
            Decimal::from(12),
            Decimal::new(450, 2),
        )
    }

    /// 三家製造商：甲有燕麥脆穀與米、乙只有罐頭蔬菜、丙沒有庫存
    fn seeded_store() -> (MemoryStore, RequestId) {
        let mut store = MemoryStore::new();

        let alpha = store.add_manufacturer("統一食品".to_string());
        let beta = store.add_manufacturer("義美食品".to_string());
        store.add_manufacturer("空倉食品".to_string());

        store
            .add_donation(
                alpha.id,
                vec![
                    draft("燕麥脆穀", FoodType::Granola, 80),
                    draft("台梗九號米", FoodType::Rice, 40),
                ],
                Recurrence::once(),
            )
            .unwrap();
        store
            .add_donation(
                beta.id,
                vec![draft("玉米罐頭", FoodType::CannedVegetables, 60)],
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

        (store, request.id)
    }

    #[test]
    fn test_partition_by_any_matching_item() {
        let (store, request_id) = seeded_store();

        let result = MatchCalculator::matching_manufacturers(&store, request_id).unwrap();

        // 甲有燕麥脆穀（符合），乙只有罐頭蔬菜（不符合），丙無庫存（不出現）
        assert_eq!(result.matching.len(), 1);
        assert_eq!(result.matching[0].name, "統一食品");
        assert_eq!(result.non_matching.len(), 1);
        assert_eq!(result.non_matching[0].name, "義美食品");
    }

    #[test]
    fn test_fully_reserved_manufacturer_drops_out() {
        let (mut store, request_id) = seeded_store();

        // 把乙的唯一品項全數預留後，乙不再出現在任何一側
        let beta_items = store.items_of_manufacturer(ManufacturerId::new(2));
        InventoryLedger::reserve(&mut store, beta_items[0].id, 60).unwrap();

        let result = MatchCalculator::matching_manufacturers(&store, request_id).unwrap();
        assert_eq!(result.matching.len(), 1);
        assert!(result.non_matching.is_empty());
    }

    #[test]
    fn test_reserved_matching_items_flip_manufacturer_side() {
        let (mut store, request_id) = seeded_store();

        // 甲的燕麥脆穀全數預留後，只剩米（不在需求集合）可用
        let alpha_items = store.items_of_manufacturer(ManufacturerId::new(1));
        let granola = alpha_items
            .iter()
            .find(|i| i.food_type == FoodType::Granola)
            .unwrap();
        InventoryLedger::reserve(&mut store, granola.id, 80).unwrap();

        let result = MatchCalculator::matching_manufacturers(&store, request_id).unwrap();
        assert!(result.matching.is_empty());
        assert_eq!(result.non_matching.len(), 2);
    }

    #[test]
    fn test_available_items_partition() {
        let (store, request_id) = seeded_store();

        let result =
            MatchCalculator::available_items(&store, request_id, ManufacturerId::new(1)).unwrap();

        assert_eq!(result.matching_items.len(), 1);
        assert_eq!(result.matching_items[0].food_type, FoodType::Granola);
        assert_eq!(result.matching_items[0].available_quantity, 80);

        assert_eq!(result.non_matching_items.len(), 1);
        assert_eq!(result.non_matching_items[0].food_type, FoodType::Rice);
    }

    #[test]
    fn test_available_items_reflect_reservations() {
        let (mut store, request_id) = seeded_store();

        let alpha_items = store.items_of_manufacturer(ManufacturerId::new(1));
        let granola = alpha_items
            .iter()
            .find(|i| i.food_type == FoodType::Granola)
            .unwrap();
        InventoryLedger::reserve(&mut store, granola.id, 30).unwrap();

        let result =
            MatchCalculator::available_items(&store, request_id, ManufacturerId::new(1)).unwrap();
        assert_eq!(result.matching_items[0].available_quantity, 50);
    }

    #[test]
    fn test_unknown_request_or_manufacturer() {
        let (store, _) = seeded_store();

        let err =
            MatchCalculator::matching_manufacturers(&store, RequestId::new(99)).unwrap_err();
        assert!(matches!(err, FoodlinkError::NotFound { .. }));

        let (store, request_id) = seeded_store();
        let err = MatchCalculator::available_items(&store, request_id, ManufacturerId::new(99))
            .unwrap_err();
        assert!(matches!(err, FoodlinkError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_ids_rejected_first() {
        let (store, _) = seeded_store();

        let err = MatchCalculator::matching_manufacturers(&store, RequestId::new(0)).unwrap_err();
        assert!(matches!(err, FoodlinkError::InvalidArgument(_)));

        let (store, request_id) = seeded_store();
        let err = MatchCalculator::available_items(&store, request_id, ManufacturerId::new(-3))
            .unwrap_err();
        assert!(matches!(err, FoodlinkError::InvalidArgument(_)));
    }

    #[test]
    fn test_request_wanting_nothing_available_still_partitions() {
        let (mut store, _) = seeded_store();

        // 需求只要花生醬：兩家有庫存的製造商都落在不符合側
        let request = store
            .add_food_request(
                PantryId::new(1),
                RequestedSize::Small,
                HashSet::from([FoodType::PeanutButter]),
                None,
            )
            .unwrap();

        let result = MatchCalculator::matching_manufacturers(&store, request.id).unwrap();
        assert!(result.matching.is_empty());
        assert_eq!(result.non_matching.len(), 2);
    }
}
