//! 庫存帳務
//!
//! 捐贈品項數量計數器的唯一修改入口。其他元件不直接改動
//! 品項列，一律經由此處預留、釋放或遞減。

use foodlink_core::{DonationItemId, FoodlinkError, Result};
use foodlink_store::MemoryStore;

/// 庫存帳務操作
pub struct InventoryLedger;

impl InventoryLedger {
    /// 查詢品項可用數量（總數 - 已預留）
    pub fn available_quantity(store: &MemoryStore, item_id: DonationItemId) -> Result<u32> {
        Self::validate_item_id(item_id)?;
        let item = store.donation_item(item_id)?;
        Ok(item.available_quantity())
    }

    /// 預留品項庫存
    ///
    /// 可用數量不足時回報 `InsufficientInventory` 且不寫入任何
    /// 變更；不支援部分預留。
    pub fn reserve(store: &mut MemoryStore, item_id: DonationItemId, amount: u32) -> Result<()> {
        Self::validate_item_id(item_id)?;
        Self::validate_amount(amount)?;

        let mut item = store.donation_item(item_id)?;
        item.reserve(amount)?;
        store.put_donation_item(item)?;

        tracing::debug!("品項 {} 預留 {} 單位", item_id, amount);
        Ok(())
    }

    /// 釋放已預留的品項庫存
    ///
    /// 帳務原語。現行生命週期沒有呼叫它的路徑（預留數量
    /// 建立後不再減少），保留給人工修正使用。
    pub fn release(store: &mut MemoryStore, item_id: DonationItemId, amount: u32) -> Result<()> {
        Self::validate_item_id(item_id)?;
        Self::validate_amount(amount)?;

        let mut item = store.donation_item(item_id)?;
        item.release(amount)?;
        store.put_donation_item(item)?;

        tracing::debug!("品項 {} 釋放 {} 單位", item_id, amount);
        Ok(())
    }

    /// 遺留路徑：模擬履行，直接將品項總數遞減一單位
    ///
    /// 不經過預留機制；遞減後若已預留數量超過總數，僅記錄
    /// 警告而不回復。總數已為零時拒絕。
    pub fn decrement_on_consumption(
        store: &mut MemoryStore,
        item_id: DonationItemId,
    ) -> Result<()> {
        Self::validate_item_id(item_id)?;

        let mut item = store.donation_item(item_id)?;
        item.decrement_quantity()?;

        if !item.is_consistent() {
            tracing::warn!(
                "品項 {} 遞減後已預留 {} 超過總數 {}",
                item_id,
                item.reserved_quantity,
                item.quantity
            );
        }

        store.put_donation_item(item)?;
        Ok(())
    }

    fn validate_item_id(item_id: DonationItemId) -> Result<()> {
        if !item_id.is_valid() {
            return Err(FoodlinkError::InvalidArgument(format!(
                "無效的品項ID: {}",
                item_id
            )));
        }
        Ok(())
    }

    fn validate_amount(amount: u32) -> Result<()> {
        if amount == 0 {
            return Err(FoodlinkError::InvalidArgument(
                "數量必須為正整數".to_string(),
            ));
        }
        Ok(())
    }
}
