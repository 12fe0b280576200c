//! 捐贈與品項模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::food_type::FoodType;
use crate::ids::{DonationId, DonationItemId, ManufacturerId};
use crate::recurrence::Recurrence;
use crate::{FoodlinkError, Result};

/// 捐贈狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    /// 可供媒合
    Available,
    /// 媒合進行中
    Matching,
    /// 已履行
    Fulfilled,
}

impl DonationStatus {
    /// 取得字串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Available => "available",
            DonationStatus::Matching => "matching",
            DonationStatus::Fulfilled => "fulfilled",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = FoodlinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "available" => Ok(DonationStatus::Available),
            "matching" => Ok(DonationStatus::Matching),
            "fulfilled" => Ok(DonationStatus::Fulfilled),
            other => Err(FoodlinkError::InvalidArgument(format!(
                "未知的捐贈狀態: {}",
                other
            ))),
        }
    }
}

/// 捐贈品項輸入
///
/// 建立捐贈時的品項資料；識別碼與預留計數由儲存層補上。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationItemDraft {
    /// 品項名稱
    pub item_name: String,

    /// 食物類型
    pub food_type: FoodType,

    /// 捐贈單位數
    pub quantity: u32,

    /// 每單位盎司數
    pub oz_per_item: Decimal,

    /// 每單位估值
    pub estimated_value: Decimal,
}

impl DonationItemDraft {
    /// 創建新的品項輸入
    pub fn new(
        item_name: String,
        food_type: FoodType,
        quantity: u32,
        oz_per_item: Decimal,
        estimated_value: Decimal,
    ) -> Self {
        Self {
            item_name,
            food_type,
            quantity,
            oz_per_item,
            estimated_value,
        }
    }

    /// 驗證品項輸入
    pub fn validate(&self) -> Result<()> {
        if self.item_name.trim().is_empty() {
            return Err(FoodlinkError::InvalidArgument(
                "品項名稱不可為空".to_string(),
            ));
        }
        if self.quantity == 0 {
            return Err(FoodlinkError::InvalidArgument(
                "品項數量必須為正整數".to_string(),
            ));
        }
        Ok(())
    }
}

/// 捐贈品項
///
/// 單一食品與其數量；預留狀態以 `reserved_quantity` 累計，
/// `quantity` 在建立後不再增加。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationItem {
    /// 品項ID
    pub id: DonationItemId,

    /// 所屬捐贈ID
    pub donation_id: DonationId,

    /// 品項名稱
    pub item_name: String,

    /// 食物類型
    pub food_type: FoodType,

    /// 捐贈單位總數
    pub quantity: u32,

    /// 已預留單位數（0 ≤ reserved_quantity ≤ quantity）
    pub reserved_quantity: u32,

    /// 每單位盎司數
    pub oz_per_item: Decimal,

    /// 每單位估值
    pub estimated_value: Decimal,
}

impl DonationItem {
    /// 創建新的捐贈品項（預留計數從零開始）
    pub fn new(id: DonationItemId, donation_id: DonationId, draft: DonationItemDraft) -> Self {
        Self {
            id,
            donation_id,
            item_name: draft.item_name,
            food_type: draft.food_type,
            quantity: draft.quantity,
            reserved_quantity: 0,
            oz_per_item: draft.oz_per_item,
            estimated_value: draft.estimated_value,
        }
    }

    /// 計算可用數量（總數 - 已預留）
    pub fn available_quantity(&self) -> u32 {
        self.quantity.saturating_sub(self.reserved_quantity)
    }

    /// 預留庫存
    ///
    /// 可用數量不足時回報 `InsufficientInventory` 且不做任何
    /// 變更，不支援部分預留。
    pub fn reserve(&mut self, amount: u32) -> Result<()> {
        let available = self.available_quantity();
        if amount > available {
            return Err(FoodlinkError::InsufficientInventory {
                requested: amount,
                available,
            });
        }
        self.reserved_quantity += amount;
        Ok(())
    }

    /// 釋放已預留的庫存
    pub fn release(&mut self, amount: u32) -> Result<()> {
        if amount > self.reserved_quantity {
            return Err(FoodlinkError::InvalidArgument(format!(
                "釋放數量超過已預留數量：釋放 {}, 已預留 {}",
                amount, self.reserved_quantity
            )));
        }
        self.reserved_quantity -= amount;
        Ok(())
    }

    /// 遺留路徑：模擬履行時直接遞減總數一單位
    ///
    /// 不經過預留機制，因此可能使 `reserved_quantity` 超過
    /// `quantity`；僅在總數已為零時拒絕。
    pub fn decrement_quantity(&mut self) -> Result<()> {
        if self.quantity == 0 {
            return Err(FoodlinkError::InsufficientInventory {
                requested: 1,
                available: 0,
            });
        }
        self.quantity -= 1;
        Ok(())
    }

    /// 檢查預留計數是否仍在總數之內
    pub fn is_consistent(&self) -> bool {
        self.reserved_quantity <= self.quantity
    }
}

/// 捐贈
///
/// 製造商的單次捐贈事件，由一個以上的品項組成。彙總欄位
/// 在建立時算定，之後不隨品項變動重新推導。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    /// 捐贈ID
    pub id: DonationId,

    /// 捐贈的製造商ID
    pub manufacturer_id: ManufacturerId,

    /// 捐贈狀態
    pub status: DonationStatus,

    /// 品項單位總數（建立時彙總）
    pub total_items: u32,

    /// 總盎司數（建立時彙總）
    pub total_oz: Decimal,

    /// 總估值（建立時彙總）
    pub total_estimated_value: Decimal,

    /// 週期描述
    pub recurrence: Recurrence,

    /// 建立時間
    pub created_at: DateTime<Utc>,
}

impl Donation {
    /// 創建新的捐贈（彙總欄位由品項輸入計算）
    pub fn new(
        id: DonationId,
        manufacturer_id: ManufacturerId,
        drafts: &[DonationItemDraft],
        recurrence: Recurrence,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if drafts.is_empty() {
            return Err(FoodlinkError::InvalidArgument(
                "捐贈必須至少包含一個品項".to_string(),
            ));
        }
        for draft in drafts {
            draft.validate()?;
        }

        let total_items = drafts.iter().map(|d| d.quantity).sum();
        let total_oz = drafts
            .iter()
            .map(|d| Decimal::from(d.quantity) * d.oz_per_item)
            .sum();
        let total_estimated_value = drafts
            .iter()
            .map(|d| Decimal::from(d.quantity) * d.estimated_value)
            .sum();

        Ok(Self {
            id,
            manufacturer_id,
            status: DonationStatus::Available,
            total_items,
            total_oz,
            total_estimated_value,
            recurrence,
            created_at,
        })
    }

    /// 檢查是否為週期性捐贈範本
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_repeating()
    }
}
