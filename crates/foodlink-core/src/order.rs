//! 訂單模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ids::{ManufacturerId, OrderId, RequestId};
use crate::FoodlinkError;

/// 訂單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// 待處理
    Pending,
    /// 已出貨
    Shipped,
    /// 已送達
    Delivered,
}

impl OrderStatus {
    /// 取得字串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = FoodlinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            other => Err(FoodlinkError::InvalidArgument(format!(
                "未知的訂單狀態: {}",
                other
            ))),
        }
    }
}

/// 訂單
///
/// 對單一需求的一次出貨承諾；狀態與時間戳由
/// [`Order::apply_status`] 統一維護。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 訂單ID
    pub id: OrderId,

    /// 對應的食物需求ID
    pub request_id: RequestId,

    /// 出貨的製造商ID
    pub shipped_by: ManufacturerId,

    /// 訂單狀態
    pub status: OrderStatus,

    /// 建立時間
    pub created_at: DateTime<Utc>,

    /// 出貨時間
    pub shipped_at: Option<DateTime<Utc>>,

    /// 送達時間
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Order {
    /// 創建新的訂單（一律從待處理狀態開始）
    pub fn new(
        id: OrderId,
        request_id: RequestId,
        shipped_by: ManufacturerId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            request_id,
            shipped_by,
            status: OrderStatus::Pending,
            created_at,
            shipped_at: None,
            delivered_at: None,
        }
    }

    /// 套用目標狀態並維護對應時間戳
    ///
    /// 依目標狀態決定動作的寬鬆狀態機，沿用既有行為：
    /// - `Shipped`：寫入 `shipped_at`，清除 `delivered_at`
    /// - `Delivered`：寫入 `delivered_at`（`shipped_at` 保持原值）
    /// - `Pending`：重設，清除兩個時間戳
    ///
    /// 不驗證轉移方向；重複套用同一目標會以當下時間覆寫。
    pub fn apply_status(&mut self, target: OrderStatus, now: DateTime<Utc>) {
        match target {
            OrderStatus::Shipped => {
                self.status = OrderStatus::Shipped;
                self.shipped_at = Some(now);
                self.delivered_at = None;
            }
            OrderStatus::Delivered => {
                self.status = OrderStatus::Delivered;
                self.delivered_at = Some(now);
            }
            OrderStatus::Pending => {
                self.status = OrderStatus::Pending;
                self.shipped_at = None;
                self.delivered_at = None;
            }
        }
    }

    /// 檢查是否已送達
    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }
}
