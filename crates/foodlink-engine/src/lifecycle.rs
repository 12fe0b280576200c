//! 訂單生命週期
//!
//! 訂單建立、狀態推進與需求層級的收貨確認。狀態機為
//! 目標驅動的寬鬆設計，時間戳規則集中在
//! [`Order::apply_status`]。

use chrono::Utc;

use foodlink_core::{
    FoodRequest, FoodlinkError, ManufacturerId, Order, OrderId, OrderStatus, RequestId, Result,
};
use foodlink_store::MemoryStore;

/// 訂單生命週期操作
pub struct OrderLifecycle;

impl OrderLifecycle {
    /// 建立訂單（一律從待處理狀態開始）
    pub fn create(
        store: &mut MemoryStore,
        request_id: RequestId,
        shipped_by: ManufacturerId,
    ) -> Result<Order> {
        if !request_id.is_valid() {
            return Err(FoodlinkError::InvalidArgument(format!(
                "無效的需求ID: {}",
                request_id
            )));
        }
        if !shipped_by.is_valid() {
            return Err(FoodlinkError::InvalidArgument(format!(
                "無效的製造商ID: {}",
                shipped_by
            )));
        }

        let order = store.add_order(request_id, shipped_by)?;
        tracing::info!("需求 {} 建立訂單 {}", request_id, order.id);
        Ok(order)
    }

    /// 套用目標狀態
    ///
    /// 不驗證轉移方向；重複套用同一目標以當下時間覆寫時間戳
    /// （沿用既有行為，非冪等）。訂單狀態更新不連動分配記錄
    /// 與需求欄位。
    pub fn set_status(
        store: &mut MemoryStore,
        order_id: OrderId,
        target: OrderStatus,
    ) -> Result<Order> {
        if !order_id.is_valid() {
            return Err(FoodlinkError::InvalidArgument(format!(
                "無效的訂單ID: {}",
                order_id
            )));
        }

        let mut order = store.order(order_id)?;
        order.apply_status(target, Utc::now());
        store.put_order(order.clone())?;

        tracing::info!("訂單 {} 狀態更新為 {}", order_id, target);
        Ok(order)
    }

    /// 收貨確認（需求層級的高階動作）
    ///
    /// 需求底下必須至少有一張已送達的訂單，否則回報
    /// `ConstraintViolation`。寫入收貨時間、回饋與照片，並把
    /// 已送達訂單尚未履行的分配記錄標記為已履行。
    pub fn confirm_delivery(
        store: &mut MemoryStore,
        request_id: RequestId,
        feedback: Option<String>,
        photos: Vec<String>,
    ) -> Result<FoodRequest> {
        if !request_id.is_valid() {
            return Err(FoodlinkError::InvalidArgument(format!(
                "無效的需求ID: {}",
                request_id
            )));
        }

        let mut request = store.food_request(request_id)?;

        let delivered: Vec<Order> = store
            .orders_of_request(request_id)
            .into_iter()
            .filter(|o| o.is_delivered())
            .collect();
        if delivered.is_empty() {
            return Err(FoodlinkError::ConstraintViolation(
                "需求尚無已送達的訂單，無法確認收貨".to_string(),
            ));
        }

        let now = Utc::now();
        request.record_delivery(now, feedback, photos);
        store.put_food_request(request.clone())?;

        let mut fulfilled = 0;
        for order in &delivered {
            for mut allocation in store.allocations_of_order(order.id) {
                if !allocation.is_fulfilled() {
                    allocation.mark_fulfilled(now);
                    store.put_allocation(allocation)?;
                    fulfilled += 1;
                }
            }
        }

        tracing::info!("需求 {} 確認收貨，{} 筆分配標記履行", request_id, fulfilled);
        Ok(request)
    }
}
