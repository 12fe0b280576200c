//! 記憶體儲存庫
//!
//! 關聯式資料表的記憶體對應。讀取一律回傳完整實體副本，
//! 寫入一律整列替換，沒有延遲載入的關聯圖：呼叫端需要什麼
//! 就明確查什麼。

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use foodlink_core::{
    Allocation, AllocationId, Donation, DonationId, DonationItem, DonationItemDraft,
    DonationItemId, FoodRequest, FoodType, FoodlinkError, Manufacturer, ManufacturerId, Order,
    OrderId, Pantry, PantryId, Recurrence, RequestId, RequestedSize, Result,
};

/// 各資料表的序號計數器
#[derive(Debug, Default)]
struct IdCounters {
    manufacturer: i64,
    pantry: i64,
    donation: i64,
    donation_item: i64,
    food_request: i64,
    order: i64,
    allocation: i64,
}

fn bump(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// 記憶體儲存庫
///
/// 識別碼由各表的序號計數器指派（從 1 開始遞增）。
/// 單執行緒持有 `&mut` 存取即為一次交易；集合查詢不驗證
/// 父實體是否存在，由上層操作負責。
#[derive(Debug, Default)]
pub struct MemoryStore {
    manufacturers: HashMap<i64, Manufacturer>,
    pantries: HashMap<i64, Pantry>,
    donations: HashMap<i64, Donation>,
    donation_items: HashMap<i64, DonationItem>,
    food_requests: HashMap<i64, FoodRequest>,
    orders: HashMap<i64, Order>,
    allocations: HashMap<i64, Allocation>,
    next_id: IdCounters,
}

impl MemoryStore {
    /// 創建空的儲存庫
    pub fn new() -> Self {
        Self::default()
    }

    // ========== 參與方 ==========

    /// 新增製造商
    pub fn add_manufacturer(&mut self, name: String) -> Manufacturer {
        let id = ManufacturerId::new(bump(&mut self.next_id.manufacturer));
        let manufacturer = Manufacturer::new(id, name);
        self.manufacturers.insert(id.get(), manufacturer.clone());
        manufacturer
    }

    /// 新增食物銀行
    pub fn add_pantry(&mut self, name: String) -> Pantry {
        let id = PantryId::new(bump(&mut self.next_id.pantry));
        let pantry = Pantry::new(id, name);
        self.pantries.insert(id.get(), pantry.clone());
        pantry
    }

    /// 依ID查詢製造商
    pub fn manufacturer(&self, id: ManufacturerId) -> Result<Manufacturer> {
        self.manufacturers
            .get(&id.get())
            .cloned()
            .ok_or(FoodlinkError::NotFound {
                entity: "manufacturer",
                id: id.get(),
            })
    }

    /// 依ID查詢食物銀行
    pub fn pantry(&self, id: PantryId) -> Result<Pantry> {
        self.pantries
            .get(&id.get())
            .cloned()
            .ok_or(FoodlinkError::NotFound {
                entity: "pantry",
                id: id.get(),
            })
    }

    /// 列出所有製造商（依ID排序）
    pub fn manufacturers(&self) -> Vec<Manufacturer> {
        let mut all: Vec<_> = self.manufacturers.values().cloned().collect();
        all.sort_by_key(|m| m.id);
        all
    }

    // ========== 捐贈與品項 ==========

    /// 新增捐贈（同時建立品項列並計算彙總欄位）
    pub fn add_donation(
        &mut self,
        manufacturer_id: ManufacturerId,
        drafts: Vec<DonationItemDraft>,
        recurrence: Recurrence,
    ) -> Result<Donation> {
        self.manufacturer(manufacturer_id)?;

        let id = DonationId::new(bump(&mut self.next_id.donation));
        let donation = Donation::new(id, manufacturer_id, &drafts, recurrence, Utc::now())?;
        self.donations.insert(id.get(), donation.clone());

        for draft in drafts {
            let item_id = DonationItemId::new(bump(&mut self.next_id.donation_item));
            let item = DonationItem::new(item_id, id, draft);
            self.donation_items.insert(item_id.get(), item);
        }

        Ok(donation)
    }

    /// 依ID查詢捐贈
    pub fn donation(&self, id: DonationId) -> Result<Donation> {
        self.donations
            .get(&id.get())
            .cloned()
            .ok_or(FoodlinkError::NotFound {
                entity: "donation",
                id: id.get(),
            })
    }

    /// 依ID查詢捐贈品項
    pub fn donation_item(&self, id: DonationItemId) -> Result<DonationItem> {
        self.donation_items
            .get(&id.get())
            .cloned()
            .ok_or(FoodlinkError::NotFound {
                entity: "donation_item",
                id: id.get(),
            })
    }

    /// 列出所有捐贈（依ID排序）
    pub fn donations(&self) -> Vec<Donation> {
        let mut all: Vec<_> = self.donations.values().cloned().collect();
        all.sort_by_key(|d| d.id);
        all
    }

    /// 查詢製造商的所有捐贈（依ID排序）
    pub fn donations_of_manufacturer(&self, manufacturer_id: ManufacturerId) -> Vec<Donation> {
        let mut result: Vec<_> = self
            .donations
            .values()
            .filter(|d| d.manufacturer_id == manufacturer_id)
            .cloned()
            .collect();
        result.sort_by_key(|d| d.id);
        result
    }

    /// 查詢捐贈底下的所有品項（依ID排序）
    pub fn items_of_donation(&self, donation_id: DonationId) -> Vec<DonationItem> {
        let mut result: Vec<_> = self
            .donation_items
            .values()
            .filter(|i| i.donation_id == donation_id)
            .cloned()
            .collect();
        result.sort_by_key(|i| i.id);
        result
    }

    /// 查詢製造商所有捐贈底下的品項（依ID排序）
    pub fn items_of_manufacturer(&self, manufacturer_id: ManufacturerId) -> Vec<DonationItem> {
        let donation_ids: HashSet<DonationId> = self
            .donations
            .values()
            .filter(|d| d.manufacturer_id == manufacturer_id)
            .map(|d| d.id)
            .collect();

        let mut result: Vec<_> = self
            .donation_items
            .values()
            .filter(|i| donation_ids.contains(&i.donation_id))
            .cloned()
            .collect();
        result.sort_by_key(|i| i.id);
        result
    }

    /// 整列更新捐贈
    pub fn put_donation(&mut self, donation: Donation) -> Result<()> {
        match self.donations.get_mut(&donation.id.get()) {
            Some(row) => {
                *row = donation;
                Ok(())
            }
            None => Err(FoodlinkError::NotFound {
                entity: "donation",
                id: donation.id.get(),
            }),
        }
    }

    /// 整列更新捐贈品項
    pub fn put_donation_item(&mut self, item: DonationItem) -> Result<()> {
        match self.donation_items.get_mut(&item.id.get()) {
            Some(row) => {
                *row = item;
                Ok(())
            }
            None => Err(FoodlinkError::NotFound {
                entity: "donation_item",
                id: item.id.get(),
            }),
        }
    }

    // ========== 食物需求 ==========

    /// 新增食物需求
    pub fn add_food_request(
        &mut self,
        pantry_id: PantryId,
        requested_size: RequestedSize,
        requested_food_types: HashSet<FoodType>,
        additional_information: Option<String>,
    ) -> Result<FoodRequest> {
        self.pantry(pantry_id)?;

        let id = RequestId::new(bump(&mut self.next_id.food_request));
        let mut request = FoodRequest::new(
            id,
            pantry_id,
            requested_size,
            requested_food_types,
            Utc::now(),
        )?;
        if let Some(info) = additional_information {
            request = request.with_additional_information(info);
        }

        self.food_requests.insert(id.get(), request.clone());
        Ok(request)
    }

    /// 依ID查詢食物需求
    pub fn food_request(&self, id: RequestId) -> Result<FoodRequest> {
        self.food_requests
            .get(&id.get())
            .cloned()
            .ok_or(FoodlinkError::NotFound {
                entity: "food_request",
                id: id.get(),
            })
    }

    /// 查詢食物銀行的所有需求（依ID排序）
    pub fn requests_of_pantry(&self, pantry_id: PantryId) -> Vec<FoodRequest> {
        let mut result: Vec<_> = self
            .food_requests
            .values()
            .filter(|r| r.pantry_id == pantry_id)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.id);
        result
    }

    /// 整列更新食物需求
    pub fn put_food_request(&mut self, request: FoodRequest) -> Result<()> {
        match self.food_requests.get_mut(&request.id.get()) {
            Some(row) => {
                *row = request;
                Ok(())
            }
            None => Err(FoodlinkError::NotFound {
                entity: "food_request",
                id: request.id.get(),
            }),
        }
    }

    // ========== 訂單與分配 ==========

    /// 新增訂單（一律從待處理狀態開始）
    pub fn add_order(&mut self, request_id: RequestId, shipped_by: ManufacturerId) -> Result<Order> {
        self.food_request(request_id)?;
        self.manufacturer(shipped_by)?;

        let id = OrderId::new(bump(&mut self.next_id.order));
        let order = Order::new(id, request_id, shipped_by, Utc::now());
        self.orders.insert(id.get(), order.clone());
        Ok(order)
    }

    /// 依ID查詢訂單
    pub fn order(&self, id: OrderId) -> Result<Order> {
        self.orders
            .get(&id.get())
            .cloned()
            .ok_or(FoodlinkError::NotFound {
                entity: "order",
                id: id.get(),
            })
    }

    /// 查詢需求底下的所有訂單（依ID排序）
    pub fn orders_of_request(&self, request_id: RequestId) -> Vec<Order> {
        let mut result: Vec<_> = self
            .orders
            .values()
            .filter(|o| o.request_id == request_id)
            .cloned()
            .collect();
        result.sort_by_key(|o| o.id);
        result
    }

    /// 整列更新訂單
    pub fn put_order(&mut self, order: Order) -> Result<()> {
        match self.orders.get_mut(&order.id.get()) {
            Some(row) => {
                *row = order;
                Ok(())
            }
            None => Err(FoodlinkError::NotFound {
                entity: "order",
                id: order.id.get(),
            }),
        }
    }

    /// 新增分配記錄（預留時間為當下）
    pub fn add_allocation(
        &mut self,
        order_id: OrderId,
        donation_item_id: DonationItemId,
        allocated_quantity: u32,
    ) -> Result<Allocation> {
        self.order(order_id)?;
        self.donation_item(donation_item_id)?;

        let id = AllocationId::new(bump(&mut self.next_id.allocation));
        let allocation = Allocation::new(
            id,
            order_id,
            donation_item_id,
            allocated_quantity,
            Utc::now(),
        );
        self.allocations.insert(id.get(), allocation.clone());
        Ok(allocation)
    }

    /// 依ID查詢分配記錄
    pub fn allocation(&self, id: AllocationId) -> Result<Allocation> {
        self.allocations
            .get(&id.get())
            .cloned()
            .ok_or(FoodlinkError::NotFound {
                entity: "allocation",
                id: id.get(),
            })
    }

    /// 查詢訂單底下的所有分配記錄（依ID排序）
    pub fn allocations_of_order(&self, order_id: OrderId) -> Vec<Allocation> {
        let mut result: Vec<_> = self
            .allocations
            .values()
            .filter(|a| a.order_id == order_id)
            .cloned()
            .collect();
        result.sort_by_key(|a| a.id);
        result
    }

    /// 整列更新分配記錄
    pub fn put_allocation(&mut self, allocation: Allocation) -> Result<()> {
        match self.allocations.get_mut(&allocation.id.get()) {
            Some(row) => {
                *row = allocation;
                Ok(())
            }
            None => Err(FoodlinkError::NotFound {
                entity: "allocation",
                id: allocation.id.get(),
            }),
        }
    }
}
