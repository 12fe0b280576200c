//! # 媒合與分配完整範例
//!
//! 這個範例展示平台的核心流程：
//! - 製造商登錄捐贈
//! - 食物銀行提交需求
//! - 管理員媒合並分配庫存
//! - 訂單出貨、送達、確認收貨

use foodlink_core::*;
use foodlink_engine::{AllocationManager, InventoryLedger, MatchCalculator, OrderLifecycle};
use foodlink_store::MemoryStore;
use rust_decimal::Decimal;
use std::collections::HashSet;

fn main() -> Result<()> {
    println!("🥫 ===== 食物捐贈媒合範例 =====");
    println!();

    let mut store = MemoryStore::new();

    // ========== 1. 建立參與方 ==========
    println!("🏭 步驟 1: 建立參與方");
    let alpha = store.add_manufacturer("統一食品".to_string());
    let beta = store.add_manufacturer("義美食品".to_string());
    let pantry = store.add_pantry("南區食物銀行".to_string());
    println!("   製造商: {} (ID {})", alpha.name, alpha.id);
    println!("   製造商: {} (ID {})", beta.name, beta.id);
    println!("   食物銀行: {} (ID {})", pantry.name, pantry.id);
    println!();

    // ========== 2. 登錄捐贈 ==========
    println!("📦 步驟 2: 登錄捐贈");
    let donation = store.add_donation(
        alpha.id,
        vec![
            DonationItemDraft::new(
                "燕麥脆穀".to_string(),
                FoodType::Granola,
                80,
                Decimal::from(12),
                Decimal::new(450, 2),
            ),
            DonationItemDraft::new(
                "即食麥片".to_string(),
                FoodType::Cereal,
                20,
                Decimal::from(18),
                Decimal::new(325, 2),
            ),
        ],
        Recurrence::once(),
    )?;
    store.add_donation(
        beta.id,
        vec![DonationItemDraft::new(
            "台梗九號米".to_string(),
            FoodType::Rice,
            100,
            Decimal::from(32),
            Decimal::new(620, 2),
        )],
        Recurrence::once(),
    )?;
    println!(
        "   {} 捐贈 {} 單位 / {} 盎司 / 估值 {} 元",
        alpha.name, donation.total_items, donation.total_oz, donation.total_estimated_value
    );
    println!("   {} 捐贈 100 單位白米", beta.name);
    println!();

    // ========== 3. 提交需求 ==========
    println!("📋 步驟 3: 食物銀行提交需求");
    let request = store.add_food_request(
        pantry.id,
        RequestedSize::Medium,
        HashSet::from([FoodType::Granola]),
        Some("早餐類食品優先".to_string()),
    )?;
    println!("   需求 {}: 規模 {}，類型 granola", request.id, request.requested_size);
    println!();

    // ========== 4. 媒合 ==========
    println!("🔍 步驟 4: 媒合製造商");
    let partition = MatchCalculator::matching_manufacturers(&store, request.id)?;
    for manufacturer in &partition.matching {
        println!("   ✓ 符合: {}", manufacturer.name);
    }
    for manufacturer in &partition.non_matching {
        println!("   ✗ 不符合: {}", manufacturer.name);
    }

    let items = MatchCalculator::available_items(&store, request.id, alpha.id)?;
    println!("   {} 的可分配品項:", alpha.name);
    for item in &items.matching_items {
        println!(
            "      - [符合] {} ({}) 可用 {}",
            item.item_name, item.food_type, item.available_quantity
        );
    }
    for item in &items.non_matching_items {
        println!(
            "      - [其他] {} ({}) 可用 {}",
            item.item_name, item.food_type, item.available_quantity
        );
    }
    println!();

    // ========== 5. 建立訂單並分配 ==========
    println!("✅ 步驟 5: 建立訂單並分配 30 單位燕麥脆穀");
    let order = OrderLifecycle::create(&mut store, request.id, alpha.id)?;
    let granola_id = items.matching_items[0].item_id;
    let allocation = AllocationManager::allocate(&mut store, order.id, granola_id, 30)?;
    println!(
        "   分配 {}: 品項 {} × {} 單位",
        allocation.id, allocation.donation_item_id, allocation.allocated_quantity
    );
    println!(
        "   剩餘可用: {}",
        InventoryLedger::available_quantity(&store, granola_id)?
    );
    println!();

    // ========== 6. 出貨與送達 ==========
    println!("🚚 步驟 6: 出貨與送達");
    let order = OrderLifecycle::set_status(&mut store, order.id, OrderStatus::Shipped)?;
    println!("   出貨時間: {:?}", order.shipped_at);
    let order = OrderLifecycle::set_status(&mut store, order.id, OrderStatus::Delivered)?;
    println!("   送達時間: {:?}", order.delivered_at);
    println!();

    // ========== 7. 確認收貨 ==========
    println!("📬 步驟 7: 食物銀行確認收貨");
    let confirmed = OrderLifecycle::confirm_delivery(
        &mut store,
        request.id,
        Some("品項完整，已上架".to_string()),
        vec!["photos/req-1/shelf.jpg".to_string()],
    )?;
    println!("   收貨時間: {:?}", confirmed.date_received);
    println!("   回饋: {}", confirmed.feedback.as_deref().unwrap_or("-"));

    for allocation in store.allocations_of_order(order.id) {
        println!(
            "   分配 {} 履行時間: {:?}",
            allocation.id, allocation.fulfilled_at
        );
    }
    println!();

    println!("===== 範例結束 =====");
    Ok(())
}
