//! 定期捐贈排程示例
//!
//! 展示每週重複的捐贈模板如何逐日產生可媒合的捐贈副本，
//! 以及次數用盡後排程器如何回報耗盡。

use chrono::NaiveDate;
use foodlink_core::{DonationItemDraft, FoodType, Recurrence, RecurrenceInterval, SchedulerConfig};
use foodlink_engine::DonationScheduler;
use foodlink_store::MemoryStore;
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== 定期捐贈排程示例 ===\n");

    let mut store = MemoryStore::new();
    let manufacturer = store.add_manufacturer("統一食品".to_string());

    // 每週一批花生醬，共三次
    let start = NaiveDate::from_ymd_opt(2025, 3, 3).ok_or("無效日期")?;
    let template = store.add_donation(
        manufacturer.id,
        vec![DonationItemDraft::new(
            "花生醬".to_string(),
            FoodType::PeanutButter,
            48,
            Decimal::from(16),
            Decimal::new(550, 2),
        )],
        Recurrence::repeating(RecurrenceInterval::Weekly, 1, start, 3)?,
    )?;
    println!("模板捐贈 {}（每週一次，共 3 次）\n", template.id);

    // 逐週推進，觀察排程器的行為
    let config = SchedulerConfig::default();
    for week in 0..4 {
        let today = start + chrono::Duration::weeks(week);
        let report = DonationScheduler::run_for_date(&mut store, today, &config)?;
        println!(
            "{}: 評估 {} 個模板，新建 {:?}，耗盡 {:?}",
            today, report.evaluated, report.created, report.exhausted
        );
    }

    println!("\n目前所有捐贈:");
    for donation in store.donations() {
        let kind = if donation.is_recurring() { "模板" } else { "一次性" };
        println!(
            "  捐贈 {} [{}] 狀態 {} 共 {} 單位",
            donation.id, kind, donation.status, donation.total_items
        );
    }

    Ok(())
}
