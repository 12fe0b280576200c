//! 週期性捐贈排程
//!
//! 外部排程器每日呼叫一次進入點；掃描週期性捐贈範本，
//! 對已到期的排程建立新一期捐贈並推進剩餘次數。範本耗盡後
//! 保持原樣，不再有任何動作。

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use foodlink_core::{
    Donation, DonationId, DonationItemDraft, Recurrence, Result, SchedulerConfig,
};
use foodlink_store::MemoryStore;

/// 排程器單次執行報告
#[derive(Debug, Clone, Serialize)]
pub struct SchedulerRunReport {
    /// 執行識別碼（供日誌關聯）
    pub run_id: Uuid,

    /// 本次評估的範本數
    pub evaluated: usize,

    /// 本次建立的捐贈
    pub created: Vec<DonationId>,

    /// 本次耗盡（剩餘次數歸零）的範本
    pub exhausted: Vec<DonationId>,
}

/// 週期性捐贈排程器
pub struct DonationScheduler;

impl DonationScheduler {
    /// 每日進入點：以今天為基準日執行
    pub fn handle_recurring_donations(store: &mut MemoryStore) -> Result<SchedulerRunReport> {
        Self::run_for_date(store, Utc::now().date_naive(), &SchedulerConfig::default())
    }

    /// 以指定基準日執行（決定性核心，供測試與補跑使用）
    pub fn run_for_date(
        store: &mut MemoryStore,
        today: NaiveDate,
        config: &SchedulerConfig,
    ) -> Result<SchedulerRunReport> {
        let run_id = Uuid::new_v4();
        tracing::info!("排程器執行 {}：基準日 {}", run_id, today);

        let mut report = SchedulerRunReport {
            run_id,
            evaluated: 0,
            created: Vec::new(),
            exhausted: Vec::new(),
        };

        // 依ID順序掃描所有範本，結果可重現
        for template in store.donations() {
            if !template.is_recurring() {
                continue;
            }

            if Self::at_capacity(config, &report) {
                tracing::warn!(
                    "已達單次執行上限 {}，其餘範本留待下次",
                    report.created.len()
                );
                break;
            }

            report.evaluated += 1;
            Self::process_template(store, &template, today, config, &mut report)?;
        }

        tracing::info!(
            "排程器執行 {} 完成：評估 {} 個範本，建立 {} 筆捐贈，{} 個範本耗盡",
            run_id,
            report.evaluated,
            report.created.len(),
            report.exhausted.len()
        );
        Ok(report)
    }

    /// 處理單一範本的到期排程
    fn process_template(
        store: &mut MemoryStore,
        template: &Donation,
        today: NaiveDate,
        config: &SchedulerConfig,
        report: &mut SchedulerRunReport,
    ) -> Result<()> {
        let mut recurrence = template.recurrence.clone();
        let was_exhausted = recurrence.is_exhausted();
        let mut advanced = false;

        for date in recurrence.due_dates(today) {
            if recurrence.is_exhausted() || Self::at_capacity(config, report) {
                break;
            }

            let drafts = Self::mirror_drafts(store, template.id);
            if drafts.is_empty() {
                tracing::warn!(
                    "範本 {} 已無可鏡射的品項，略過 {} 的排程",
                    template.id,
                    date
                );
            } else {
                let created =
                    store.add_donation(template.manufacturer_id, drafts, Recurrence::once())?;
                report.created.push(created.id);
                tracing::debug!("範本 {} 於 {} 建立捐贈 {}", template.id, date, created.id);
            }

            recurrence.mark_occurred(date);
            advanced = true;

            // 不補建模式下每個範本最多處理一筆
            if !config.catch_up {
                break;
            }
        }

        if advanced {
            let mut updated = template.clone();
            updated.recurrence = recurrence.clone();
            store.put_donation(updated)?;
        }

        if !was_exhausted && recurrence.is_exhausted() {
            report.exhausted.push(template.id);
        }

        Ok(())
    }

    /// 由範本品項鏡射新一期捐贈的品項輸入
    ///
    /// 以品項目前的欄位為準；總數已被遺留遞減歸零的品項
    /// 不再鏡射。
    fn mirror_drafts(store: &MemoryStore, donation_id: DonationId) -> Vec<DonationItemDraft> {
        store
            .items_of_donation(donation_id)
            .into_iter()
            .filter(|item| item.quantity > 0)
            .map(|item| {
                DonationItemDraft::new(
                    item.item_name,
                    item.food_type,
                    item.quantity,
                    item.oz_per_item,
                    item.estimated_value,
                )
            })
            .collect()
    }

    fn at_capacity(config: &SchedulerConfig, report: &SchedulerRunReport) -> bool {
        config
            .max_per_run
            .is_some_and(|max| report.created.len() >= max)
    }
}
