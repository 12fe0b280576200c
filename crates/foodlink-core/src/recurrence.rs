//! 週期性捐贈排程模型

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{FoodlinkError, Result};

/// 週期間隔
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceInterval {
    /// 每週
    Weekly,
    /// 每月
    Monthly,
    /// 每年
    Yearly,
}

impl RecurrenceInterval {
    /// 取得字串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceInterval::Weekly => "weekly",
            RecurrenceInterval::Monthly => "monthly",
            RecurrenceInterval::Yearly => "yearly",
        }
    }

    /// 由指定日期推進 `freq` 個間隔
    ///
    /// 月與年採日曆推進，月底日期不足時取該月最後一天
    /// （1/31 推進一個月為 2/28）。
    pub fn advance(&self, date: NaiveDate, freq: u32) -> NaiveDate {
        match self {
            RecurrenceInterval::Weekly => date + Duration::weeks(freq as i64),
            RecurrenceInterval::Monthly => date
                .checked_add_months(Months::new(freq))
                .expect("日期溢出"),
            RecurrenceInterval::Yearly => date
                .checked_add_months(Months::new(freq * 12))
                .expect("日期溢出"),
        }
    }
}

/// 週期描述
///
/// `Once` 為單次捐贈；`Repeating` 必須同時攜帶間隔、頻率、
/// 排程日期與剩餘次數。原始資料以資料表檢查約束強制這組
/// 欄位同進同出，此處改以標記聯合讓非法組合無法表示。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "recurrence", rename_all = "snake_case")]
pub enum Recurrence {
    /// 單次捐贈
    Once,
    /// 週期性捐贈範本
    Repeating {
        /// 週期間隔
        interval: RecurrenceInterval,
        /// 頻率倍數（每 freq 個間隔觸發一次）
        freq: u32,
        /// 尚未觸發的排程日期（遞增排序）
        next_dates: Vec<NaiveDate>,
        /// 剩餘觸發次數
        occurrences_remaining: u32,
    },
}

impl Recurrence {
    /// 創建單次捐贈的週期描述
    pub fn once() -> Self {
        Recurrence::Once
    }

    /// 創建週期性捐贈範本（排程日期於此一次算定）
    ///
    /// 第一筆排程為 `start` 推進一個週期後的日期，共 `occurrences` 筆。
    pub fn repeating(
        interval: RecurrenceInterval,
        freq: u32,
        start: NaiveDate,
        occurrences: u32,
    ) -> Result<Self> {
        if freq == 0 {
            return Err(FoodlinkError::InvalidArgument(
                "頻率必須為正整數".to_string(),
            ));
        }
        if occurrences == 0 {
            return Err(FoodlinkError::InvalidArgument(
                "週期次數必須為正整數".to_string(),
            ));
        }

        let mut next_dates = Vec::with_capacity(occurrences as usize);
        let mut current = start;
        for _ in 0..occurrences {
            current = interval.advance(current, freq);
            next_dates.push(current);
        }

        Ok(Recurrence::Repeating {
            interval,
            freq,
            next_dates,
            occurrences_remaining: occurrences,
        })
    }

    /// 由外部欄位組裝週期描述（邊界驗證）
    ///
    /// `kind` 為 once 時不得攜帶任何週期欄位；為 weekly/monthly/yearly
    /// 時三個欄位缺一不可，否則回報 `ConstraintViolation`。
    pub fn from_parts(
        kind: &str,
        freq: Option<u32>,
        next_dates: Option<Vec<NaiveDate>>,
        occurrences_remaining: Option<u32>,
    ) -> Result<Self> {
        let interval = match kind {
            "once" => {
                if freq.is_some() || next_dates.is_some() || occurrences_remaining.is_some() {
                    return Err(FoodlinkError::ConstraintViolation(
                        "單次捐贈不得攜帶週期欄位".to_string(),
                    ));
                }
                return Ok(Recurrence::Once);
            }
            "weekly" => RecurrenceInterval::Weekly,
            "monthly" => RecurrenceInterval::Monthly,
            "yearly" => RecurrenceInterval::Yearly,
            other => {
                return Err(FoodlinkError::InvalidArgument(format!(
                    "未知的週期類型: {}",
                    other
                )));
            }
        };

        let (Some(freq), Some(mut next_dates), Some(occurrences_remaining)) =
            (freq, next_dates, occurrences_remaining)
        else {
            return Err(FoodlinkError::ConstraintViolation(
                "週期性捐贈必須同時指定頻率、排程日期與剩餘次數".to_string(),
            ));
        };

        if freq == 0 {
            return Err(FoodlinkError::InvalidArgument(
                "頻率必須為正整數".to_string(),
            ));
        }

        // 保持遞增排序
        next_dates.sort();

        Ok(Recurrence::Repeating {
            interval,
            freq,
            next_dates,
            occurrences_remaining,
        })
    }

    /// 檢查是否為週期性範本
    pub fn is_repeating(&self) -> bool {
        matches!(self, Recurrence::Repeating { .. })
    }

    /// 檢查範本是否已耗盡（剩餘次數歸零或排程清空）
    ///
    /// 耗盡的範本保持 `Repeating` 形態而不降級為 `Once`，
    /// 排程器對其不再動作。
    pub fn is_exhausted(&self) -> bool {
        match self {
            Recurrence::Once => false,
            Recurrence::Repeating {
                next_dates,
                occurrences_remaining,
                ..
            } => *occurrences_remaining == 0 || next_dates.is_empty(),
        }
    }

    /// 列出截至 `today`（含）已到期的排程日期
    pub fn due_dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        match self {
            Recurrence::Once => Vec::new(),
            Recurrence::Repeating { next_dates, .. } => next_dates
                .iter()
                .copied()
                .filter(|d| *d <= today)
                .collect(),
        }
    }

    /// 消耗一筆已觸發的排程：移除該日期並遞減剩餘次數
    pub fn mark_occurred(&mut self, date: NaiveDate) {
        if let Recurrence::Repeating {
            next_dates,
            occurrences_remaining,
            ..
        } = self
        {
            if let Some(pos) = next_dates.iter().position(|d| *d == date) {
                next_dates.remove(pos);
                *occurrences_remaining = occurrences_remaining.saturating_sub(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekly_advance_spacing() {
        // 每 2 週一次，間隔應為 14 天
        let start = date(2025, 1, 6);
        let next = RecurrenceInterval::Weekly.advance(start, 2);
        assert_eq!(next, date(2025, 1, 20));
    }

    #[test]
    fn test_monthly_advance_clamps_month_end() {
        // 1/31 推進一個月：2 月沒有 31 日，取最後一天
        let start = date(2025, 1, 31);
        let next = RecurrenceInterval::Monthly.advance(start, 1);
        assert_eq!(next, date(2025, 2, 28));
    }

    #[test]
    fn test_yearly_advance() {
        let start = date(2025, 3, 15);
        let next = RecurrenceInterval::Yearly.advance(start, 1);
        assert_eq!(next, date(2026, 3, 15));
    }

    #[test]
    fn test_repeating_precomputes_schedule() {
        let recurrence =
            Recurrence::repeating(RecurrenceInterval::Weekly, 1, date(2025, 1, 6), 3).unwrap();

        let Recurrence::Repeating {
            next_dates,
            occurrences_remaining,
            ..
        } = recurrence
        else {
            panic!("應為週期性範本");
        };

        assert_eq!(
            next_dates,
            vec![date(2025, 1, 13), date(2025, 1, 20), date(2025, 1, 27)]
        );
        assert_eq!(occurrences_remaining, 3);
    }

    #[test]
    fn test_repeating_rejects_zero_freq() {
        let result = Recurrence::repeating(RecurrenceInterval::Weekly, 0, date(2025, 1, 6), 3);
        assert!(matches!(result, Err(FoodlinkError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_parts_once_rejects_stray_fields() {
        let result = Recurrence::from_parts("once", Some(1), None, None);
        assert!(matches!(result, Err(FoodlinkError::ConstraintViolation(_))));

        let ok = Recurrence::from_parts("once", None, None, None).unwrap();
        assert_eq!(ok, Recurrence::Once);
    }

    #[test]
    fn test_from_parts_repeating_requires_all_fields() {
        let result = Recurrence::from_parts("weekly", Some(1), None, Some(3));
        assert!(matches!(result, Err(FoodlinkError::ConstraintViolation(_))));

        let ok = Recurrence::from_parts(
            "weekly",
            Some(1),
            Some(vec![date(2025, 1, 13)]),
            Some(1),
        )
        .unwrap();
        assert!(ok.is_repeating());
    }

    #[test]
    fn test_from_parts_unknown_kind() {
        let result = Recurrence::from_parts("hourly", Some(1), Some(vec![]), Some(1));
        assert!(matches!(result, Err(FoodlinkError::InvalidArgument(_))));
    }

    #[test]
    fn test_due_dates_and_mark_occurred() {
        let mut recurrence =
            Recurrence::repeating(RecurrenceInterval::Weekly, 1, date(2025, 1, 6), 2).unwrap();

        // 第一筆 1/13 到期，第二筆 1/20 尚未到期
        let due = recurrence.due_dates(date(2025, 1, 13));
        assert_eq!(due, vec![date(2025, 1, 13)]);

        recurrence.mark_occurred(date(2025, 1, 13));
        assert!(recurrence.due_dates(date(2025, 1, 13)).is_empty());
        assert!(!recurrence.is_exhausted());

        recurrence.mark_occurred(date(2025, 1, 20));
        assert!(recurrence.is_exhausted());
    }

    #[test]
    fn test_exhausted_stays_repeating() {
        let mut recurrence =
            Recurrence::repeating(RecurrenceInterval::Monthly, 1, date(2025, 1, 1), 1).unwrap();
        recurrence.mark_occurred(date(2025, 2, 1));

        assert!(recurrence.is_repeating());
        assert!(recurrence.is_exhausted());
    }

    #[test]
    fn test_once_is_inert() {
        let recurrence = Recurrence::once();
        assert!(!recurrence.is_repeating());
        assert!(!recurrence.is_exhausted());
        assert!(recurrence.due_dates(date(2030, 1, 1)).is_empty());
    }
}
