//! 排程器配置模型

use serde::{Deserialize, Serialize};

/// 週期性捐贈排程器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// 是否補建所有已到期的排程
    /// - true: 排程器停擺數日後，下次執行會補齊每個範本所有錯過的捐贈（預設）
    /// - false: 每次執行對每個範本最多處理最早的一筆到期排程
    pub catch_up: bool,

    /// 單次執行可建立的捐贈數上限
    ///
    /// `None` 表示不設限；達到上限時本次執行提前結束，
    /// 未處理的排程保持到期狀態，留待下次執行。
    pub max_per_run: Option<usize>,
}

impl SchedulerConfig {
    /// 創建新的排程器配置（預設補建、不限量）
    pub fn new() -> Self {
        Self {
            catch_up: true,
            max_per_run: None,
        }
    }

    /// 建構器模式：設置是否補建錯過的排程
    pub fn with_catch_up(mut self, catch_up: bool) -> Self {
        self.catch_up = catch_up;
        self
    }

    /// 建構器模式：設置單次執行上限
    pub fn with_max_per_run(mut self, max: usize) -> Self {
        self.max_per_run = Some(max);
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchedulerConfig::default();
        assert!(config.catch_up);
        assert!(config.max_per_run.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = SchedulerConfig::new()
            .with_catch_up(false)
            .with_max_per_run(50);

        assert!(!config.catch_up);
        assert_eq!(config.max_per_run, Some(50));
    }
}
