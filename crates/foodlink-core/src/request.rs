//! 食物需求模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::food_type::FoodType;
use crate::ids::{PantryId, RequestId};
use crate::{FoodlinkError, Result};

/// 需求規模級距
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedSize {
    /// 小型
    Small,
    /// 中型
    Medium,
    /// 大型
    Large,
    /// 特大型
    ExtraLarge,
}

impl RequestedSize {
    /// 取得字串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestedSize::Small => "small",
            RequestedSize::Medium => "medium",
            RequestedSize::Large => "large",
            RequestedSize::ExtraLarge => "extra_large",
        }
    }
}

impl fmt::Display for RequestedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestedSize {
    type Err = FoodlinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small" => Ok(RequestedSize::Small),
            "medium" => Ok(RequestedSize::Medium),
            "large" => Ok(RequestedSize::Large),
            "extra_large" => Ok(RequestedSize::ExtraLarge),
            other => Err(FoodlinkError::InvalidArgument(format!(
                "未知的需求規模: {}",
                other
            ))),
        }
    }
}

/// 食物需求
///
/// 食物銀行提交的需求單；`requested_food_types` 為媒合比對的
/// 依據，收貨欄位在確認收貨前保持空白。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodRequest {
    /// 需求ID
    pub id: RequestId,

    /// 提交需求的食物銀行ID
    pub pantry_id: PantryId,

    /// 需求規模
    pub requested_size: RequestedSize,

    /// 需求的食物類型集合
    pub requested_food_types: HashSet<FoodType>,

    /// 補充說明
    pub additional_information: Option<String>,

    /// 提交時間
    pub requested_at: DateTime<Utc>,

    /// 收貨確認時間
    pub date_received: Option<DateTime<Utc>>,

    /// 收貨回饋
    pub feedback: Option<String>,

    /// 收貨照片（外部儲存的參照）
    pub photos: Vec<String>,
}

impl FoodRequest {
    /// 創建新的食物需求
    pub fn new(
        id: RequestId,
        pantry_id: PantryId,
        requested_size: RequestedSize,
        requested_food_types: HashSet<FoodType>,
        requested_at: DateTime<Utc>,
    ) -> Result<Self> {
        if requested_food_types.is_empty() {
            return Err(FoodlinkError::InvalidArgument(
                "需求必須至少指定一種食物類型".to_string(),
            ));
        }

        Ok(Self {
            id,
            pantry_id,
            requested_size,
            requested_food_types,
            additional_information: None,
            requested_at,
            date_received: None,
            feedback: None,
            photos: Vec::new(),
        })
    }

    /// 建構器模式：設置補充說明
    pub fn with_additional_information(mut self, info: String) -> Self {
        self.additional_information = Some(info);
        self
    }

    /// 檢查食物類型是否在需求集合內
    pub fn wants(&self, food_type: FoodType) -> bool {
        self.requested_food_types.contains(&food_type)
    }

    /// 寫入收貨確認欄位
    pub fn record_delivery(
        &mut self,
        received_at: DateTime<Utc>,
        feedback: Option<String>,
        photos: Vec<String>,
    ) {
        self.date_received = Some(received_at);
        self.feedback = feedback;
        self.photos = photos;
    }

    /// 檢查是否已確認收貨
    pub fn is_received(&self) -> bool {
        self.date_received.is_some()
    }
}
