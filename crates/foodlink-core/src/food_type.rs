//! 食物類型詞彙表

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::FoodlinkError;

/// 食物類型
///
/// 平台僅接受此封閉詞彙表；外部字串一律在邊界經 [`FromStr`]
/// 驗證轉為強型別，內部流程不再攜帶裸字串。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodType {
    /// 燕麥脆穀
    Granola,
    /// 早餐穀片
    Cereal,
    /// 義大利麵
    Pasta,
    /// 米
    Rice,
    /// 罐頭蔬菜
    CannedVegetables,
    /// 罐頭水果
    CannedFruit,
    /// 罐頭蛋白質（肉、魚、豆類）
    CannedProtein,
    /// 花生醬
    PeanutButter,
    /// 果乾
    DriedFruit,
    /// 堅果
    Nuts,
    /// 零食
    Snacks,
    /// 飲品
    Beverages,
}

impl FoodType {
    /// 完整詞彙表（依宣告順序）
    pub const ALL: [FoodType; 12] = [
        FoodType::Granola,
        FoodType::Cereal,
        FoodType::Pasta,
        FoodType::Rice,
        FoodType::CannedVegetables,
        FoodType::CannedFruit,
        FoodType::CannedProtein,
        FoodType::PeanutButter,
        FoodType::DriedFruit,
        FoodType::Nuts,
        FoodType::Snacks,
        FoodType::Beverages,
    ];

    /// 取得字串表示（與序列化格式一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Granola => "granola",
            FoodType::Cereal => "cereal",
            FoodType::Pasta => "pasta",
            FoodType::Rice => "rice",
            FoodType::CannedVegetables => "canned_vegetables",
            FoodType::CannedFruit => "canned_fruit",
            FoodType::CannedProtein => "canned_protein",
            FoodType::PeanutButter => "peanut_butter",
            FoodType::DriedFruit => "dried_fruit",
            FoodType::Nuts => "nuts",
            FoodType::Snacks => "snacks",
            FoodType::Beverages => "beverages",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodType {
    type Err = FoodlinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoodType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| FoodlinkError::InvalidArgument(format!("未知的食物類型: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_roundtrip() {
        for food_type in FoodType::ALL {
            let parsed: FoodType = food_type.as_str().parse().unwrap();
            assert_eq!(parsed, food_type);
        }
    }

    #[test]
    fn test_unknown_string_rejected() {
        let result = "gravel".parse::<FoodType>();
        assert!(matches!(result, Err(FoodlinkError::InvalidArgument(_))));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&FoodType::CannedVegetables).unwrap();
        assert_eq!(json, "\"canned_vegetables\"");

        let back: FoodType = serde_json::from_str("\"peanut_butter\"").unwrap();
        assert_eq!(back, FoodType::PeanutButter);
    }

    #[test]
    fn test_vocabulary_is_complete() {
        assert_eq!(FoodType::ALL.len(), 12);
    }
}
