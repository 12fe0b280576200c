//! 參與方模型
//!
//! 製造商與食物銀行的帳號、驗證與個資由外部系統管理，
//! 此處僅保留媒合與訂單流程需要的欄位。

use serde::{Deserialize, Serialize};

use crate::ids::{ManufacturerId, PantryId};

/// 製造商（捐贈方）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manufacturer {
    /// 製造商ID
    pub id: ManufacturerId,

    /// 名稱
    pub name: String,
}

impl Manufacturer {
    /// 創建新的製造商
    pub fn new(id: ManufacturerId, name: String) -> Self {
        Self { id, name }
    }
}

/// 食物銀行（受贈方）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pantry {
    /// 食物銀行ID
    pub id: PantryId,

    /// 名稱
    pub name: String,
}

impl Pantry {
    /// 創建新的食物銀行
    pub fn new(id: PantryId, name: String) -> Self {
        Self { id, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_parties() {
        let manufacturer = Manufacturer::new(ManufacturerId::new(1), "統一食品".to_string());
        let pantry = Pantry::new(PantryId::new(1), "南區食物銀行".to_string());

        assert_eq!(manufacturer.name, "統一食品");
        assert_eq!(pantry.id.get(), 1);
    }
}
