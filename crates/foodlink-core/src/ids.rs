//! 識別碼類型
//!
//! 所有實體識別碼皆為儲存層指派的序號（大於 0 才有效），
//! 以強型別包裝避免在呼叫端互相混用。

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// 創建新的識別碼
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// 取得原始序號
            pub fn get(self) -> i64 {
                self.0
            }

            /// 檢查序號是否有效（必須大於 0）
            pub fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// 製造商ID
    ManufacturerId
);
entity_id!(
    /// 食物銀行ID
    PantryId
);
entity_id!(
    /// 捐贈ID
    DonationId
);
entity_id!(
    /// 捐贈品項ID
    DonationItemId
);
entity_id!(
    /// 食物需求ID
    RequestId
);
entity_id!(
    /// 訂單ID
    OrderId
);
entity_id!(
    /// 分配ID
    AllocationId
);
