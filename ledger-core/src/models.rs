mod account;
mod input;
mod money;
mod order;
mod transfer;

pub use account::{AccountRecord, NewAccount};
pub use input::InvalidInput;
pub use money::{Amount, Balance, MoneyError, MoneyParseError};
pub use order::{NewOrder, OrderRecord};
pub use transfer::{TransferOutcome, TransferRequest, ValidTransfer};

macro_rules! new_id {
    ($struct:ident, $doc:literal) => {
        #[doc = $doc]
        #[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $struct(pub i64);

        impl $struct {
            /// The raw integer key
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $struct {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for i64 {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $struct {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

new_id!(
    AccountId,
    "Store-assigned identifier of an account. Ids are totally ordered, which fixes the order in which accounts are locked."
);
new_id!(OrderId, "Store-assigned identifier of an order");
