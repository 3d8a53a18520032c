use rust_decimal::Decimal;
use std::fmt::Display;

/// Money values that failed their invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    /// Amounts have to be strictly positive
    #[error("amount {0} must be greater than zero")]
    NotPositive(Decimal),
    /// Balances cannot go below zero
    #[error("balance {0} must not be negative")]
    Negative(Decimal),
}

/// A strictly positive quantity of money, as moved by a transfer, a credit
/// or recorded on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Decimal", into = "Decimal")
)]
pub struct Amount(Decimal);

impl Amount {
    /// Wrap `value`, rejecting zero and negative quantities.
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(MoneyError::NotPositive(value))
        }
    }

    /// The underlying decimal
    pub fn value(self) -> Decimal {
        self.0
    }
}

/// The funds held by an account. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Decimal", into = "Decimal")
)]
pub struct Balance(Decimal);

impl Balance {
    /// An empty account
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap `value`, rejecting negative quantities.
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if !value.is_sign_negative() {
            Ok(Self(value))
        } else if value.is_zero() {
            // keep the scale, drop the sign
            Ok(Self(value.abs()))
        } else {
            Err(MoneyError::Negative(value))
        }
    }

    /// The underlying decimal
    pub fn value(self) -> Decimal {
        self.0
    }

    /// Whether `amount` can be taken out of this balance.
    pub fn covers(self, amount: Amount) -> bool {
        self.0 >= amount.0
    }

    /// Add a signed `delta`.
    ///
    /// Returns `None` if the result would be negative or does not fit in a
    /// decimal.
    pub fn apply(self, delta: Decimal) -> Option<Self> {
        self.0
            .checked_add(delta)
            .and_then(|value| Self::new(value).ok())
    }

    /// Remove `amount`, or `None` if the funds do not cover it.
    pub fn debit(self, amount: Amount) -> Option<Self> {
        self.apply(-amount.0)
    }

    /// Add `amount`, or `None` on overflow.
    pub fn credit(self, amount: Amount) -> Option<Self> {
        self.apply(amount.0)
    }
}

macro_rules! decimal_newtype {
    ($struct:ident) => {
        impl TryFrom<Decimal> for $struct {
            type Error = MoneyError;

            fn try_from(value: Decimal) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$struct> for Decimal {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl std::str::FromStr for $struct {
            type Err = MoneyParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s.trim().parse::<Decimal>()?)?)
            }
        }

        impl Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        #[cfg(feature = "schemars")]
        impl schemars::JsonSchema for $struct {
            fn schema_name() -> std::borrow::Cow<'static, str> {
                stringify!($struct).into()
            }

            fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
                <Decimal as schemars::JsonSchema>::json_schema(generator)
            }
        }
    };
}

decimal_newtype!(Amount);
decimal_newtype!(Balance);

/// Failure to read money from text, either because the text is not a decimal
/// or because the decimal breaks the invariant of the target type.
#[derive(Debug, thiserror::Error)]
pub enum MoneyParseError {
    /// Not a decimal number
    #[error("invalid decimal: {0}")]
    Decimal(#[from] rust_decimal::Error),
    /// A decimal, but not a valid amount or balance
    #[error(transparent)]
    Invariant(#[from] MoneyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amounts_must_be_positive() {
        assert!(Amount::new(dec!(0.01)).is_ok());
        assert_eq!(
            Amount::new(Decimal::ZERO),
            Err(MoneyError::NotPositive(Decimal::ZERO))
        );
        assert_eq!(
            Amount::new(dec!(-5)),
            Err(MoneyError::NotPositive(dec!(-5)))
        );
    }

    #[test]
    fn balances_reject_negative_values() {
        assert_eq!(Balance::new(Decimal::ZERO), Ok(Balance::ZERO));
        assert_eq!(Balance::new(dec!(-0.01)), Err(MoneyError::Negative(dec!(-0.01))));
        let zero = Balance::new(-dec!(0.00)).unwrap();
        assert!(!zero.value().is_sign_negative());
        assert_eq!(zero.to_string(), "0.00");
    }

    #[test]
    fn debit_stops_at_zero() {
        let balance = Balance::new(dec!(10)).unwrap();
        let ten = Amount::new(dec!(10)).unwrap();
        let eleven = Amount::new(dec!(11)).unwrap();

        assert_eq!(balance.debit(ten), Some(Balance::ZERO));
        assert_eq!(balance.debit(eleven), None);
        assert!(balance.covers(ten));
        assert!(!balance.covers(eleven));
    }

    #[test]
    fn credit_detects_overflow() {
        let full = Balance::new(Decimal::MAX).unwrap();
        let one = Amount::new(Decimal::ONE).unwrap();
        assert_eq!(full.credit(one), None);
    }

    #[test]
    fn parses_from_text() {
        assert_eq!(
            " 12.50 ".parse::<Amount>().unwrap().value(),
            dec!(12.50)
        );
        assert!(matches!(
            "abc".parse::<Balance>(),
            Err(MoneyParseError::Decimal(_))
        ));
        assert!(matches!(
            "-1".parse::<Balance>(),
            Err(MoneyParseError::Invariant(MoneyError::Negative(_)))
        ));
    }

    #[test]
    fn serializes_as_decimal_text() {
        let amount = Amount::new(dec!(1.25)).unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"1.25\"");

        let parsed: Amount = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(parsed.value(), dec!(3));

        assert!(serde_json::from_str::<Amount>("\"-3\"").is_err());
    }
}
