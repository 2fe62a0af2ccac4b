//! Raw on-chain amounts and their display form.
//!
//! [`AmountWei`] is the only type that does arithmetic. [`AmountEther`] is
//! produced from it at the presentation boundary and can only be shown.

use std::fmt;

use alloy::primitives::U256;
use bigdecimal::num_bigint::{BigInt, Sign};
use bigdecimal::BigDecimal;

/// Decimals between wei and ether.
pub const ETHER_DECIMALS: i64 = 18;

/// An amount in wei.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AmountWei(pub U256);

impl AmountWei {
    pub const ZERO: Self = Self(U256::ZERO);

    /// `None` past `U256::MAX`. There is no `+`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl From<U256> for AmountWei {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u128> for AmountWei {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for AmountWei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount in ether, for display only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmountEther(BigDecimal);

impl fmt::Display for AmountEther {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (digits, scale) = self.0.as_bigint_and_exponent();
        let scale = usize::try_from(scale).unwrap_or_default();
        let digits = digits.magnitude().to_string();
        if scale == 0 {
            return f.write_str(&digits);
        }
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (whole, frac) = padded.split_at(padded.len() - scale);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            f.write_str(whole)
        } else {
            write!(f, "{whole}.{frac}")
        }
    }
}

pub fn u256_to_bigint(value: &U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>())
}

/// Scales wei down by 10^18. Exact for every `U256`.
pub fn to_display_amount(value: AmountWei) -> AmountEther {
    AmountEther(BigDecimal::new(u256_to_bigint(&value.0), ETHER_DECIMALS))
}
