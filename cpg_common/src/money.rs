use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const ARS_CURRENCY_CODE: &str = "ARS";

//--------------------------------------        Money        ---------------------------------------------------------

/// A monetary amount in integer centavos. All arithmetic and storage happens in centavos; pesos only appear at the
/// gateway boundary, which talks in floating-point peso amounts.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Money(i64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, AddAssign, add_assign);
op!(unary Money, Neg, neg);

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in centavos: {0}")]
pub struct MoneyConversionError(String);

impl From<i64> for Money {
    fn from(centavos: i64) -> Self {
        Self(centavos)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl TryFrom<f64> for Money {
    type Error = MoneyConversionError;

    /// Converts a peso amount from the gateway into centavos, rejecting non-finite and out-of-range values.
    fn try_from(pesos: f64) -> Result<Self, Self::Error> {
        if !pesos.is_finite() {
            return Err(MoneyConversionError(format!("{pesos} is not a finite amount")));
        }
        let centavos = (pesos * 100.0).round();
        if centavos < i64::MIN as f64 || centavos > i64::MAX as f64 {
            return Err(MoneyConversionError(format!("{pesos} pesos does not fit in an i64 of centavos")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(centavos as i64))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl Money {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_centavos(centavos: i64) -> Self {
        Self(centavos)
    }

    pub fn from_pesos(pesos: i64) -> Self {
        Self(pesos * 100)
    }

    /// The peso value the gateway wire format expects.
    pub fn to_pesos(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn peso_conversions_round_to_the_nearest_centavo() {
        assert_eq!(Money::try_from(100.0).unwrap(), Money::from_pesos(100));
        assert_eq!(Money::try_from(1234.56).unwrap(), Money::from_centavos(123_456));
        assert_eq!(Money::try_from(0.016).unwrap(), Money::from_centavos(2));
        assert_eq!(Money::try_from(-2.5).unwrap(), Money::from_centavos(-250));
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        assert!(Money::try_from(f64::NAN).is_err());
        assert!(Money::try_from(f64::INFINITY).is_err());
        assert!(Money::try_from(1e300).is_err());
    }

    #[test]
    fn arithmetic_and_totals() {
        let shirt = Money::from_pesos(100);
        let socks = Money::from_centavos(2_550);
        assert_eq!(shirt + socks, Money::from_centavos(12_550));
        assert_eq!(shirt - socks, Money::from_centavos(7_450));
        assert_eq!(shirt * 3, Money::from_pesos(300));
        let total: Money = [shirt, socks, socks].into_iter().sum();
        assert_eq!(total, Money::from_centavos(15_100));
    }

    #[test]
    fn display_in_pesos() {
        assert_eq!(Money::from_centavos(123_456).to_string(), "$1234.56");
        assert_eq!(Money::from_centavos(5).to_string(), "$0.05");
        assert_eq!(Money::from_centavos(-205).to_string(), "-$2.05");
    }
}
