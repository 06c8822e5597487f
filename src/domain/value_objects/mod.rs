//! Value Objects for the storefront

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.trim().to_uppercase() } }
    pub fn usd(amount: Decimal) -> Self { Self::new(amount, "USD") }
    pub fn zero(currency: &str) -> Self { Self::new(Decimal::ZERO, currency) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn is_zero(&self) -> bool { self.amount.is_zero() }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch { expected: self.currency.clone(), found: other.currency.clone() });
        }
        let amount = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Money::new(amount, &self.currency))
    }
    pub fn multiply(&self, qty: u32) -> Result<Money, MoneyError> {
        let amount = self.amount.checked_mul(Decimal::from(qty)).ok_or(MoneyError::Overflow)?;
        Ok(Money::new(amount, &self.currency))
    }
}

impl Default for Money { fn default() -> Self { Self::zero("USD") } }

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{} {:.2}", self.currency, self.amount) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },
    #[error("amount out of range")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_money_add() {
        let a = Money::usd(Decimal::new(100, 0));
        let b = Money::usd(Decimal::new(50, 0));
        assert_eq!(a.add(&b).unwrap().amount(), Decimal::new(150, 0));
    }
    #[test]
    fn test_money_add_rejects_other_currency() {
        let a = Money::usd(Decimal::new(100, 0));
        let b = Money::new(Decimal::new(50, 0), "eur");
        assert_eq!(
            a.add(&b),
            Err(MoneyError::CurrencyMismatch { expected: "USD".into(), found: "EUR".into() })
        );
    }
    #[test]
    fn test_money_multiply_and_display() {
        let m = Money::usd(Decimal::new(1999, 2)).multiply(3).unwrap();
        assert_eq!(m.amount(), Decimal::new(5997, 2));
        assert_eq!(m.to_string(), "USD 59.97");
    }
    #[test]
    fn test_money_arithmetic_reports_overflow() {
        let max = Money::usd(Decimal::MAX);
        assert_eq!(max.multiply(2), Err(MoneyError::Overflow));
        assert_eq!(max.add(&Money::usd(Decimal::ONE)), Err(MoneyError::Overflow));
        assert_eq!(max.multiply(1).unwrap().amount(), Decimal::MAX);
    }
}
