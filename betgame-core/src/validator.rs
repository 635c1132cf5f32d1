use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

/// 1 SUI expressed in MIST.
pub const MIN_BET_AMOUNT: u64 = 1_000_000_000;
pub const MIN_CHOICE: u8 = 1;
pub const MAX_CHOICE: u8 = 10;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount below minimum")]
    AmountBelowMinimum,

    #[error("choice out of range")]
    ChoiceOutOfRange,
}

/// Client-side wager bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetLimits {
    pub min_amount: u64,
    pub choices: RangeInclusive<u8>,
}

impl Default for BetLimits {
    fn default() -> Self {
        Self {
            min_amount: MIN_BET_AMOUNT,
            choices: MIN_CHOICE..=MAX_CHOICE,
        }
    }
}

/// A wager as entered by the user, amount already in MIST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetRequest {
    pub amount: u64,
    pub choice: i64,
}

impl BetRequest {
    pub fn new(amount: u64, choice: i64) -> Self {
        Self { amount, choice }
    }

    pub fn validate(self, limits: &BetLimits) -> Result<ValidatedBet, ValidationError> {
        validate(&self, limits)
    }
}

/// Only obtainable through [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedBet {
    amount: u64,
    choice: u8,
}

impl ValidatedBet {
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn choice(&self) -> u8 {
        self.choice
    }
}

pub fn validate(request: &BetRequest, limits: &BetLimits) -> Result<ValidatedBet, ValidationError> {
    if request.amount < limits.min_amount {
        return Err(ValidationError::AmountBelowMinimum);
    }

    let choice = u8::try_from(request.choice).map_err(|_| ValidationError::ChoiceOutOfRange)?;
    if !limits.choices.contains(&choice) {
        return Err(ValidationError::ChoiceOutOfRange);
    }

    Ok(ValidatedBet {
        amount: request.amount,
        choice,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_below_minimum() {
        let limits = BetLimits::default();
        for amount in [0, 1, 500_000_000, MIN_BET_AMOUNT - 1] {
            let err = validate(&BetRequest::new(amount, 3), &limits).unwrap_err();
            assert_eq!(err, ValidationError::AmountBelowMinimum);
            assert_eq!(err.to_string(), "amount below minimum");
        }
    }

    #[test]
    fn test_choice_out_of_range() {
        let limits = BetLimits::default();
        for choice in [i64::MIN, -1, 0, 11, 255, 256, i64::MAX] {
            let err = validate(&BetRequest::new(MIN_BET_AMOUNT, choice), &limits).unwrap_err();
            assert_eq!(err, ValidationError::ChoiceOutOfRange);
            assert_eq!(err.to_string(), "choice out of range");
        }
    }

    #[test]
    fn test_amount_checked_before_choice() {
        let err = validate(&BetRequest::new(1, 42), &BetLimits::default()).unwrap_err();
        assert_eq!(err, ValidationError::AmountBelowMinimum);
    }

    #[test]
    fn test_valid_bounds() {
        let limits = BetLimits::default();
        for choice in 1..=10 {
            let bet = validate(&BetRequest::new(MIN_BET_AMOUNT, choice), &limits).unwrap();
            assert_eq!(bet.amount(), MIN_BET_AMOUNT);
            assert_eq!(i64::from(bet.choice()), choice);
        }
        let bet = validate(&BetRequest::new(u64::MAX, 10), &limits).unwrap();
        assert_eq!(bet.amount(), u64::MAX);
    }

    #[test]
    fn test_custom_limits() {
        let limits = BetLimits {
            min_amount: 10,
            choices: 1..=6,
        };
        assert!(BetRequest::new(10, 6).validate(&limits).is_ok());
        assert_eq!(
            BetRequest::new(10, 7).validate(&limits),
            Err(ValidationError::ChoiceOutOfRange)
        );
    }
}
