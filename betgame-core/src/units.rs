//! MIST <-> SUI conversion for display and input.
//!
//! Amounts inside the client are always MIST. Only presentation code should
//! call into this module.

use crate::error::{BetGameError, Result};

pub const MIST_PER_SUI: u64 = 1_000_000_000;
const DECIMALS: usize = 9;

/// `1_500_000_000` -> `"1.5 SUI"`, `2_000_000_000` -> `"2 SUI"`.
pub fn format_mist(mist: u64) -> String {
    let whole = mist / MIST_PER_SUI;
    let frac = mist % MIST_PER_SUI;

    if frac == 0 {
        return format!("{} SUI", whole);
    }

    let frac = format!("{:0width$}", frac, width = DECIMALS);
    format!("{}.{} SUI", whole, frac.trim_end_matches('0'))
}

/// Parses a whole-coin amount such as `"1.5"` into MIST.
pub fn parse_sui(input: &str) -> Result<u64> {
    let input = input.trim();
    let input = input
        .strip_suffix("SUI")
        .or_else(|| input.strip_suffix("sui"))
        .unwrap_or(input)
        .trim();

    let (whole, frac) = match input.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (input, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(BetGameError::config(format!("Invalid SUI amount: '{}'", input)));
    }

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !digits_only(whole) || !digits_only(frac) {
        return Err(BetGameError::config(format!("Invalid SUI amount: '{}'", input)));
    }

    if frac.len() > DECIMALS {
        return Err(BetGameError::config(format!(
            "SUI amounts have at most {} decimals: '{}'",
            DECIMALS, input
        )));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| BetGameError::config(format!("SUI amount too large: '{}'", input)))?
    };
    let frac: u64 = format!("{:0<width$}", frac, width = DECIMALS)
        .parse()
        .map_err(|_| BetGameError::config(format!("Invalid SUI amount: '{}'", input)))?;

    whole
        .checked_mul(MIST_PER_SUI)
        .and_then(|mist| mist.checked_add(frac))
        .ok_or_else(|| BetGameError::config(format!("SUI amount too large: '{}'", input)))
}
