//! Return calculator.
//!
//! Pure functions shared by both reconciliation paths; identical inputs
//! must produce identical outputs on the client and the operator side.
//! Payouts truncate rather than round, so a realized return never exceeds
//! the nominal rate.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{VestError, VestResult};

/// Parse a rate token such as `"6%"` or `"0.5%"` into a fraction.
///
/// The trailing percent sign is optional; the numeric part must be a
/// finite non-negative decimal.
pub fn parse_rate(token: &str) -> VestResult<Decimal> {
    let trimmed = token.trim();
    let numeric = trimmed.strip_suffix('%').unwrap_or(trimmed);

    let percent = Decimal::from_str(numeric)
        .map_err(|_| VestError::InvalidRateFormat(token.to_string()))?;

    if percent.is_sign_negative() {
        return Err(VestError::InvalidRateFormat(token.to_string()));
    }

    Ok(percent / Decimal::ONE_HUNDRED)
}

/// Return on a principal: `floor(amount * rate)`
pub fn compute_return(amount: u64, rate: Decimal) -> u64 {
    (Decimal::from(amount) * rate)
        .floor()
        .to_u64()
        .unwrap_or(u64::MAX)
}

/// Principal plus return
pub fn compute_total(amount: u64, rate: Decimal) -> u64 {
    amount + compute_return(amount, rate)
}

/// Projection of a commitment before it is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnsBreakdown {
    pub principal: u64,
    pub return_amount: u64,
    pub total: u64,
}

/// Full breakdown for a prospective amount and rate
pub fn breakdown(amount: u64, rate: Decimal) -> ReturnsBreakdown {
    let return_amount = compute_return(amount, rate);
    ReturnsBreakdown {
        principal: amount,
        return_amount,
        total: amount + return_amount,
    }
}

/// Format a millisecond duration as `"HHh MMm SSs"`.
///
/// Negative input clamps to the zero string; hours do not wrap at 24.
pub fn format_duration(ms: i64) -> String {
    if ms <= 0 {
        return "00h 00m 00s".to_string();
    }

    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{:02}h {:02}m {:02}s", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("1%").unwrap(), Decimal::new(1, 2));
        assert_eq!(parse_rate("24%").unwrap(), Decimal::new(24, 2));
        assert_eq!(parse_rate("0.5%").unwrap(), Decimal::new(5, 3));
        assert_eq!(parse_rate(" 6% ").unwrap(), Decimal::new(6, 2));
        assert_eq!(parse_rate("6").unwrap(), Decimal::new(6, 2));
    }

    #[test]
    fn test_parse_rate_rejects_garbage() {
        for bad in ["", "%", "abc%", "1%%", "-1%", "1e3%"] {
            assert!(
                matches!(parse_rate(bad), Err(VestError::InvalidRateFormat(_))),
                "expected rejection for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_compute_return_truncates() {
        let rate = parse_rate("1%").unwrap();
        assert_eq!(compute_return(1000, rate), 10);
        // 999 * 0.01 = 9.99 -> 9, never rounded up
        assert_eq!(compute_return(999, rate), 9);
        assert_eq!(compute_return(0, rate), 0);
    }

    #[test]
    fn test_conservation() {
        for token in ["1%", "6%", "24%", "0%"] {
            let rate = parse_rate(token).unwrap();
            for amount in [0u64, 1, 999, 1000, 100_000, 1_000_000] {
                assert_eq!(
                    compute_total(amount, rate),
                    amount + compute_return(amount, rate)
                );
            }
        }
    }

    #[test]
    fn test_return_monotonic_in_amount() {
        let rate = parse_rate("6%").unwrap();
        let mut previous = 0;
        for amount in (0..50_000u64).step_by(997) {
            let r = compute_return(amount, rate);
            assert!(r >= previous);
            previous = r;
        }
    }

    #[test]
    fn test_breakdown() {
        let rate = parse_rate("24%").unwrap();
        let b = breakdown(2000, rate);
        assert_eq!(b.principal, 2000);
        assert_eq!(b.return_amount, 480);
        assert_eq!(b.total, 2480);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00h 00m 00s");
        assert_eq!(format_duration(-5000), "00h 00m 00s");
        assert_eq!(format_duration(999), "00h 00m 00s");
        assert_eq!(format_duration(1000), "00h 00m 01s");
        assert_eq!(format_duration(3_600_000), "01h 00m 00s");
        assert_eq!(format_duration(3_661_000), "01h 01m 01s");
        // No 24h wraparound
        assert_eq!(format_duration(90_000_000), "25h 00m 00s");
    }
}
