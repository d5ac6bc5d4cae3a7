//! Scheme and application types.
//!
//! A scheme is a product template: rate, duration and commitment bounds.
//! Its application list is an append-only history kept for reporting; it
//! survives archiving and the withdrawal of the related investments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::SchemeId;

/// Application status as recorded on the scheme history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Active,
    Withdrawn,
}

/// Historical record of one commitment event, attached to a scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: u64,
    /// Display name of the committing user at application time
    pub investor_name: String,
    pub amount: u64,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Investment product template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub name: String,
    pub description: String,
    /// Lock duration in minutes, always > 0
    pub duration_minutes: u32,
    /// Rate token such as `"6%"`; parsed on use, never stored numerically
    pub return_rate: String,
    pub min_amount: u64,
    pub max_amount: u64,
    pub is_live: bool,
    pub created_at: DateTime<Utc>,
    /// Append-only commitment history
    pub applications: Vec<Application>,
}

impl Scheme {
    /// Check whether an amount lies within the commitment bounds
    pub fn accepts_amount(&self, amount: u64) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }

    /// Total amount ever committed to this scheme
    pub fn total_committed(&self) -> u64 {
        self.applications.iter().map(|a| a.amount).sum()
    }

    /// Lock duration in milliseconds
    pub fn duration_ms(&self) -> i64 {
        i64::from(self.duration_minutes) * 60_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> Scheme {
        Scheme {
            id: SchemeId::new(1),
            name: "1 Hour Boost".to_string(),
            description: "Quick 1% return in just 60 minutes".to_string(),
            duration_minutes: 60,
            return_rate: "1%".to_string(),
            min_amount: 1000,
            max_amount: 100_000,
            is_live: true,
            created_at: Utc::now(),
            applications: Vec::new(),
        }
    }

    #[test]
    fn test_amount_bounds() {
        let s = scheme();
        assert!(s.accepts_amount(1000));
        assert!(s.accepts_amount(100_000));
        assert!(!s.accepts_amount(999));
        assert!(!s.accepts_amount(100_001));
    }

    #[test]
    fn test_duration_ms() {
        assert_eq!(scheme().duration_ms(), 3_600_000);
    }

    #[test]
    fn test_total_committed() {
        let mut s = scheme();
        assert_eq!(s.total_committed(), 0);
        s.applications.push(Application {
            id: 1,
            investor_name: "Alice Johnson".to_string(),
            amount: 10_000,
            status: ApplicationStatus::Active,
            applied_at: Utc::now(),
        });
        s.applications.push(Application {
            id: 2,
            investor_name: "Bob Smith".to_string(),
            amount: 5000,
            status: ApplicationStatus::Withdrawn,
            applied_at: Utc::now(),
        });
        assert_eq!(s.total_committed(), 15_000);
    }
}
