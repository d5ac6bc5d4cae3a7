//! Demo catalog seed data.

use chrono::{DateTime, Utc};

use vestlock_core::types::{Application, ApplicationStatus, Scheme, SchemeId};
use vestlock_core::SchemeCatalog;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap_or_else(|_| Utc::now())
}

/// The demo scheme catalog: two live products and one archived, with a
/// seeded application history for reporting views.
pub fn demo_catalog() -> SchemeCatalog {
    let schemes = vec![
        Scheme {
            id: SchemeId::new(1),
            name: "1 Hour Boost".to_string(),
            description: "Quick 1% return in just 60 minutes".to_string(),
            duration_minutes: 60,
            return_rate: "1%".to_string(),
            min_amount: 1000,
            max_amount: 100_000,
            is_live: true,
            created_at: ts("2024-01-01T09:00:00Z"),
            applications: vec![
                Application {
                    id: 1,
                    investor_name: "Alice Johnson".to_string(),
                    amount: 10_000,
                    status: ApplicationStatus::Withdrawn,
                    applied_at: ts("2024-01-15T10:00:00Z"),
                },
                Application {
                    id: 2,
                    investor_name: "Bob Smith".to_string(),
                    amount: 5000,
                    status: ApplicationStatus::Pending,
                    applied_at: ts("2024-01-15T11:30:00Z"),
                },
                Application {
                    id: 3,
                    investor_name: "Carol Davis".to_string(),
                    amount: 15_000,
                    status: ApplicationStatus::Active,
                    applied_at: ts("2024-01-15T12:15:00Z"),
                },
            ],
        },
        Scheme {
            id: SchemeId::new(2),
            name: "6 Hour Growth".to_string(),
            description: "Enhanced 6% return over 6 hours".to_string(),
            duration_minutes: 360,
            return_rate: "6%".to_string(),
            min_amount: 5000,
            max_amount: 500_000,
            is_live: false,
            created_at: ts("2023-10-01T09:00:00Z"),
            applications: vec![
                Application {
                    id: 1,
                    investor_name: "David Wilson".to_string(),
                    amount: 25_000,
                    status: ApplicationStatus::Active,
                    applied_at: ts("2024-01-15T08:00:00Z"),
                },
                Application {
                    id: 2,
                    investor_name: "Eva Martinez".to_string(),
                    amount: 50_000,
                    status: ApplicationStatus::Pending,
                    applied_at: ts("2024-01-15T09:45:00Z"),
                },
            ],
        },
        Scheme {
            id: SchemeId::new(3),
            name: "1 Hour Premium".to_string(),
            description: "Premium 24% return over 1 hour".to_string(),
            duration_minutes: 60,
            return_rate: "24%".to_string(),
            min_amount: 10_000,
            max_amount: 1_000_000,
            is_live: true,
            created_at: ts("2024-01-01T09:00:00Z"),
            applications: vec![Application {
                id: 1,
                investor_name: "Frank Brown".to_string(),
                amount: 100_000,
                status: ApplicationStatus::Withdrawn,
                applied_at: ts("2024-01-14T12:00:00Z"),
            }],
        },
    ];

    SchemeCatalog::with_schemes(schemes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_shape() {
        let catalog = demo_catalog();
        let stats = catalog.stats();
        assert_eq!(stats.total_schemes, 3);
        assert_eq!(stats.live_schemes, 2);
        assert_eq!(stats.total_applications, 6);
        assert_eq!(stats.total_committed, 205_000);
        // Archived scheme is invisible to the commit path
        assert!(catalog.get_live(SchemeId::new(2)).is_none());
        assert!(catalog.get(SchemeId::new(2)).is_some());
    }

    #[test]
    fn test_new_scheme_gets_next_id() {
        let mut catalog = demo_catalog();
        let id = catalog.create(
            vestlock_core::SchemeDraft {
                name: "2 Hour Quick".to_string(),
                description: "Fast growth".to_string(),
                duration_minutes: 120,
                return_rate: "2%".to_string(),
                min_amount: 1000,
                max_amount: 100_000,
                is_live: true,
            },
            Utc::now(),
        );
        assert_eq!(id, SchemeId::new(4));
    }
}
