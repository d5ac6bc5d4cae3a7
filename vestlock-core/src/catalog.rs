//! Scheme catalog.
//!
//! Owned registry of investment products, mutated only through operator
//! actions. Schemes are archived, never deleted; identifiers are never
//! reused. Mutations are total: an unknown identifier is a no-op, since
//! the input is operator-trusted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{Application, Scheme, SchemeId};

/// Fields supplied when creating a scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeDraft {
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub return_rate: String,
    pub min_amount: u64,
    pub max_amount: u64,
    pub is_live: bool,
}

/// Mutable-field replacement for an existing scheme.
///
/// The identifier and the application history are never part of a patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemePatch {
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    pub return_rate: String,
    pub min_amount: u64,
    pub max_amount: u64,
    pub is_live: bool,
}

/// Aggregates over the whole catalog for the operator overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total_schemes: usize,
    pub live_schemes: usize,
    pub total_applications: usize,
    pub total_committed: u64,
}

/// Editable list of scheme entities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemeCatalog {
    schemes: Vec<Scheme>,
}

impl SchemeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from pre-existing schemes (seed data)
    pub fn with_schemes(schemes: Vec<Scheme>) -> Self {
        Self { schemes }
    }

    /// Create a scheme, assigning the next identifier (max existing + 1)
    /// and an empty application history.
    pub fn create(&mut self, draft: SchemeDraft, now: DateTime<Utc>) -> SchemeId {
        let next = self
            .schemes
            .iter()
            .map(|s| s.id.value())
            .max()
            .unwrap_or(0)
            + 1;
        let id = SchemeId::new(next);

        self.schemes.push(Scheme {
            id,
            name: draft.name,
            description: draft.description,
            duration_minutes: draft.duration_minutes,
            return_rate: draft.return_rate,
            min_amount: draft.min_amount,
            max_amount: draft.max_amount,
            is_live: draft.is_live,
            created_at: now,
            applications: Vec::new(),
        });

        info!(scheme_id = %id, "Scheme created");
        id
    }

    /// Flip the live flag; archiving keeps the application history intact.
    /// Returns false if the id is unknown.
    pub fn toggle_live(&mut self, id: SchemeId) -> bool {
        match self.schemes.iter_mut().find(|s| s.id == id) {
            Some(scheme) => {
                scheme.is_live = !scheme.is_live;
                info!(scheme_id = %id, is_live = scheme.is_live, "Scheme live flag toggled");
                true
            }
            None => false,
        }
    }

    /// Replace the mutable fields of a scheme. Returns false if the id is
    /// unknown. In-flight investments are unaffected: they carry their own
    /// rate/duration snapshots.
    pub fn edit(&mut self, id: SchemeId, patch: SchemePatch) -> bool {
        match self.schemes.iter_mut().find(|s| s.id == id) {
            Some(scheme) => {
                scheme.name = patch.name;
                scheme.description = patch.description;
                scheme.duration_minutes = patch.duration_minutes;
                scheme.return_rate = patch.return_rate;
                scheme.min_amount = patch.min_amount;
                scheme.max_amount = patch.max_amount;
                scheme.is_live = patch.is_live;
                info!(scheme_id = %id, "Scheme edited");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: SchemeId) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.id == id)
    }

    /// Look up a scheme only if it is currently live
    pub fn get_live(&self, id: SchemeId) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.id == id && s.is_live)
    }

    pub fn live_schemes(&self) -> impl Iterator<Item = &Scheme> {
        self.schemes.iter().filter(|s| s.is_live)
    }

    pub fn archived_schemes(&self) -> impl Iterator<Item = &Scheme> {
        self.schemes.iter().filter(|s| !s.is_live)
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    /// Append a commitment record to a scheme's history
    pub fn record_application(&mut self, id: SchemeId, application: Application) {
        if let Some(scheme) = self.schemes.iter_mut().find(|s| s.id == id) {
            scheme.applications.push(application);
        }
    }

    /// Next application identifier for a scheme (max existing + 1)
    pub fn next_application_id(&self, id: SchemeId) -> u64 {
        self.get(id)
            .map(|s| s.applications.iter().map(|a| a.id).max().unwrap_or(0) + 1)
            .unwrap_or(1)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            total_schemes: self.schemes.len(),
            live_schemes: self.schemes.iter().filter(|s| s.is_live).count(),
            total_applications: self.schemes.iter().map(|s| s.applications.len()).sum(),
            total_committed: self.schemes.iter().map(|s| s.total_committed()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApplicationStatus;

    fn draft(name: &str) -> SchemeDraft {
        SchemeDraft {
            name: name.to_string(),
            description: "test scheme".to_string(),
            duration_minutes: 60,
            return_rate: "1%".to_string(),
            min_amount: 1000,
            max_amount: 100_000,
            is_live: true,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut catalog = SchemeCatalog::new();
        let a = catalog.create(draft("A"), Utc::now());
        let b = catalog.create(draft("B"), Utc::now());
        assert_eq!(a, SchemeId::new(1));
        assert_eq!(b, SchemeId::new(2));
        assert!(catalog.get(a).unwrap().applications.is_empty());
    }

    #[test]
    fn test_ids_never_reused_after_archive() {
        let mut catalog = SchemeCatalog::new();
        let a = catalog.create(draft("A"), Utc::now());
        assert!(catalog.toggle_live(a));
        // Archived schemes still occupy their identifier
        let b = catalog.create(draft("B"), Utc::now());
        assert_eq!(b, SchemeId::new(2));
    }

    #[test]
    fn test_toggle_live_keeps_history() {
        let mut catalog = SchemeCatalog::new();
        let id = catalog.create(draft("A"), Utc::now());
        catalog.record_application(
            id,
            Application {
                id: 1,
                investor_name: "Carol Davis".to_string(),
                amount: 15_000,
                status: ApplicationStatus::Active,
                applied_at: Utc::now(),
            },
        );

        assert!(catalog.toggle_live(id));
        let scheme = catalog.get(id).unwrap();
        assert!(!scheme.is_live);
        assert_eq!(scheme.applications.len(), 1);
        assert!(catalog.get_live(id).is_none());
    }

    #[test]
    fn test_edit_preserves_id_and_history() {
        let mut catalog = SchemeCatalog::new();
        let id = catalog.create(draft("A"), Utc::now());
        catalog.record_application(
            id,
            Application {
                id: 1,
                investor_name: "Bob Smith".to_string(),
                amount: 5000,
                status: ApplicationStatus::Active,
                applied_at: Utc::now(),
            },
        );

        let mut patch = SchemePatch {
            name: "A+".to_string(),
            description: "edited".to_string(),
            duration_minutes: 120,
            return_rate: "2%".to_string(),
            min_amount: 2000,
            max_amount: 200_000,
            is_live: true,
        };
        assert!(catalog.edit(id, patch.clone()));

        let scheme = catalog.get(id).unwrap();
        assert_eq!(scheme.name, "A+");
        assert_eq!(scheme.duration_minutes, 120);
        assert_eq!(scheme.applications.len(), 1);

        patch.name = "ghost".to_string();
        assert!(!catalog.edit(SchemeId::new(99), patch));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut catalog = SchemeCatalog::new();
        assert!(!catalog.toggle_live(SchemeId::new(42)));
        assert!(catalog.get(SchemeId::new(42)).is_none());
    }

    #[test]
    fn test_stats() {
        let mut catalog = SchemeCatalog::new();
        let a = catalog.create(draft("A"), Utc::now());
        let b = catalog.create(draft("B"), Utc::now());
        catalog.toggle_live(b);
        catalog.record_application(
            a,
            Application {
                id: 1,
                investor_name: "Alice Johnson".to_string(),
                amount: 10_000,
                status: ApplicationStatus::Active,
                applied_at: Utc::now(),
            },
        );

        let stats = catalog.stats();
        assert_eq!(stats.total_schemes, 2);
        assert_eq!(stats.live_schemes, 1);
        assert_eq!(stats.total_applications, 1);
        assert_eq!(stats.total_committed, 10_000);
    }
}
