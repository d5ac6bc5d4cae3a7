//! File-backed ledger store.
//!
//! One pretty-printed JSON document per user slice
//! (`ledger_<user>.json`) plus a platform-wide `withdrawal_claims.json`,
//! all under a single data directory. Writes go through a temp file and
//! rename so a crashed write never leaves a half-document behind; reads
//! survive missing, corrupt or partially malformed documents by degrading
//! to whatever decodes.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use vestlock_core::types::{Investment, UserId, WithdrawalClaim};

use crate::error::StoreResult;
use crate::ledger::{decode_records, LedgerStore};

/// JSON-file ledger store rooted at a data directory
#[derive(Debug, Clone)]
pub struct JsonFileLedger {
    root: PathBuf,
}

impl JsonFileLedger {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn investments_path(&self, user: &UserId) -> PathBuf {
        self.root.join(format!("ledger_{}.json", user.as_str()))
    }

    fn claims_path(&self) -> PathBuf {
        self.root.join("withdrawal_claims.json")
    }

    async fn read_records<T: DeserializeOwned>(&self, path: &Path) -> Vec<T> {
        let context = path.display().to_string();
        match fs::read_to_string(path).await {
            Ok(raw) => decode_records(&raw, &context),
            Err(error) if error.kind() == ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                warn!(%context, %error, "Unreadable persisted document, substituting empty collection");
                Vec::new()
            }
        }
    }

    async fn write_records<T: Serialize>(&self, path: &Path, records: &[T]) -> StoreResult<()> {
        fs::create_dir_all(&self.root).await?;

        let payload = serde_json::to_vec_pretty(records)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &payload).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for JsonFileLedger {
    async fn load_investments(&self, user: &UserId) -> StoreResult<Vec<Investment>> {
        Ok(self.read_records(&self.investments_path(user)).await)
    }

    async fn save_investments(
        &self,
        user: &UserId,
        investments: &[Investment],
    ) -> StoreResult<()> {
        self.write_records(&self.investments_path(user), investments)
            .await
    }

    async fn load_claims(&self) -> StoreResult<Vec<WithdrawalClaim>> {
        Ok(self.read_records(&self.claims_path()).await)
    }

    async fn save_claims(&self, claims: &[WithdrawalClaim]) -> StoreResult<()> {
        self.write_records(&self.claims_path(), claims).await
    }
}
