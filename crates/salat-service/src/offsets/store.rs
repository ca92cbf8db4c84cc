//! Process-wide offset tables, editable by the administrator.
//!
//! Values live only in memory and reset to the configured defaults on
//! restart. Every mutation validates the whole request before taking the
//! write lock, so a rejected request leaves no partial write behind.
//! Concurrent edits are last-write-wins.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use salat_auth::Identity;
use salat_core::config::OffsetDefaultsConfig;
use salat_core::error::AppError;
use salat_core::types::{OffsetKind, OffsetTable, Prayer};

/// Both offset tables as seen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetSnapshot {
    /// Minutes after Adhan.
    pub iqama: OffsetTable,
    /// Minutes before Adhan.
    pub reminder: OffsetTable,
}

impl OffsetSnapshot {
    /// The table for `kind`.
    pub fn table(&self, kind: OffsetKind) -> &OffsetTable {
        match kind {
            OffsetKind::Iqama => &self.iqama,
            OffsetKind::Reminder => &self.reminder,
        }
    }

    fn table_mut(&mut self, kind: OffsetKind) -> &mut OffsetTable {
        match kind {
            OffsetKind::Iqama => &mut self.iqama,
            OffsetKind::Reminder => &mut self.reminder,
        }
    }
}

/// A single `(table, prayer) = minutes` edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetUpdate {
    /// Which table.
    pub kind: OffsetKind,
    /// Which prayer.
    pub prayer: Prayer,
    /// New value.
    pub minutes: u8,
}

/// Owner of the shared offset configuration.
#[derive(Debug, Clone)]
pub struct OffsetStore {
    inner: Arc<RwLock<OffsetSnapshot>>,
}

impl OffsetStore {
    /// Creates the store from configured defaults.
    pub fn new(defaults: &OffsetDefaultsConfig) -> Result<Self, AppError> {
        defaults.iqama.validate()?;
        defaults.reminder.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(OffsetSnapshot {
                iqama: defaults.iqama,
                reminder: defaults.reminder,
            })),
        })
    }

    /// Current values.
    pub async fn snapshot(&self) -> OffsetSnapshot {
        *self.inner.read().await
    }

    /// Applies a batch of single-entry edits atomically.
    pub async fn apply(
        &self,
        actor: &Identity,
        updates: &[OffsetUpdate],
    ) -> Result<OffsetSnapshot, AppError> {
        require_admin(actor)?;

        let mut staged = self.snapshot().await;
        for update in updates {
            staged.table_mut(update.kind).set(update.prayer, update.minutes)?;
        }

        let mut guard = self.inner.write().await;
        for update in updates {
            // Already range-checked on the staged copy.
            guard.table_mut(update.kind).set(update.prayer, update.minutes)?;
        }
        let result = *guard;
        drop(guard);

        info!(
            username = %actor.username,
            changes = updates.len(),
            "Offsets updated"
        );
        Ok(result)
    }
}

fn require_admin(actor: &Identity) -> Result<(), AppError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(AppError::authorization(
            "Only the administrator may change offsets",
        ))
    }
}
