//! Read-only storage seam for source records.

use async_trait::async_trait;
use immobook_shared::types::UnitId;
use thiserror::Error;
use uuid::Uuid;

use super::error::ScheduleError;
use crate::sources::{SourceRecord, SourceType, Unit};

/// Failure reported by a storage implementation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl From<StoreError> for ScheduleError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.0)
    }
}

/// Looks up the records a schedule is generated from.
///
/// Implementations never write; the schedule core performs one
/// `find_source` per call plus one `find_unit` for lease contracts.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Finds a source record of the given type by id.
    async fn find_source(
        &self,
        source_type: SourceType,
        id: Uuid,
    ) -> Result<Option<SourceRecord>, StoreError>;

    /// Finds a unit by id.
    async fn find_unit(&self, id: UnitId) -> Result<Option<Unit>, StoreError>;
}
