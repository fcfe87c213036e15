use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EquipmentResult;
use crate::models::{CreateEquipment, Equipment};

/// Repository trait for Equipment persistence
///
/// Defines the data access interface for equipment records. Implementations
/// can use different storage backends; the only hard requirement is that
/// `increment_quantity`/`decrement_quantity` apply their bound and the write
/// as one conditional update, so concurrent mutations cannot race past the
/// stock invariants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    /// Persist a new equipment record
    async fn create(&self, input: CreateEquipment) -> EquipmentResult<Equipment>;

    /// Get an equipment record by ID
    async fn get_by_id(&self, id: Uuid) -> EquipmentResult<Option<Equipment>>;

    /// Get an equipment record by serial number
    async fn get_by_serial(&self, serial_number: &str) -> EquipmentResult<Option<Equipment>>;

    /// Check whether a serial number is already registered
    async fn exists_by_serial(&self, serial_number: &str) -> EquipmentResult<bool>;

    /// List every equipment record, in store-native order
    async fn list(&self) -> EquipmentResult<Vec<Equipment>>;

    /// Delete an equipment record by ID; returns whether a record was removed
    async fn delete(&self, id: Uuid) -> EquipmentResult<bool>;

    /// Add `amount` to the stock iff the result stays within `max_capacity`.
    ///
    /// Returns the updated record, or `None` when no matching record was
    /// updated - the record is gone or the bound refused the change.
    async fn increment_quantity(
        &self,
        id: Uuid,
        amount: i32,
    ) -> EquipmentResult<Option<Equipment>>;

    /// Remove `amount` from the stock iff the result stays non-negative.
    ///
    /// Same `None` contract as [`Self::increment_quantity`].
    async fn decrement_quantity(
        &self,
        id: Uuid,
        amount: i32,
    ) -> EquipmentResult<Option<Equipment>>;
}
