//! Equipment Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EquipmentError, EquipmentResult};
use crate::models::{CreateEquipment, Equipment};
use crate::repository::EquipmentRepository;

/// Equipment service providing business logic operations
///
/// The service layer enforces the registration rules (serial prefix,
/// uniqueness) and the stock bounds, and orchestrates repository operations.
pub struct EquipmentService<R: EquipmentRepository> {
    repository: Arc<R>,
}

impl<R: EquipmentRepository> EquipmentService<R> {
    /// Create a new EquipmentService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new equipment line
    ///
    /// The serial-prefix check runs before the uniqueness check; a candidate
    /// failing either is never persisted.
    #[instrument(skip(self, input), fields(serial_number = %input.serial_number))]
    pub async fn register(&self, input: CreateEquipment) -> EquipmentResult<Equipment> {
        input
            .validate()
            .map_err(|e| EquipmentError::Validation(e.to_string()))?;

        verify_serial_prefix(&input)?;

        if self
            .repository
            .exists_by_serial(&input.serial_number)
            .await?
        {
            return Err(EquipmentError::AlreadyRegistered(input.serial_number));
        }

        self.repository.create(input).await
    }

    /// Look up an equipment line by serial number
    #[instrument(skip(self))]
    pub async fn find_by_serial(&self, serial_number: &str) -> EquipmentResult<Equipment> {
        self.repository
            .get_by_serial(serial_number)
            .await?
            .ok_or_else(|| EquipmentError::SerialNotFound(serial_number.to_string()))
    }

    /// List every registered equipment line
    #[instrument(skip(self))]
    pub async fn list_equipment(&self) -> EquipmentResult<Vec<Equipment>> {
        self.repository.list().await
    }

    /// Delete an equipment line
    ///
    /// Existence is confirmed first so an unknown id always surfaces as
    /// `NotFound` rather than a silent no-op.
    #[instrument(skip(self))]
    pub async fn delete_equipment(&self, id: Uuid) -> EquipmentResult<()> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(EquipmentError::NotFound(id));
        }

        self.repository.delete(id).await?;
        Ok(())
    }

    /// Increase the stock of an equipment line, bounded by its capacity
    ///
    /// The bound and the write are a single conditional update in the store,
    /// so concurrent increments cannot race past the capacity check.
    #[instrument(skip(self))]
    pub async fn increment(&self, id: Uuid, amount: i32) -> EquipmentResult<Equipment> {
        let equipment = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(EquipmentError::NotFound(id))?;

        match self.repository.increment_quantity(id, amount).await? {
            Some(updated) => Ok(updated),
            None => Err(EquipmentError::CapacityExceeded {
                requested: amount,
                available: equipment.available_capacity(),
            }),
        }
    }

    /// Decrease the stock of an equipment line, bounded below by zero
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: Uuid, amount: i32) -> EquipmentResult<Equipment> {
        let equipment = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(EquipmentError::NotFound(id))?;

        match self.repository.decrement_quantity(id, amount).await? {
            Some(updated) => Ok(updated),
            None => Err(EquipmentError::InsufficientStock {
                requested: amount,
                available: equipment.quantity,
            }),
        }
    }
}

/// Check the candidate's serial number against its category's required prefix
fn verify_serial_prefix(input: &CreateEquipment) -> EquipmentResult<()> {
    if let Some(prefix) = input.category.required_prefix() {
        if !input.serial_number.starts_with(prefix) {
            return Err(EquipmentError::InvalidPrefix {
                serial: input.serial_number.clone(),
                category: input.category.label(),
                expected: prefix,
            });
        }
    }
    Ok(())
}

impl<R: EquipmentRepository> Clone for EquipmentService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EquipmentCategory;
    use crate::repository::MockEquipmentRepository;
    use mockall::predicate::eq;

    const SERIAL: &str = "140152830";

    fn sample_create() -> CreateEquipment {
        CreateEquipment {
            serial_number: SERIAL.to_string(),
            brand: "FLYGT".to_string(),
            model: "NP 3206".to_string(),
            category: EquipmentCategory::MotorPump,
            quantity: 10,
            max_capacity: 50,
        }
    }

    fn sample_equipment() -> Equipment {
        Equipment::new(sample_create())
    }

    #[tokio::test]
    async fn register_persists_new_equipment() {
        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_exists_by_serial()
            .with(eq(SERIAL))
            .times(1)
            .returning(|_| Ok(false));
        repository
            .expect_create()
            .times(1)
            .returning(|input| Ok(Equipment::new(input)));

        let service = EquipmentService::new(repository);
        let created = service.register(sample_create()).await.unwrap();

        assert_eq!(created.serial_number, SERIAL);
        assert_eq!(created.quantity, 10);
        assert_eq!(created.max_capacity, 50);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_serial() {
        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_exists_by_serial()
            .with(eq(SERIAL))
            .times(1)
            .returning(|_| Ok(true));
        // No expect_create: a duplicate must never reach the store

        let service = EquipmentService::new(repository);
        let err = service.register(sample_create()).await.unwrap_err();

        assert!(matches!(err, EquipmentError::AlreadyRegistered(serial) if serial == SERIAL));
    }

    #[tokio::test]
    async fn register_rejects_serial_outside_category_prefix() {
        // 14016xxxx is a mixer number; the candidate claims to be a motor pump
        let repository = MockEquipmentRepository::new();
        let service = EquipmentService::new(repository);

        let mut input = sample_create();
        input.serial_number = "140160001".to_string();

        let err = service.register(input).await.unwrap_err();

        assert!(matches!(
            err,
            EquipmentError::InvalidPrefix {
                expected: "14015",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn register_skips_prefix_check_for_uncatalogued_categories() {
        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_exists_by_serial()
            .returning(|_| Ok(false));
        repository
            .expect_create()
            .returning(|input| Ok(Equipment::new(input)));

        let service = EquipmentService::new(repository);

        let mut input = sample_create();
        input.serial_number = "909070001".to_string();
        input.category = EquipmentCategory::Accessory;

        assert!(service.register(input).await.is_ok());
    }

    #[tokio::test]
    async fn register_rejects_structurally_invalid_input() {
        let repository = MockEquipmentRepository::new();
        let service = EquipmentService::new(repository);

        let mut input = sample_create();
        input.serial_number = "1401".to_string(); // too short

        let err = service.register(input).await.unwrap_err();
        assert!(matches!(err, EquipmentError::Validation(_)));
    }

    #[tokio::test]
    async fn find_by_serial_returns_the_stored_record() {
        let expected = sample_equipment();
        let found = expected.clone();

        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_get_by_serial()
            .with(eq(SERIAL))
            .returning(move |_| Ok(Some(found.clone())));

        let service = EquipmentService::new(repository);
        let equipment = service.find_by_serial(SERIAL).await.unwrap();

        assert_eq!(equipment.id, expected.id);
        assert_eq!(equipment.serial_number, SERIAL);
    }

    #[tokio::test]
    async fn find_by_serial_fails_for_unknown_serial() {
        let mut repository = MockEquipmentRepository::new();
        repository.expect_get_by_serial().returning(|_| Ok(None));

        let service = EquipmentService::new(repository);
        let err = service.find_by_serial(SERIAL).await.unwrap_err();

        assert!(matches!(err, EquipmentError::SerialNotFound(serial) if serial == SERIAL));
    }

    #[tokio::test]
    async fn list_returns_every_record() {
        let stored = sample_equipment();
        let listed = stored.clone();

        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_list()
            .returning(move || Ok(vec![listed.clone()]));

        let service = EquipmentService::new(repository);
        let all = service.list_equipment().await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, stored.id);
    }

    #[tokio::test]
    async fn list_returns_empty_vec_for_empty_store() {
        let mut repository = MockEquipmentRepository::new();
        repository.expect_list().returning(|| Ok(Vec::new()));

        let service = EquipmentService::new(repository);
        assert!(service.list_equipment().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_an_existing_record() {
        let stored = sample_equipment();
        let id = stored.id;

        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(true));

        let service = EquipmentService::new(repository);
        assert!(service.delete_equipment(id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_fails_for_unknown_id() {
        let id = Uuid::now_v7();

        let mut repository = MockEquipmentRepository::new();
        repository.expect_get_by_id().returning(|_| Ok(None));
        // No expect_delete: deletion is only attempted after existence is confirmed

        let service = EquipmentService::new(repository);
        let err = service.delete_equipment(id).await.unwrap_err();

        assert!(matches!(err, EquipmentError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn increment_within_capacity_updates_the_stock() {
        let stored = sample_equipment();
        let id = stored.id;
        let mut updated = stored.clone();
        updated.quantity += 10;

        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_increment_quantity()
            .with(eq(id), eq(10))
            .returning(move |_, _| Ok(Some(updated.clone())));

        let service = EquipmentService::new(repository);
        let equipment = service.increment(id, 10).await.unwrap();

        assert_eq!(equipment.quantity, 20);
    }

    #[tokio::test]
    async fn increment_past_capacity_is_refused() {
        // quantity 10, max 50: room for 40 more, 45 requested
        let stored = sample_equipment();
        let id = stored.id;

        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_increment_quantity()
            .with(eq(id), eq(45))
            .returning(|_, _| Ok(None));

        let service = EquipmentService::new(repository);
        let err = service.increment(id, 45).await.unwrap_err();

        assert!(matches!(
            err,
            EquipmentError::CapacityExceeded {
                requested: 45,
                available: 40,
            }
        ));
    }

    #[tokio::test]
    async fn increment_fails_for_unknown_id() {
        let id = Uuid::now_v7();

        let mut repository = MockEquipmentRepository::new();
        repository.expect_get_by_id().returning(|_| Ok(None));

        let service = EquipmentService::new(repository);
        let err = service.increment(id, 10).await.unwrap_err();

        assert!(matches!(err, EquipmentError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn decrement_within_stock_updates_the_quantity() {
        let stored = sample_equipment();
        let id = stored.id;
        let mut updated = stored.clone();
        updated.quantity -= 5;

        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_decrement_quantity()
            .with(eq(id), eq(5))
            .returning(move |_, _| Ok(Some(updated.clone())));

        let service = EquipmentService::new(repository);
        let equipment = service.decrement(id, 5).await.unwrap();

        assert_eq!(equipment.quantity, 5);
    }

    #[tokio::test]
    async fn decrement_below_zero_is_refused() {
        let stored = sample_equipment();
        let id = stored.id;

        let mut repository = MockEquipmentRepository::new();
        repository
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_decrement_quantity()
            .with(eq(id), eq(60))
            .returning(|_, _| Ok(None));

        let service = EquipmentService::new(repository);
        let err = service.decrement(id, 60).await.unwrap_err();

        assert!(matches!(
            err,
            EquipmentError::InsufficientStock {
                requested: 60,
                available: 10,
            }
        ));
    }
}
