//! Source repository: reads recurring source records for schedule generation.

use async_trait::async_trait;
use immobook_core::schedule::{SourceStore, StoreError};
use immobook_core::sources::{
    Financing, InsurancePolicy, LeaseContract, PropertyTaxAssessment, SourceRecord, SourceType,
    SupplierContract, Unit,
};
use immobook_shared::types::{
    BuildingId, FinancingId, InsurancePolicyId, LeaseContractId, PropertyTaxId,
    SupplierContractId, UnitId,
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{
    financings, insurance_policies, lease_contracts, property_tax_assessments,
    supplier_contracts, units,
};

/// Read-only repository over the source tables.
#[derive(Debug, Clone)]
pub struct SourceRepository {
    db: DatabaseConnection,
}

impl SourceRepository {
    /// Creates a new source repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a source record of the given type by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_record(
        &self,
        source_type: SourceType,
        id: Uuid,
    ) -> Result<Option<SourceRecord>, DbErr> {
        debug!(%source_type, %id, "Loading source record");
        let record = match source_type {
            SourceType::PropertyTax => property_tax_assessments::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| SourceRecord::PropertyTax(m.into())),
            SourceType::Insurance => insurance_policies::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| SourceRecord::Insurance(m.into())),
            SourceType::Loan => financings::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| SourceRecord::Loan(m.into())),
            SourceType::SupplierContract => supplier_contracts::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| SourceRecord::SupplierContract(m.into())),
            SourceType::LeaseContract => lease_contracts::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(|m| SourceRecord::LeaseContract(m.into())),
        };
        Ok(record)
    }

    /// Finds a unit by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_unit_by_id(&self, id: UnitId) -> Result<Option<Unit>, DbErr> {
        Ok(units::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(Into::into))
    }
}

#[async_trait]
impl SourceStore for SourceRepository {
    async fn find_source(
        &self,
        source_type: SourceType,
        id: Uuid,
    ) -> Result<Option<SourceRecord>, StoreError> {
        self.find_record(source_type, id).await.map_err(store_error)
    }

    async fn find_unit(&self, id: UnitId) -> Result<Option<Unit>, StoreError> {
        self.find_unit_by_id(id).await.map_err(store_error)
    }
}

fn store_error(err: DbErr) -> StoreError {
    StoreError(err.to_string())
}

impl From<property_tax_assessments::Model> for PropertyTaxAssessment {
    fn from(m: property_tax_assessments::Model) -> Self {
        Self {
            id: PropertyTaxId::from_uuid(m.id),
            building_id: BuildingId::from_uuid(m.building_id),
            assessment_year: m.assessment_year,
            annual_amount: m.annual_amount,
            quarterly_amount: m.quarterly_amount,
            due_dates: [m.q1_due_date, m.q2_due_date, m.q3_due_date, m.q4_due_date],
        }
    }
}

impl From<insurance_policies::Model> for InsurancePolicy {
    fn from(m: insurance_policies::Model) -> Self {
        Self {
            id: InsurancePolicyId::from_uuid(m.id),
            building_id: BuildingId::from_uuid(m.building_id),
            insurer: m.insurer,
            insurance_type: m.insurance_type,
            annual_premium: m.annual_premium,
            payment_rhythm: m.payment_rhythm,
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}

impl From<financings::Model> for Financing {
    fn from(m: financings::Model) -> Self {
        Self {
            id: FinancingId::from_uuid(m.id),
            building_id: BuildingId::from_uuid(m.building_id),
            lender: m.lender,
            principal: m.principal,
            annual_interest_rate: m.annual_interest_rate,
            monthly_payment: m.monthly_payment,
            // A negative stored term becomes 0, which generation rejects.
            term_months: m.term_months.map(|t| u32::try_from(t).unwrap_or(0)),
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}

impl From<supplier_contracts::Model> for SupplierContract {
    fn from(m: supplier_contracts::Model) -> Self {
        Self {
            id: SupplierContractId::from_uuid(m.id),
            building_id: BuildingId::from_uuid(m.building_id),
            supplier_name: m.supplier_name,
            supplier_type: m.supplier_type,
            amount: m.amount,
            payment_rhythm: m.payment_rhythm,
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}

impl From<lease_contracts::Model> for LeaseContract {
    fn from(m: lease_contracts::Model) -> Self {
        Self {
            id: LeaseContractId::from_uuid(m.id),
            unit_id: UnitId::from_uuid(m.unit_id),
            tenant_name: m.tenant_name,
            base_rent: m.base_rent,
            utilities_advance: m.utilities_advance,
            heating_advance: m.heating_advance,
            due_day: u32::try_from(m.due_day).unwrap_or(0),
            start_date: m.start_date,
            end_date: m.end_date,
        }
    }
}

impl From<units::Model> for Unit {
    fn from(m: units::Model) -> Self {
        Self {
            id: UnitId::from_uuid(m.id),
            building_id: BuildingId::from_uuid(m.building_id),
            name: m.name,
        }
    }
}
