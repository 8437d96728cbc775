//! `SeaORM` entity definitions.
//!
//! One module per table. Amounts are `NUMERIC` columns mapped to
//! `rust_decimal::Decimal`.

pub mod buildings;
pub mod financings;
pub mod insurance_policies;
pub mod lease_contracts;
pub mod property_tax_assessments;
pub mod supplier_contracts;
pub mod units;

pub mod prelude {
    //! Entity re-exports.

    pub use super::buildings::Entity as Buildings;
    pub use super::financings::Entity as Financings;
    pub use super::insurance_policies::Entity as InsurancePolicies;
    pub use super::lease_contracts::Entity as LeaseContracts;
    pub use super::property_tax_assessments::Entity as PropertyTaxAssessments;
    pub use super::supplier_contracts::Entity as SupplierContracts;
    pub use super::units::Entity as Units;
}
