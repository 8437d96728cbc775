//! Property-based tests for schedule generation.

use chrono::NaiveDate;
use immobook_shared::types::{
    BuildingId, FinancingId, InsurancePolicyId, LeaseContractId, PropertyTaxId,
    SupplierContractId, UnitId,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::ScheduleError;
use super::service::ScheduleService;
use super::types::BookingComponent;
use crate::sources::{
    Financing, InsurancePolicy, LeaseContract, PropertyTaxAssessment, SourceRecord,
    SupplierContract,
};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2015i32..2035, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for generating positive amounts with 3 decimal places, sub-cent
/// values included.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        (1i64..20).prop_map(|mills| Decimal::new(mills, 3)),
        (1i64..50_000_000).prop_map(|mills| Decimal::new(mills, 3)),
    ]
}

fn arb_rhythm() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["monthly", "quarterly", "semiannual", "annual"])
}

fn arb_constant_record() -> impl Strategy<Value = SourceRecord> {
    (
        arb_amount(),
        arb_rhythm(),
        prop::option::of(arb_date()),
        prop::option::of(arb_date()),
        0u8..3,
        1u32..=31,
    )
        .prop_map(|(amount, rhythm, start, end, kind, due_day)| match kind {
            0 => SourceRecord::Insurance(InsurancePolicy {
                id: InsurancePolicyId::new(),
                building_id: BuildingId::new(),
                insurer: "Insurer".to_string(),
                insurance_type: "Building".to_string(),
                annual_premium: Some(amount),
                payment_rhythm: rhythm.to_string(),
                start_date: start,
                end_date: end,
            }),
            1 => SourceRecord::SupplierContract(SupplierContract {
                id: SupplierContractId::new(),
                building_id: BuildingId::new(),
                supplier_name: "Supplier".to_string(),
                supplier_type: String::new(),
                amount: Some(amount),
                payment_rhythm: rhythm.to_string(),
                start_date: start,
                end_date: end,
            }),
            _ => SourceRecord::LeaseContract(LeaseContract {
                id: LeaseContractId::new(),
                unit_id: UnitId::new(),
                tenant_name: "Tenant".to_string(),
                base_rent: Some(amount),
                utilities_advance: None,
                heating_advance: None,
                due_day,
                start_date: start.unwrap_or_else(|| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
                end_date: end,
            }),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every suggestion is due inside [today, horizon], amounts are positive
    /// and the list is sorted by due date. Amounts too small to book are
    /// rejected instead.
    #[test]
    fn prop_suggestions_inside_window_and_sorted(
        record in arb_constant_record(),
        today in arb_date(),
        horizon_months in 1u32..=36,
    ) {
        let schedule = match ScheduleService::new(horizon_months).generate(&record, None, today) {
            Ok(schedule) => schedule,
            Err(err) => {
                prop_assert!(matches!(err, ScheduleError::InvalidSourceData(_)));
                return Ok(());
            }
        };

        for suggestion in &schedule.suggestions {
            prop_assert!(suggestion.due_date >= today);
            prop_assert!(suggestion.due_date <= schedule.horizon);
            prop_assert!(suggestion.amount > Decimal::ZERO);
        }
        for pair in schedule.suggestions.windows(2) {
            prop_assert!(pair[0].due_date <= pair[1].due_date);
        }
    }

    /// Insurance, supplier and lease suggestions all carry the same amount.
    #[test]
    fn prop_constant_sources_have_constant_amounts(
        record in arb_constant_record(),
        today in arb_date(),
    ) {
        let Ok(schedule) = ScheduleService::default().generate(&record, None, today) else {
            return Ok(());
        };
        if let Some(first) = schedule.suggestions.first() {
            for suggestion in &schedule.suggestions {
                prop_assert_eq!(suggestion.amount, first.amount);
                prop_assert_eq!(suggestion.component, BookingComponent::Payment);
            }
        }
    }

    /// When both loan components are emitted they add up to the instalment.
    #[test]
    fn prop_loan_components_conserve_payment(
        principal in 10_000i64..1_000_000,
        rate_bp in 0i64..1000,
        payment in 100i64..10_000,
        start in arb_date(),
        today in arb_date(),
    ) {
        let monthly_payment = Decimal::from(payment);
        let record = SourceRecord::Loan(Financing {
            id: FinancingId::new(),
            building_id: BuildingId::new(),
            lender: "Bank".to_string(),
            principal: Some(Decimal::from(principal)),
            annual_interest_rate: Some(Decimal::new(rate_bp, 4)),
            monthly_payment: Some(monthly_payment),
            term_months: None,
            start_date: start,
            end_date: None,
        });
        let schedule = ScheduleService::default().generate(&record, None, today).unwrap();

        for pair in schedule.suggestions.chunk_by(|a, b| a.period_index == b.period_index) {
            prop_assert!(pair.len() <= 2);
            if pair.len() == 2 {
                prop_assert_eq!(pair[0].component, BookingComponent::Interest);
                prop_assert_eq!(pair[1].component, BookingComponent::Principal);
                prop_assert_eq!(pair[0].amount + pair[1].amount, monthly_payment);
            }
        }
    }

    /// A quarter without a due date never produces a suggestion.
    #[test]
    fn prop_missing_quarter_never_emitted(
        missing in 0usize..4,
        year in 2018i32..2030,
        today in arb_date(),
    ) {
        let mut due_dates = [
            NaiveDate::from_ymd_opt(year, 3, 15),
            NaiveDate::from_ymd_opt(year, 6, 15),
            NaiveDate::from_ymd_opt(year, 9, 15),
            NaiveDate::from_ymd_opt(year, 12, 15),
        ];
        due_dates[missing] = None;
        let record = SourceRecord::PropertyTax(PropertyTaxAssessment {
            id: PropertyTaxId::new(),
            building_id: BuildingId::new(),
            assessment_year: year,
            annual_amount: Some(Decimal::from(4000)),
            quarterly_amount: None,
            due_dates,
        });
        let schedule = ScheduleService::default().generate(&record, None, today).unwrap();

        let skipped = format!("Q{}/", missing + 1);
        for suggestion in &schedule.suggestions {
            prop_assert!(!suggestion.description.contains(&skipped));
        }
    }

    /// Property-tax instalments are either positive with 2 dp or rejected.
    #[test]
    fn prop_property_tax_amounts_positive_or_rejected(
        annual in arb_amount(),
        quarterly in prop::option::of(arb_amount()),
        year in 2018i32..2030,
        today in arb_date(),
    ) {
        let record = SourceRecord::PropertyTax(PropertyTaxAssessment {
            id: PropertyTaxId::new(),
            building_id: BuildingId::new(),
            assessment_year: year,
            annual_amount: Some(annual),
            quarterly_amount: quarterly,
            due_dates: [
                NaiveDate::from_ymd_opt(year, 2, 15),
                NaiveDate::from_ymd_opt(year, 5, 15),
                NaiveDate::from_ymd_opt(year, 8, 15),
                NaiveDate::from_ymd_opt(year, 11, 15),
            ],
        });
        let instalment = quarterly.unwrap_or(annual / Decimal::from(4)).round_dp(2);

        match ScheduleService::default().generate(&record, None, today) {
            Ok(schedule) => {
                prop_assert!(instalment > Decimal::ZERO);
                for suggestion in &schedule.suggestions {
                    prop_assert_eq!(suggestion.amount, instalment);
                    prop_assert!(suggestion.amount.scale() <= 2);
                }
            }
            Err(err) => {
                prop_assert!(instalment.is_zero());
                prop_assert!(matches!(err, ScheduleError::InvalidSourceData(_)));
            }
        }
    }
}
