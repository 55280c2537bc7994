use baufi_core::types::{Fees, FinancingParameters, RepaymentFrequency, SpecialRepayment};
use baufi_core::validation::{has_blocking_errors, validate};
use baufi_core::{calculate, Severity};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference scenario
// ===========================================================================

fn reference_params() -> FinancingParameters {
    FinancingParameters {
        property_price: dec!(500_000),
        equity: dec!(100_000),
        interest_rate: dec!(3.45),
        loan_term_years: 25,
        additional_costs: dec!(35_000),
        maintenance_rate: dec!(1.2),
        ..Default::default()
    }
}

#[test]
fn test_reference_scenario_end_to_end() {
    // 500k price, 100k equity, 35k side costs -> 435k loan.
    // Annuity at 3.45% nominal over 300 months: ~2,166.04.
    let params = reference_params();
    let issues = validate(&params);
    assert!(!has_blocking_errors(&issues));

    let result = calculate(&params);
    assert_eq!(result.loan_amount, dec!(435_000));
    assert_eq!(result.loan_to_value, dec!(87));
    assert!((result.base_monthly_payment - dec!(2166.04)).abs() < dec!(0.5));
    assert_eq!(result.schedule.len(), 300);
    assert_eq!(result.yearly.len(), 25);

    // Effective rate and LTV must match their defining formulas exactly.
    assert_eq!(
        result.effective_interest_rate,
        result.total_interest / dec!(435_000) / dec!(25) * dec!(100)
    );
    assert_eq!(result.loan_to_value, dec!(435_000) / dec!(500_000) * dec!(100));
}

#[test]
fn test_schedule_terminates_at_exactly_zero() {
    let result = calculate(&reference_params());
    let last = result.schedule.last().unwrap();
    assert_eq!(last.remaining_debt, Decimal::ZERO);
    assert_eq!(last.cumulative_principal, dec!(435_000));
}

// ===========================================================================
// Edge cases
// ===========================================================================

#[test]
fn test_zero_rate_loan() {
    let params = FinancingParameters {
        interest_rate: Decimal::ZERO,
        ..reference_params()
    };
    let result = calculate(&params);
    // 435,000 / 300 months, principal only.
    assert_eq!(result.base_monthly_payment, dec!(1_450));
    assert_eq!(result.total_interest, Decimal::ZERO);
    assert_eq!(result.effective_interest_rate, Decimal::ZERO);
}

#[test]
fn test_fully_self_financed_purchase() {
    let params = FinancingParameters {
        equity: dec!(600_000),
        ..reference_params()
    };
    let result = calculate(&params);
    assert!(result.schedule.is_empty());
    assert_eq!(result.total_interest, Decimal::ZERO);
    // All-in payment collapses to the running costs.
    assert_eq!(
        result.monthly_payment,
        result.monthly_insurance + result.monthly_maintenance
    );
}

#[test]
fn test_special_repayments_shorten_and_conserve() {
    let params = FinancingParameters {
        special_repayments: vec![
            SpecialRepayment {
                amount: dec!(10_000),
                is_percent_of_loan: false,
                frequency: RepaymentFrequency::Yearly,
                start_month: 12,
                end_month: None,
            },
            SpecialRepayment {
                amount: dec!(25_000),
                is_percent_of_loan: false,
                frequency: RepaymentFrequency::Once,
                start_month: 60,
                end_month: None,
            },
        ],
        ..reference_params()
    };
    let result = calculate(&params);
    assert!(result.schedule.len() < 300);
    let principal_sum: Decimal = result.schedule.iter().map(|e| e.principal).sum();
    assert_eq!(principal_sum, dec!(435_000));
}

#[test]
fn test_fees_flow_into_total_cost() {
    let params = FinancingParameters {
        fees: Fees {
            processing_fee: dec!(4_350),
            appraisal_fee: dec!(750),
            broker_fee: dec!(17_850),
        },
        ..reference_params()
    };
    let without_fees = calculate(&reference_params());
    let with_fees = calculate(&params);
    assert_eq!(with_fees.fees.total, dec!(22_950));
    assert_eq!(with_fees.total_cost, without_fees.total_cost + dec!(22_950));
}

// ===========================================================================
// Validation gating
// ===========================================================================

#[test]
fn test_out_of_range_rate_is_blocked_before_calculation() {
    let params = FinancingParameters {
        interest_rate: dec!(25),
        ..reference_params()
    };
    let issues = validate(&params);
    assert!(has_blocking_errors(&issues));
    let blocking: Vec<_> = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .collect();
    assert_eq!(blocking.len(), 1);
    assert_eq!(blocking[0].field, "interest_rate");
}

#[test]
fn test_warnings_accompany_a_valid_calculation() {
    // 5% equity share: legal but thin, so the calculation proceeds with
    // a warning attached.
    let params = FinancingParameters {
        equity: dec!(26_750),
        ..reference_params()
    };
    let issues = validate(&params);
    assert!(!has_blocking_errors(&issues));
    assert!(issues.iter().any(|i| i.severity == Severity::Warning));
    let result = calculate(&params);
    assert_eq!(result.loan_amount, dec!(508_250));
}

// ===========================================================================
// Determinism
// ===========================================================================

#[test]
fn test_identical_parameters_yield_bit_identical_results() {
    let params = reference_params();
    assert_eq!(calculate(&params), calculate(&params));
}
