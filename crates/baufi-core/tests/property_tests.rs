use baufi_core::calculate;
use baufi_core::types::{FinancingParameters, RepaymentFrequency, SpecialRepayment};
use baufi_core::validation::{has_blocking_errors, validate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Generate parameter sets that pass validation: positive price, equity
/// below the total investment, rate within 0–10%, term 5–40 years.
fn arb_params() -> impl Strategy<Value = FinancingParameters> {
    (
        50_000u64..2_000_000u64, // property price
        0u32..=80u32,            // equity, percent of price
        0u32..=1_000u32,         // rate in hundredths of a percent
        5u32..=40u32,            // term in years
        0u64..100_000u64,        // additional costs
        any::<bool>(),           // yearly special repayment on/off
        1_000u64..30_000u64,     // yearly special repayment amount
    )
        .prop_map(
            |(price, equity_pct, rate_hundredths, term, costs, with_repayment, repayment)| {
                let price = Decimal::from(price);
                FinancingParameters {
                    property_price: price,
                    equity: price * Decimal::from(equity_pct) / dec!(100),
                    interest_rate: Decimal::from(rate_hundredths) / dec!(100),
                    loan_term_years: term,
                    additional_costs: Decimal::from(costs),
                    include_repayment: with_repayment,
                    repayment_amount: Decimal::from(repayment),
                    ..Default::default()
                }
            },
        )
}

/// Same, with a percent-of-loan special repayment in the list.
fn arb_params_with_special() -> impl Strategy<Value = FinancingParameters> {
    (arb_params(), 1u32..=10u32, 1u32..=24u32).prop_map(|(mut params, percent, start)| {
        params.special_repayments.push(SpecialRepayment {
            amount: Decimal::from(percent),
            is_percent_of_loan: true,
            frequency: RepaymentFrequency::Yearly,
            start_month: start,
            end_month: None,
        });
        params
    })
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Conservation. Every repaid cent is loan principal,
    // the schedule neither overshoots nor leaves a residual.
    // ===================================================================
    #[test]
    fn prop_principal_conservation(params in arb_params()) {
        prop_assume!(!has_blocking_errors(&validate(&params)));
        let result = calculate(&params);
        let loan = params.loan_amount();
        prop_assume!(loan > Decimal::ZERO);

        let principal_sum: Decimal = result.schedule.iter().map(|e| e.principal).sum();
        prop_assert_eq!(principal_sum, loan);
        prop_assert_eq!(
            result.schedule.last().unwrap().remaining_debt,
            Decimal::ZERO
        );
    }

    #[test]
    fn prop_conservation_with_special_repayments(params in arb_params_with_special()) {
        prop_assume!(!has_blocking_errors(&validate(&params)));
        let result = calculate(&params);
        let loan = params.loan_amount();
        prop_assume!(loan > Decimal::ZERO);

        let principal_sum: Decimal = result.schedule.iter().map(|e| e.principal).sum();
        prop_assert_eq!(principal_sum, loan);
    }

    // ===================================================================
    // INVARIANT 2: Monotonicity. The debt never grows, the progress
    // never shrinks, and the schedule never outlives the term.
    // ===================================================================
    #[test]
    fn prop_remaining_debt_monotone(params in arb_params()) {
        prop_assume!(!has_blocking_errors(&validate(&params)));
        let result = calculate(&params);
        prop_assume!(params.loan_amount() > Decimal::ZERO);

        prop_assert!(result.schedule.len() as u32 <= params.loan_term_years * 12);

        let mut prev = params.loan_amount();
        for entry in &result.schedule {
            prop_assert!(entry.remaining_debt >= Decimal::ZERO);
            prop_assert!(entry.remaining_debt <= prev);
            prop_assert_eq!(entry.payment, entry.interest + entry.principal);
            prev = entry.remaining_debt;
        }

        let mut prev_progress = Decimal::ZERO;
        for y in &result.yearly {
            prop_assert!(y.progress >= prev_progress);
            prop_assert!(y.progress <= dec!(100));
            prev_progress = y.progress;
        }
        prop_assert_eq!(result.yearly.last().unwrap().progress, dec!(100));
    }

    // ===================================================================
    // INVARIANT 3: Determinism. The same parameters always produce a
    // bit-identical result.
    // ===================================================================
    #[test]
    fn prop_calculation_is_deterministic(params in arb_params()) {
        prop_assume!(!has_blocking_errors(&validate(&params)));
        prop_assert_eq!(calculate(&params), calculate(&params));
    }

    // ===================================================================
    // INVARIANT 4: The cumulative columns agree with the per-month ones.
    // ===================================================================
    #[test]
    fn prop_cumulative_columns_agree(params in arb_params()) {
        prop_assume!(!has_blocking_errors(&validate(&params)));
        let result = calculate(&params);

        let mut interest_acc = Decimal::ZERO;
        let mut principal_acc = Decimal::ZERO;
        for entry in &result.schedule {
            interest_acc += entry.interest;
            principal_acc += entry.principal;
            prop_assert_eq!(entry.cumulative_interest, interest_acc);
            prop_assert_eq!(entry.cumulative_principal, principal_acc);
        }
        prop_assert_eq!(result.total_interest, interest_acc);
    }
}
