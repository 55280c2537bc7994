//! Full financing calculation: schedule plus the derived summary metrics.
//!
//! The result is recomputed wholesale on every parameter change and owned
//! by whoever ran the calculation; downstream consumers (UI, exporters)
//! read it immutably and must not re-derive any of its metrics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::schedule::{build_schedule, AmortizationEntry, YearlyAmortization};
use crate::types::{FinancingParameters, Money, Rate};

/// One-off fees with their precomputed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeesBreakdown {
    pub processing_fee: Money,
    pub appraisal_fee: Money,
    pub broker_fee: Money,
    pub total: Money,
}

/// Complete output of one financing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingResult {
    pub loan_amount: Money,
    /// Loan-only annuity payment.
    pub base_monthly_payment: Money,
    /// All-in monthly burden: annuity + insurance + maintenance.
    pub monthly_payment: Money,
    pub monthly_insurance: Money,
    pub monthly_maintenance: Money,
    pub total_interest: Money,
    /// Loan + interest + running costs over the schedule + fees.
    pub total_cost: Money,
    pub schedule: Vec<AmortizationEntry>,
    pub yearly: Vec<YearlyAmortization>,
    /// Average interest burden per year, percent of the loan amount.
    pub effective_interest_rate: Rate,
    /// Loan amount as percent of the property price.
    pub loan_to_value: Rate,
    /// Initial principal repayment (Tilgung), percent of the loan amount.
    pub repayment_rate: Rate,
    /// Equity as percent of the property price.
    pub equity_ratio: Rate,
    pub fixed_rate_period_years: Option<u32>,
    /// Open balance at the end of the fixed-rate period; zero when the
    /// schedule ends earlier or no fixed-rate period is set.
    pub remaining_debt_after_fixed_rate: Money,
    pub fees: FeesBreakdown,
}

/// Run the full calculation for a validated parameter set.
///
/// Contract: the caller has checked [`crate::validation::validate`] for
/// blocking errors. This function is pure and deterministic: identical
/// parameters yield a bit-identical result.
pub fn calculate(params: &FinancingParameters) -> FinancingResult {
    let schedule = build_schedule(params);

    let monthly_insurance = if params.include_insurance {
        params.insurance_rate / dec!(100) * params.property_price / dec!(12)
    } else {
        Decimal::ZERO
    };
    let monthly_maintenance =
        params.maintenance_rate / dec!(100) * params.property_price / dec!(12);

    let loan_amount = schedule.loan_amount;
    let financed = loan_amount.max(Decimal::ZERO);
    let total_interest = schedule.total_interest();
    let months = Decimal::from(schedule.months());

    let fees = FeesBreakdown {
        processing_fee: params.fees.processing_fee,
        appraisal_fee: params.fees.appraisal_fee,
        broker_fee: params.fees.broker_fee,
        total: params.fees.total(),
    };

    let total_cost = financed
        + total_interest
        + (monthly_insurance + monthly_maintenance) * months
        + fees.total;

    let (effective_interest_rate, repayment_rate) = if loan_amount > Decimal::ZERO {
        let effective = total_interest / loan_amount / Decimal::from(params.loan_term_years)
            * dec!(100);
        let repayment = (schedule.base_monthly_payment * dec!(12) / loan_amount
            - params.interest_rate / dec!(100))
            * dec!(100);
        (effective, repayment)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let loan_to_value = if params.property_price > Decimal::ZERO {
        financed / params.property_price * dec!(100)
    } else {
        Decimal::ZERO
    };
    let equity_ratio = if params.property_price > Decimal::ZERO {
        params.equity / params.property_price * dec!(100)
    } else {
        Decimal::ZERO
    };

    let remaining_debt_after_fixed_rate = params
        .fixed_rate_period_years
        .and_then(|fixed| schedule.yearly.iter().find(|y| y.year == fixed))
        .map(|y| y.remaining_debt)
        .unwrap_or(Decimal::ZERO);

    FinancingResult {
        loan_amount,
        base_monthly_payment: schedule.base_monthly_payment,
        monthly_payment: schedule.base_monthly_payment + monthly_insurance + monthly_maintenance,
        monthly_insurance,
        monthly_maintenance,
        total_interest,
        total_cost,
        schedule: schedule.entries,
        yearly: schedule.yearly,
        effective_interest_rate,
        loan_to_value,
        repayment_rate,
        equity_ratio,
        fixed_rate_period_years: params.fixed_rate_period_years,
        remaining_debt_after_fixed_rate,
        fees,
    }
}
