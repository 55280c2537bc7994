//! Monthly amortization schedule and its yearly rollup.
//!
//! One forward pass over the loan term: interest on the open balance,
//! scheduled principal from the annuity payment, then any special
//! repayments, each capped so the remaining debt never goes negative.
//! The terminal entry forces the balance to exactly zero.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::annuity::{annuity_payment, monthly_rate};
use crate::types::{FinancingParameters, Money, RepaymentFrequency, SpecialRepayment};

/// One month of the amortization schedule. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based month index.
    pub month: u32,
    /// Calendar year of the schedule, `ceil(month / 12)`.
    pub year: u32,
    /// Total paid this month (interest + principal + special repayments).
    pub payment: Money,
    pub interest: Money,
    /// Principal repaid this month, including special repayments.
    pub principal: Money,
    /// Open balance after this month's payment. Non-increasing, ≥ 0.
    pub remaining_debt: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
    /// Whether this month falls inside the fixed-rate period.
    pub is_fixed_rate_period: bool,
}

/// Aggregate of one schedule year, used for chart data and the
/// fixed-rate residual debt lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyAmortization {
    pub year: u32,
    /// Balance at the year's last scheduled month.
    pub remaining_debt: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
    /// Interest paid within this year alone.
    pub yearly_interest: Money,
    /// Principal repaid within this year alone.
    pub yearly_principal: Money,
    /// Repayment progress in percent of the loan amount, in [0, 100].
    pub progress: Decimal,
}

/// The full schedule produced by one calculation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub loan_amount: Money,
    /// Loan-only annuity payment (excludes insurance and maintenance).
    pub base_monthly_payment: Money,
    pub entries: Vec<AmortizationEntry>,
    pub yearly: Vec<YearlyAmortization>,
}

impl Schedule {
    /// Total interest over the whole schedule.
    pub fn total_interest(&self) -> Money {
        self.entries
            .last()
            .map(|e| e.cumulative_interest)
            .unwrap_or(Decimal::ZERO)
    }

    /// Length of the schedule in months (may be shorter than the term
    /// when special repayments retire the loan early).
    pub fn months(&self) -> u32 {
        self.entries.len() as u32
    }
}

/// Whether a special repayment triggers at the given month.
fn applies_at(sr: &SpecialRepayment, month: u32) -> bool {
    if month < sr.start_month {
        return false;
    }
    if let Some(end) = sr.end_month {
        if month > end {
            return false;
        }
    }
    match sr.frequency {
        RepaymentFrequency::Monthly => true,
        RepaymentFrequency::Quarterly => (month - sr.start_month) % 3 == 0,
        RepaymentFrequency::Yearly => (month - sr.start_month) % 12 == 0,
        RepaymentFrequency::Once => month == sr.start_month,
    }
}

/// Build the amortization schedule for a validated parameter set.
///
/// Callers must have rejected blocking validation errors first; this is
/// a pure numeric function with no error path. A fully self-financed
/// purchase (loan ≤ 0) yields an empty schedule.
pub fn build_schedule(params: &FinancingParameters) -> Schedule {
    let loan_amount = params.loan_amount();
    if loan_amount <= Decimal::ZERO {
        return Schedule {
            loan_amount,
            base_monthly_payment: Decimal::ZERO,
            entries: Vec::new(),
            yearly: Vec::new(),
        };
    }

    let rate = monthly_rate(params.interest_rate);
    let months = params.loan_term_years * 12;
    let base_payment = annuity_payment(loan_amount, rate, months);

    // Percentage-flagged special repayments resolve against the original
    // loan amount once, not against the shrinking balance.
    let specials: Vec<(Money, &SpecialRepayment)> = params
        .special_repayments
        .iter()
        .map(|sr| {
            let amount = if sr.is_percent_of_loan {
                sr.amount / dec!(100) * loan_amount
            } else {
                sr.amount
            };
            (amount, sr)
        })
        .collect();

    let mut entries = Vec::with_capacity(months as usize);
    let mut yearly = Vec::with_capacity(params.loan_term_years as usize);
    let mut remaining = loan_amount;
    let mut cumulative_interest = Decimal::ZERO;
    let mut cumulative_principal = Decimal::ZERO;
    let mut prev_year_interest = Decimal::ZERO;
    let mut prev_year_principal = Decimal::ZERO;

    for month in 1..=months {
        if remaining <= Decimal::ZERO {
            break;
        }

        let interest = remaining * rate;
        let mut principal = base_payment - interest;
        let mut extra = Decimal::ZERO;

        if params.include_repayment && month % 12 == 0 {
            let cap = remaining - principal;
            if cap > Decimal::ZERO {
                extra += params.repayment_amount.min(cap);
            }
        }

        for &(amount, sr) in &specials {
            if !applies_at(sr, month) {
                continue;
            }
            let cap = remaining - principal - extra;
            if cap <= Decimal::ZERO {
                break;
            }
            extra += amount.min(cap);
        }

        // Final-payment handling: snap to exactly zero, never negative
        // and never a residual left by the closed-form payment.
        if remaining < principal + extra {
            principal = remaining;
            extra = Decimal::ZERO;
        } else if month == months && principal + extra < remaining {
            principal = remaining - extra;
        }

        // The subtraction can round at Decimal's precision limit, so the
        // recorded principal is the actual balance delta; only the delta
        // telescopes to an exact principal sum over the schedule.
        let next = remaining - (principal + extra);
        let total_principal = remaining - next;
        remaining = next;
        cumulative_interest += interest;
        cumulative_principal += total_principal;

        let year = (month + 11) / 12;
        entries.push(AmortizationEntry {
            month,
            year,
            payment: interest + total_principal,
            interest,
            principal: total_principal,
            remaining_debt: remaining,
            cumulative_interest,
            cumulative_principal,
            is_fixed_rate_period: params
                .fixed_rate_period_years
                .map_or(false, |fixed| year <= fixed),
        });

        if month % 12 == 0 || month == months || remaining.is_zero() {
            yearly.push(YearlyAmortization {
                year,
                remaining_debt: remaining,
                cumulative_interest,
                cumulative_principal,
                yearly_interest: cumulative_interest - prev_year_interest,
                yearly_principal: cumulative_principal - prev_year_principal,
                progress: (loan_amount - remaining) / loan_amount * dec!(100),
            });
            prev_year_interest = cumulative_interest;
            prev_year_principal = cumulative_principal;
        }
    }

    Schedule {
        loan_amount,
        base_monthly_payment: base_payment,
        entries,
        yearly,
    }
}
