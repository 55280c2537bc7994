use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Exact decimal arithmetic, never f64.
pub type Money = Decimal;

/// Interest and cost rates, expressed in percent (3.45 = 3.45% p.a.).
pub type Rate = Decimal;

/// How often a special repayment recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentFrequency {
    Monthly,
    Quarterly,
    Yearly,
    Once,
}

/// An extra principal payment on top of the regular annuity.
///
/// The amount is either an absolute sum or, when `is_percent_of_loan` is
/// set, a percentage of the original loan amount (resolved once, before
/// the schedule is built). Each application is capped so the remaining
/// debt never goes negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialRepayment {
    pub amount: Money,
    #[serde(default)]
    pub is_percent_of_loan: bool,
    pub frequency: RepaymentFrequency,
    /// First month (1-based) at which this repayment applies.
    pub start_month: u32,
    /// Last month at which this repayment may apply, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u32>,
}

/// One-off acquisition fees charged by lender and intermediaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    #[serde(default)]
    pub processing_fee: Money,
    #[serde(default)]
    pub appraisal_fee: Money,
    #[serde(default)]
    pub broker_fee: Money,
}

impl Fees {
    pub fn total(&self) -> Money {
        self.processing_fee + self.appraisal_fee + self.broker_fee
    }
}

/// Input parameters for a financing calculation.
///
/// Immutable per calculation: the engine recomputes the whole
/// [`FinancingResult`](crate::calculator::FinancingResult) on every change
/// instead of patching a previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingParameters {
    /// Purchase price of the property.
    pub property_price: Money,
    /// Equity brought in by the buyer.
    pub equity: Money,
    /// Nominal annual interest rate in percent.
    pub interest_rate: Rate,
    /// Total loan term in years.
    pub loan_term_years: u32,
    /// Fixed-rate period (Zinsbindung) in years; must not exceed the term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_rate_period_years: Option<u32>,
    /// Acquisition side costs (notary, transfer tax, ...) financed on top.
    #[serde(default)]
    pub additional_costs: Money,
    #[serde(default)]
    pub include_insurance: bool,
    /// Building insurance, percent of property price per year.
    #[serde(default)]
    pub insurance_rate: Rate,
    #[serde(default)]
    pub include_repayment: bool,
    /// Simple yearly special repayment, currency per year.
    #[serde(default)]
    pub repayment_amount: Money,
    /// Maintenance reserve, percent of property price per year.
    #[serde(default)]
    pub maintenance_rate: Rate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special_repayments: Vec<SpecialRepayment>,
    #[serde(default)]
    pub fees: Fees,
}

impl FinancingParameters {
    /// The financed amount. Derived, never stored independently:
    /// price − equity + additional costs.
    pub fn loan_amount(&self) -> Money {
        self.property_price - self.equity + self.additional_costs
    }

    /// Total capital required for the purchase (price + side costs).
    pub fn total_investment(&self) -> Money {
        self.property_price + self.additional_costs
    }
}

impl Default for FinancingParameters {
    fn default() -> Self {
        Self {
            property_price: Decimal::ZERO,
            equity: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            loan_term_years: 30,
            fixed_rate_period_years: None,
            additional_costs: Decimal::ZERO,
            include_insurance: false,
            insurance_rate: Decimal::ZERO,
            include_repayment: false,
            repayment_amount: Decimal::ZERO,
            maintenance_rate: Decimal::ZERO,
            special_repayments: Vec::new(),
            fees: Fees::default(),
        }
    }
}
