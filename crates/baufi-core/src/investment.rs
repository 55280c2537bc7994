//! Rental investment metrics on top of a financing result.
//!
//! Ratios that have no defined value (cash-on-cash at zero equity,
//! break-even with non-positive cashflow) are reported as `None`,
//! never as a division by zero or a negative year count.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculator::FinancingResult;
use crate::types::{FinancingParameters, Money, Rate};

/// Yearly maintenance estimate, percent of the property price.
const MAINTENANCE_COST_RATE: Decimal = dec!(1.5);
/// Property management estimate, percent of the effective rent.
const MANAGEMENT_COST_RATE: Decimal = dec!(3);
/// Flat yearly building insurance estimate.
const INSURANCE_ESTIMATE: Decimal = dec!(500);
/// Yearly property tax estimate, percent of the property price.
const PROPERTY_TAX_RATE: Decimal = dec!(0.35);

/// Estimated yearly operating costs deducted for the net yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingCosts {
    pub maintenance: Money,
    pub management: Money,
    pub insurance: Money,
    pub property_tax: Money,
    pub total: Money,
}

/// Yield, cashflow and return metrics for a rented-out property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    /// Raw yearly rent over the purchase price, percent.
    pub gross_yield: Rate,
    /// Yearly rent after the vacancy haircut.
    pub effective_yearly_rent: Money,
    /// Monthly rent minus the all-in monthly payment, pre-tax and before
    /// operating costs.
    pub monthly_cashflow: Money,
    /// Yearly cashflow over equity, percent. `None` with zero equity.
    pub cash_on_cash_return: Option<Rate>,
    /// Effective rent minus operating costs, over the purchase price.
    pub net_yield: Rate,
    pub operating_costs: OperatingCosts,
    /// Years until the cashflow has recovered the equity. `None` when
    /// the cashflow is not positive.
    pub break_even_years: Option<u32>,
}

/// Compute investment metrics from a financing result and rental
/// assumptions. `vacancy_rate` is in percent of the yearly rent.
pub fn analyze_investment(
    result: &FinancingResult,
    params: &FinancingParameters,
    monthly_rent: Money,
    vacancy_rate: Rate,
) -> InvestmentMetrics {
    let yearly_rent = monthly_rent * dec!(12);
    let effective_yearly_rent = yearly_rent * (Decimal::ONE - vacancy_rate / dec!(100));

    let gross_yield = if params.property_price > Decimal::ZERO {
        yearly_rent / params.property_price * dec!(100)
    } else {
        Decimal::ZERO
    };

    let operating_costs = {
        let maintenance = params.property_price * MAINTENANCE_COST_RATE / dec!(100);
        let management = effective_yearly_rent * MANAGEMENT_COST_RATE / dec!(100);
        let property_tax = params.property_price * PROPERTY_TAX_RATE / dec!(100);
        OperatingCosts {
            maintenance,
            management,
            insurance: INSURANCE_ESTIMATE,
            property_tax,
            total: maintenance + management + INSURANCE_ESTIMATE + property_tax,
        }
    };

    let net_yield = if params.property_price > Decimal::ZERO {
        (effective_yearly_rent - operating_costs.total) / params.property_price * dec!(100)
    } else {
        Decimal::ZERO
    };

    let monthly_cashflow = monthly_rent - result.monthly_payment;

    let cash_on_cash_return = if params.equity > Decimal::ZERO {
        Some(monthly_cashflow * dec!(12) / params.equity * dec!(100))
    } else {
        None
    };

    let break_even_years = if monthly_cashflow > Decimal::ZERO {
        (params.equity / (monthly_cashflow * dec!(12))).ceil().to_u32()
    } else {
        None
    };

    InvestmentMetrics {
        gross_yield,
        effective_yearly_rent,
        monthly_cashflow,
        cash_on_cash_return,
        net_yield,
        operating_costs,
        break_even_years,
    }
}
