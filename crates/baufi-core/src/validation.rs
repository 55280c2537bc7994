use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::FinancingParameters;

/// Minimum equity share below which financing is considered thin.
const THIN_EQUITY_THRESHOLD: Decimal = dec!(10);

/// How strongly an issue affects the calculation pipeline.
///
/// Errors block the calculator; warnings are surfaced next to results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding about a parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Validate a parameter set, producing an ordered list of issues.
///
/// Pure and total: invalid numeric input yields issues, never a panic or
/// an `Err`. Callers must refuse to calculate while
/// [`has_blocking_errors`] is true.
pub fn validate(params: &FinancingParameters) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if params.property_price <= Decimal::ZERO {
        issues.push(ValidationIssue::error(
            "property_price",
            "Property price must be greater than zero",
        ));
    }

    if params.equity < Decimal::ZERO {
        issues.push(ValidationIssue::error(
            "equity",
            "Equity must not be negative",
        ));
    } else if params.total_investment() > Decimal::ZERO {
        let equity_share = params.equity / params.total_investment() * dec!(100);
        if params.equity > params.total_investment() {
            issues.push(ValidationIssue::warning(
                "equity",
                "Equity exceeds the total investment, likely an input mistake",
            ));
        } else if equity_share < THIN_EQUITY_THRESHOLD {
            issues.push(ValidationIssue::warning(
                "equity",
                format!(
                    "Equity share {:.1}% is below 10%; thin equity raises financing risk",
                    equity_share
                ),
            ));
        }
    }

    if params.interest_rate < Decimal::ZERO || params.interest_rate > dec!(20) {
        issues.push(ValidationIssue::error(
            "interest_rate",
            "Interest rate must be between 0% and 20%",
        ));
    }

    if params.loan_term_years < 1 || params.loan_term_years > 50 {
        issues.push(ValidationIssue::error(
            "loan_term_years",
            "Loan term must be between 1 and 50 years",
        ));
    }

    if let Some(fixed) = params.fixed_rate_period_years {
        if fixed > params.loan_term_years {
            issues.push(ValidationIssue::error(
                "fixed_rate_period_years",
                "Fixed-rate period must not exceed the loan term",
            ));
        }
    }

    if params.maintenance_rate < Decimal::ZERO {
        issues.push(ValidationIssue::error(
            "maintenance_rate",
            "Maintenance rate must not be negative",
        ));
    }

    if params.include_insurance && params.insurance_rate < Decimal::ZERO {
        issues.push(ValidationIssue::error(
            "insurance_rate",
            "Insurance rate must not be negative",
        ));
    }

    issues
}

/// True when any issue is a blocking error.
pub fn has_blocking_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_params() -> FinancingParameters {
        FinancingParameters {
            property_price: dec!(500_000),
            equity: dec!(100_000),
            interest_rate: dec!(3.45),
            loan_term_years: 25,
            additional_costs: dec!(35_000),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_params_produce_no_issues() {
        assert!(validate(&valid_params()).is_empty());
    }

    #[test]
    fn test_zero_price_is_blocking() {
        let params = FinancingParameters {
            property_price: Decimal::ZERO,
            ..valid_params()
        };
        let issues = validate(&params);
        assert!(has_blocking_errors(&issues));
        assert_eq!(issues[0].field, "property_price");
    }

    #[test]
    fn test_rate_out_of_range_is_blocking() {
        let params = FinancingParameters {
            interest_rate: dec!(25),
            ..valid_params()
        };
        let issues = validate(&params);
        assert!(has_blocking_errors(&issues));
        assert!(issues.iter().any(|i| i.field == "interest_rate"));
    }

    #[test]
    fn test_thin_equity_warns_but_does_not_block() {
        let params = FinancingParameters {
            equity: dec!(20_000),
            ..valid_params()
        };
        let issues = validate(&params);
        assert!(!has_blocking_errors(&issues));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_over_financed_warns() {
        let params = FinancingParameters {
            equity: dec!(600_000),
            ..valid_params()
        };
        let issues = validate(&params);
        assert!(!has_blocking_errors(&issues));
        assert!(issues.iter().any(|i| i.message.contains("exceeds")));
    }

    #[test]
    fn test_fixed_rate_period_longer_than_term() {
        let params = FinancingParameters {
            fixed_rate_period_years: Some(30),
            ..valid_params()
        };
        assert!(has_blocking_errors(&validate(&params)));
    }

    #[test]
    fn test_negative_rates_are_blocking() {
        let params = FinancingParameters {
            maintenance_rate: dec!(-1),
            include_insurance: true,
            insurance_rate: dec!(-0.2),
            ..valid_params()
        };
        let issues = validate(&params);
        let errors: Vec<_> = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_term_bounds() {
        for term in [0u32, 51] {
            let params = FinancingParameters {
                loan_term_years: term,
                ..valid_params()
            };
            assert!(has_blocking_errors(&validate(&params)), "term {term}");
        }
    }
}
