use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use baufi_core::validation::{has_blocking_errors, validate};
use baufi_core::{analyze_investment, calculate};

use crate::commands::calculate::read_params;

/// Arguments for rental investment analysis
#[derive(Args)]
pub struct InvestArgs {
    /// Path to JSON parameters file
    #[arg(long)]
    pub input: Option<String>,

    /// Expected monthly rent
    #[arg(long)]
    pub monthly_rent: Decimal,

    /// Vacancy rate in percent of the yearly rent
    #[arg(long, default_value = "0")]
    pub vacancy_rate: Decimal,
}

pub fn run_invest(args: InvestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = read_params(&args.input)?;
    let issues = validate(&params);
    if has_blocking_errors(&issues) {
        return Err("parameters have blocking validation errors; fix them first".into());
    }

    let result = calculate(&params);
    let metrics = analyze_investment(&result, &params, args.monthly_rent, args.vacancy_rate);
    Ok(json!({
        "result": metrics,
        "financing": {
            "loan_amount": result.loan_amount,
            "monthly_payment": result.monthly_payment,
        }
    }))
}
