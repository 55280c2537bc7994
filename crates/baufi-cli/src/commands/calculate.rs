use clap::Args;
use serde_json::{json, Value};

use baufi_core::types::FinancingParameters;
use baufi_core::validation::{has_blocking_errors, validate, Severity};
use baufi_core::calculate;

use crate::input;

/// Arguments for parameter validation
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to JSON parameters file
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the full financing calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Path to JSON parameters file
    #[arg(long)]
    pub input: Option<String>,

    /// Omit the monthly schedule and yearly rollup from the output
    #[arg(long)]
    pub summary: bool,
}

/// Read financing parameters from `--input` or piped stdin.
pub fn read_params(
    input: &Option<String>,
) -> Result<FinancingParameters, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        input::file::read_json(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err("--input <file.json> or stdin required".into())
    }
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = read_params(&args.input)?;
    let issues = validate(&params);
    Ok(json!({
        "result": {
            "blocking": has_blocking_errors(&issues),
            "issues": issues,
        }
    }))
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = read_params(&args.input)?;
    let issues = validate(&params);
    if has_blocking_errors(&issues) {
        let blocking: Vec<String> = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect();
        return Err(format!("blocking validation errors: {}", blocking.join("; ")).into());
    }

    let warnings: Vec<String> = issues
        .iter()
        .filter(|i| i.severity == Severity::Warning)
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect();

    let result = calculate(&params);
    let mut value = serde_json::to_value(&result)?;
    if args.summary {
        if let Value::Object(map) = &mut value {
            map.remove("schedule");
            map.remove("yearly");
        }
    }

    Ok(json!({ "result": value, "warnings": warnings }))
}
