use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use baufi_core::{compare_offers, OfferSortKey};

/// Arguments for bank offer comparison
#[derive(Args)]
pub struct OffersArgs {
    /// Loan amount to price the catalogue against
    #[arg(long)]
    pub loan_amount: Decimal,

    /// Loan term in years
    #[arg(long)]
    pub loan_term: u32,

    /// Ranking key
    #[arg(long, value_enum, default_value = "total-cost")]
    pub sort_by: SortByArg,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum SortByArg {
    TotalCost,
    EffectiveRate,
    MonthlyPayment,
}

impl From<SortByArg> for OfferSortKey {
    fn from(arg: SortByArg) -> Self {
        match arg {
            SortByArg::TotalCost => OfferSortKey::TotalCost,
            SortByArg::EffectiveRate => OfferSortKey::EffectiveRate,
            SortByArg::MonthlyPayment => OfferSortKey::MonthlyPayment,
        }
    }
}

pub fn run_offers(args: OffersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let comparison = compare_offers(args.loan_amount, args.loan_term, args.sort_by.into());
    Ok(json!({ "result": comparison }))
}
