use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use uuid::Uuid;

use baufi_core::validation::{has_blocking_errors, validate};
use baufi_core::{calculate, ScenarioStore};

use crate::commands::calculate::read_params;

/// Scenario CRUD against a directory-backed store
#[derive(Subcommand)]
pub enum ScenarioCommand {
    /// Calculate and save the parameters as a named scenario
    Save(SaveArgs),
    /// List all stored scenarios
    List(StoreArgs),
    /// Show one scenario by id
    Load(IdArgs),
    /// Copy a scenario under a new id
    Duplicate(DuplicateArgs),
    /// Delete a scenario by id (succeeds if already absent)
    Delete(IdArgs),
}

#[derive(Args)]
pub struct StoreArgs {
    /// Scenario store directory
    #[arg(long, default_value = "scenarios")]
    pub store: String,
}

#[derive(Args)]
pub struct SaveArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Path to JSON parameters file
    #[arg(long)]
    pub input: Option<String>,

    /// Scenario name
    #[arg(long)]
    pub name: String,

    /// Scenario description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Monthly rent used for the scenario score's yield bonus
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,
}

#[derive(Args)]
pub struct IdArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Scenario id
    pub id: Uuid,
}

#[derive(Args)]
pub struct DuplicateArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Scenario id to copy
    pub id: Uuid,

    /// Name for the copy
    #[arg(long)]
    pub name: Option<String>,
}

pub fn run_scenario(cmd: ScenarioCommand) -> Result<Value, Box<dyn std::error::Error>> {
    match cmd {
        ScenarioCommand::Save(args) => {
            let params = read_params(&args.input)?;
            let issues = validate(&params);
            if has_blocking_errors(&issues) {
                return Err("cannot save a scenario with blocking validation errors".into());
            }
            let result = calculate(&params);
            let mut store = ScenarioStore::open(&args.store.store)?;
            let scenario = store.save(
                args.name,
                args.description,
                params,
                result,
                args.monthly_rent,
            )?;
            Ok(json!({
                "result": {
                    "id": scenario.id,
                    "name": scenario.name,
                    "score": scenario.score,
                    "created_at": scenario.created_at,
                }
            }))
        }
        ScenarioCommand::List(args) => {
            let store = ScenarioStore::open(&args.store)?;
            let listed: Vec<Value> = store
                .list()
                .into_iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "name": s.name,
                        "description": s.description,
                        "score": s.score,
                        "loan_amount": s.result.loan_amount,
                        "monthly_payment": s.result.monthly_payment,
                        "created_at": s.created_at,
                    })
                })
                .collect();
            Ok(json!(listed))
        }
        ScenarioCommand::Load(args) => {
            let store = ScenarioStore::open(&args.store.store)?;
            let scenario = store.load(args.id)?;
            Ok(serde_json::to_value(scenario)?)
        }
        ScenarioCommand::Duplicate(args) => {
            let mut store = ScenarioStore::open(&args.store.store)?;
            let copy = store.duplicate(args.id, args.name)?;
            Ok(json!({
                "result": { "id": copy.id, "name": copy.name }
            }))
        }
        ScenarioCommand::Delete(args) => {
            let mut store = ScenarioStore::open(&args.store.store)?;
            store.delete(args.id)?;
            Ok(json!({ "result": { "deleted": args.id } }))
        }
    }
}
