//! Named financing scenarios: snapshot, score, persist.
//!
//! A scenario freezes one (parameters, result) pair under a generated id.
//! The store keeps everything in memory and, when opened on a directory,
//! mirrors each scenario to its own JSON file. Writes go through a
//! temp-file-then-rename step so a crash mid-save can never corrupt
//! other scenarios.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculator::FinancingResult;
use crate::error::BaufiError;
use crate::types::{FinancingParameters, Money};
use crate::BaufiResult;

/// A saved financing scenario. Immutable once created, except through
/// explicit duplicate (new id) or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingScenario {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub parameters: FinancingParameters,
    pub result: FinancingResult,
    /// Heuristic quality score, 0–100.
    pub score: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Heuristic scenario score: base 50, +30 for positive cashflow (or,
/// without rent context, a schedule that fully amortizes), +20 for a
/// gross yield above 4%, capped at 100.
pub fn score_scenario(
    params: &FinancingParameters,
    result: &FinancingResult,
    monthly_rent: Option<Money>,
) -> u8 {
    let mut score: u8 = 50;

    let amortizes = result
        .schedule
        .last()
        .map(|e| e.remaining_debt.is_zero())
        .unwrap_or(false);
    let positive = match monthly_rent {
        Some(rent) => rent - result.monthly_payment > Decimal::ZERO,
        None => amortizes,
    };
    if positive {
        score += 30;
    }

    if let Some(rent) = monthly_rent {
        if params.property_price > Decimal::ZERO
            && rent * dec!(12) / params.property_price * dec!(100) > dec!(4)
        {
            score += 20;
        }
    }

    score.min(100)
}

/// Scenario CRUD with optional directory persistence.
#[derive(Debug, Default)]
pub struct ScenarioStore {
    scenarios: HashMap<Uuid, FinancingScenario>,
    dir: Option<PathBuf>,
}

impl ScenarioStore {
    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open (or create) a directory-backed store, loading every scenario
    /// file found there.
    pub fn open(dir: impl Into<PathBuf>) -> BaufiResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let mut scenarios = HashMap::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            // Leftover .tmp files from an interrupted save are not
            // scenarios and are skipped.
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            let scenario: FinancingScenario = serde_json::from_str(&contents)?;
            scenarios.insert(scenario.id, scenario);
        }

        debug!("opened scenario store with {} entries", scenarios.len());
        Ok(Self {
            scenarios,
            dir: Some(dir),
        })
    }

    /// Snapshot the given parameters and result under a new scenario.
    pub fn save(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: FinancingParameters,
        result: FinancingResult,
        monthly_rent: Option<Money>,
    ) -> BaufiResult<FinancingScenario> {
        let now = Utc::now();
        let scenario = FinancingScenario {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            score: score_scenario(&parameters, &result, monthly_rent),
            parameters,
            result,
            created_at: now,
            updated_at: now,
        };

        self.persist(&scenario)?;
        debug!("saved scenario {} ({})", scenario.name, scenario.id);
        self.scenarios.insert(scenario.id, scenario.clone());
        Ok(scenario)
    }

    /// All scenarios, oldest first.
    pub fn list(&self) -> Vec<&FinancingScenario> {
        let mut all: Vec<&FinancingScenario> = self.scenarios.values().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        all
    }

    pub fn load(&self, id: Uuid) -> BaufiResult<&FinancingScenario> {
        self.scenarios
            .get(&id)
            .ok_or(BaufiError::ScenarioNotFound(id))
    }

    /// Deep-copy a scenario under a new id and name.
    pub fn duplicate(
        &mut self,
        id: Uuid,
        new_name: Option<String>,
    ) -> BaufiResult<FinancingScenario> {
        let source = self.load(id)?;
        let now = Utc::now();
        let copy = FinancingScenario {
            id: Uuid::new_v4(),
            name: new_name.unwrap_or_else(|| format!("{} (copy)", source.name)),
            created_at: now,
            updated_at: now,
            ..source.clone()
        };

        self.persist(&copy)?;
        debug!("duplicated scenario {} -> {}", id, copy.id);
        self.scenarios.insert(copy.id, copy.clone());
        Ok(copy)
    }

    /// Remove a scenario. Idempotent: deleting an absent id succeeds.
    pub fn delete(&mut self, id: Uuid) -> BaufiResult<()> {
        self.scenarios.remove(&id);
        if let Some(dir) = &self.dir {
            match fs::remove_file(dir.join(format!("{id}.json"))) {
                Ok(()) => debug!("deleted scenario {id}"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Write one scenario file atomically (temp file, then rename).
    fn persist(&self, scenario: &FinancingScenario) -> BaufiResult<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        let tmp = dir.join(format!("{}.json.tmp", scenario.id));
        let path = dir.join(format!("{}.json", scenario.id));
        fs::write(&tmp, serde_json::to_string_pretty(scenario)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
