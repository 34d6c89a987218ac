// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Saved routes and side-by-side comparison of their balances.
//!
//! Storage sits behind the [`ScenarioRepository`] trait.
//! [`InMemoryScenarioRepository`] keeps scenarios for the lifetime of the
//! process.  Nothing in the calculation itself depends on this module.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Connection, Error, ProcessNode, Summary, TechnologyLookup};

/// Length of the token under which a scenario is shared.
const SHARE_TOKEN_LEN: usize = 8;

/// The content of a scenario, as submitted for saving.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewScenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub nodes: Vec<ProcessNode>,
    pub edges: Vec<Connection>,
}

/// A saved route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub description: String,
    pub nodes: Vec<ProcessNode>,
    pub edges: Vec<Connection>,
    /// Short public token the scenario can also be fetched by.
    pub share_token: String,
    /// Unix timestamp, in seconds.
    pub created_at: u64,
}

/// Storage for scenarios.
pub trait ScenarioRepository {
    /// Saves a scenario under a fresh id and share token, and returns it.
    fn create(&mut self, scenario: NewScenario) -> Result<Scenario, Error>;

    fn get(&self, id: &str) -> Result<Scenario, Error>;

    /// Looks a scenario up by its share token.
    fn get_shared(&self, share_token: &str) -> Result<Scenario, Error>;

    /// All scenarios, oldest first.
    fn list(&self) -> Vec<Scenario>;

    fn delete(&mut self, id: &str) -> Result<(), Error>;
}

/// A [`ScenarioRepository`] that keeps scenarios in memory.
#[derive(Debug, Default)]
pub struct InMemoryScenarioRepository {
    scenarios: Vec<Scenario>,
}

impl InMemoryScenarioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: &str) -> Result<usize, Error> {
        self.scenarios
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::scenario_not_found(format!("Scenario '{id}' not found.")))
    }
}

impl ScenarioRepository for InMemoryScenarioRepository {
    fn create(&mut self, scenario: NewScenario) -> Result<Scenario, Error> {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| Error::internal(format!("System clock is before 1970: {err}")))?
            .as_secs();

        let mut share_token = Uuid::new_v4().simple().to_string();
        share_token.truncate(SHARE_TOKEN_LEN);

        let scenario = Scenario {
            id: Uuid::new_v4().to_string(),
            name: scenario.name,
            description: scenario.description,
            nodes: scenario.nodes,
            edges: scenario.edges,
            share_token,
            created_at,
        };
        tracing::debug!("Saved scenario {} ({}).", scenario.id, scenario.name);

        self.scenarios.push(scenario.clone());
        Ok(scenario)
    }

    fn get(&self, id: &str) -> Result<Scenario, Error> {
        Ok(self.scenarios[self.position(id)?].clone())
    }

    fn get_shared(&self, share_token: &str) -> Result<Scenario, Error> {
        self.scenarios
            .iter()
            .find(|s| s.share_token == share_token)
            .cloned()
            .ok_or_else(|| Error::scenario_not_found("Shared scenario not found."))
    }

    fn list(&self) -> Vec<Scenario> {
        self.scenarios.clone()
    }

    fn delete(&mut self, id: &str) -> Result<(), Error> {
        let position = self.position(id)?;
        self.scenarios.remove(position);
        Ok(())
    }
}

/// How the balance of one compared scenario went.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Summary(Summary),
    /// The message of the error that stopped the balance.
    Error(String),
}

/// One entry of a scenario comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub scenario_id: String,
    pub scenario_name: String,
    #[serde(flatten)]
    pub outcome: ComparisonOutcome,
}

/// Runs the balance of each of the given scenarios, in the given order.
///
/// At least two ids are required, and all of them must exist.  A scenario
/// whose balance fails is reported with its error message and doesn't stop
/// the comparison.
pub fn compare_scenarios<R, C>(
    repository: &R,
    scenario_ids: &[&str],
    catalog: &C,
) -> Result<Vec<ScenarioComparison>, Error>
where
    R: ScenarioRepository + ?Sized,
    C: TechnologyLookup + ?Sized,
{
    if scenario_ids.len() < 2 {
        return Err(Error::invalid_request(
            "At least 2 scenarios are required for a comparison.",
        ));
    }

    scenario_ids
        .iter()
        .map(|id| {
            let scenario = repository.get(id)?;
            let outcome = match crate::calculate(scenario.nodes, scenario.edges, catalog) {
                Ok(result) => ComparisonOutcome::Summary(result.summary),
                Err(err) => ComparisonOutcome::Error(err.to_string()),
            };
            Ok(ScenarioComparison {
                scenario_id: scenario.id,
                scenario_name: scenario.name,
                outcome,
            })
        })
        .collect()
}
