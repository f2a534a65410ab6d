//! Load investment plans (JSON) and instrument catalogs (CSV)

use super::{InstrumentOption, InvestmentPlan, RiskTier};
use crate::error::{PlannerError, Result};
use csv::Reader;
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row of an instrument catalog
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "MinReturn")]
    min_return: f64,
    #[serde(rename = "MaxReturn")]
    max_return: f64,
    #[serde(rename = "Description", default)]
    description: String,
}

impl CsvRow {
    fn into_option(self) -> Result<(RiskTier, InstrumentOption)> {
        let tier: RiskTier = self.tier.parse()?;
        let option = InstrumentOption::new(self.name, self.min_return, self.max_return, self.description);
        option.validate()?;
        Ok((tier, option))
    }
}

/// Load a plan from a JSON file
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<InvestmentPlan> {
    let file = File::open(path.as_ref())?;
    debug!("Loading investment plan from {}", path.as_ref().display());
    load_plan_from_reader(BufReader::new(file))
}

/// Load a plan from any reader holding the analytics service response body
///
/// An `{"error": "..."}` body is reported as `PlannerError::ServiceError`.
pub fn load_plan_from_reader<R: Read>(reader: R) -> Result<InvestmentPlan> {
    let value: Value = serde_json::from_reader(reader)?;
    plan_from_value(value)
}

/// Convert an already-parsed response body into a validated plan
pub fn plan_from_value(value: Value) -> Result<InvestmentPlan> {
    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(PlannerError::ServiceError(message.to_string()));
    }

    let plan: InvestmentPlan = serde_json::from_value(value)?;
    plan.validate()?;
    Ok(plan)
}

/// Load an instrument catalog from a CSV file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<BTreeMap<RiskTier, Vec<InstrumentOption>>> {
    let reader = Reader::from_path(path)?;
    read_catalog(reader)
}

/// Load an instrument catalog from any reader
pub fn load_catalog_from_reader<R: Read>(reader: R) -> Result<BTreeMap<RiskTier, Vec<InstrumentOption>>> {
    read_catalog(Reader::from_reader(reader))
}

fn read_catalog<R: Read>(mut reader: Reader<R>) -> Result<BTreeMap<RiskTier, Vec<InstrumentOption>>> {
    let mut catalog: BTreeMap<RiskTier, Vec<InstrumentOption>> = BTreeMap::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let (tier, option) = row.into_option()?;
        catalog.entry(tier).or_default().push(option);
    }

    debug!("Loaded catalog with {} instruments", catalog.values().map(Vec::len).sum::<usize>());
    Ok(catalog)
}
