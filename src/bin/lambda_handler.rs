//! AWS Lambda handler for investment projections
//!
//! Accepts a plan (or a surplus and risk profile) plus the user's choices as
//! JSON and returns the projected value range, formatted for display, along
//! with the horizon preset table.
//!
//! Works for direct invocation and for Lambda Function URLs, where the request
//! arrives as a string `body` and the response is wrapped in an HTTP envelope.

use investment_planner::{
    format::{format_inr, format_range},
    plan::plan_from_value,
    project, InvestmentPlan, PlannerError, RiskProfile, RiskTier, ScenarioOutcome, ScenarioRunner,
    plan::DEFAULT_PREDICTED_SURPLUS,
    config::{DEFAULT_INVESTMENT_PCT, DEFAULT_PROJECTION_YEARS},
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Input for one projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Full plan as returned by the analytics service
    #[serde(default)]
    pub plan: Option<Value>,

    /// Used with `risk_profile` to build a plan when `plan` is absent
    #[serde(default = "default_surplus")]
    pub predicted_surplus: f64,

    #[serde(default = "default_profile")]
    pub risk_profile: RiskProfile,

    /// Percent of the surplus invested each month (default: 50)
    #[serde(default = "default_investment_pct")]
    pub investment_pct: f64,

    /// Horizon in years (default: 5)
    #[serde(default = "default_projection_years")]
    pub projection_years: u32,

    /// Instrument name per tier label; tiers not listed keep the first option
    #[serde(default)]
    pub selections: BTreeMap<RiskTier, String>,

    /// Include the 1/5/10/15 year table (default: true)
    #[serde(default = "default_true")]
    pub include_horizons: bool,
}

fn default_surplus() -> f64 { DEFAULT_PREDICTED_SURPLUS }
fn default_profile() -> RiskProfile { RiskProfile::Moderate }
fn default_investment_pct() -> f64 { DEFAULT_INVESTMENT_PCT }
fn default_projection_years() -> u32 { DEFAULT_PROJECTION_YEARS }
fn default_true() -> bool { true }

/// Output for one projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub risk_profile: RiskProfile,
    pub predicted_surplus: f64,
    pub monthly_investment: f64,
    pub projection_years: u32,
    pub selections: BTreeMap<RiskTier, String>,
    pub total_invested: f64,
    pub projected_min: f64,
    pub projected_max: f64,
    pub formatted: FormattedValues,
    pub horizons: Vec<ScenarioOutcome>,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct FormattedValues {
    pub monthly_investment: String,
    pub total_invested: String,
    pub value_range: String,
}

fn build_plan(request: &ProjectionRequest) -> Result<InvestmentPlan, PlannerError> {
    match &request.plan {
        Some(value) => plan_from_value(value.clone()),
        None => {
            let plan = InvestmentPlan::from_profile(request.predicted_surplus, request.risk_profile);
            plan.validate()?;
            Ok(plan)
        }
    }
}

fn run_projection(request: ProjectionRequest) -> Result<ProjectionResponse, PlannerError> {
    let start = std::time::Instant::now();

    let plan = build_plan(&request)?;
    let mut selection = plan.default_selection();
    for (tier, name) in &request.selections {
        plan.select(&mut selection, *tier, name)?;
    }

    let input = plan.projection_input(request.investment_pct, request.projection_years, selection.clone())?;
    let result = project(&input)?;

    let horizons = if request.include_horizons {
        ScenarioRunner::new(plan.clone()).run_horizons(request.investment_pct, &selection)?
    } else {
        Vec::new()
    };

    info!(
        "Projected {} plan at {}% over {} years",
        plan.risk_profile, request.investment_pct, request.projection_years
    );

    Ok(ProjectionResponse {
        risk_profile: plan.risk_profile,
        predicted_surplus: plan.predicted_surplus,
        monthly_investment: input.monthly_investment,
        projection_years: input.projection_years,
        selections: selection.iter().map(|(tier, option)| (tier, option.name.clone())).collect(),
        total_invested: result.total_invested,
        projected_min: result.projected_min,
        projected_max: result.projected_max,
        formatted: FormattedValues {
            monthly_investment: format_inr(input.monthly_investment),
            total_invested: format_inr(result.total_invested),
            value_range: format_range(result.projected_min, result.projected_max),
        },
        horizons,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

fn http_response(status: u16, body: Value) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type",
        },
        "body": body.to_string(),
    })
}

/// Function URL events carry the HTTP request under `requestContext`
fn is_http_event(event: &Value) -> bool {
    event.get("requestContext").is_some()
}

/// Lambda handler function
async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    handle_payload(event.payload).await
}

/// Route one event payload, direct or Function URL
async fn handle_payload(payload: Value) -> Result<Value, Error> {
    let http = is_http_event(&payload);

    if http {
        let method = payload
            .pointer("/requestContext/http/method")
            .and_then(Value::as_str)
            .unwrap_or("POST");
        if method == "OPTIONS" {
            return Ok(http_response(200, Value::Null));
        }
    }

    let body = if http {
        let raw = payload.get("body").and_then(Value::as_str).unwrap_or("{}");
        if payload.get("isBase64Encoded").and_then(Value::as_bool).unwrap_or(false) {
            return Ok(http_response(400, json!({ "error": "base64-encoded bodies are not supported" })));
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => value,
            Err(e) => return Ok(http_response(400, json!({ "error": format!("Invalid JSON: {}", e) }))),
        }
    } else {
        payload
    };

    let outcome = serde_json::from_value::<ProjectionRequest>(body)
        .map_err(PlannerError::from)
        .and_then(run_projection);

    match outcome {
        Ok(response) => {
            let value = serde_json::to_value(&response)?;
            Ok(if http { http_response(200, value) } else { value })
        }
        Err(e) => {
            warn!("Projection request rejected: {}", e);
            let value = json!({ "error": e.to_string() });
            Ok(if http { http_response(400, value) } else { value })
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: Value) -> ProjectionRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = request(json!({}));
        assert_eq!(req.investment_pct, 50.0);
        assert_eq!(req.projection_years, 5);
        assert_eq!(req.risk_profile, RiskProfile::Moderate);
        assert!(req.include_horizons);
    }

    #[test]
    fn test_projection_with_selection_override() {
        let req = request(json!({
            "predicted_surplus": 20000.0,
            "risk_profile": "Aggressive",
            "investment_pct": 25,
            "projection_years": 10,
            "selections": { "High Risk": "Gold" },
            "include_horizons": false
        }));

        let response = run_projection(req).unwrap();
        assert_eq!(response.monthly_investment, 5000.0);
        assert_eq!(response.total_invested, 600_000.0);
        assert_eq!(response.selections[&RiskTier::High], "Gold");
        assert_eq!(response.selections[&RiskTier::Low], "Fixed Deposit (FD)");
        assert!(response.projected_min <= response.projected_max);
        assert!(response.horizons.is_empty());
        assert_eq!(response.formatted.total_invested, "₹6,00,000");
    }

    #[test]
    fn test_unknown_instrument_is_rejected() {
        let req = request(json!({ "selections": { "Low Risk": "Crypto" } }));
        assert!(matches!(run_projection(req), Err(PlannerError::UnknownInstrument { .. })));
    }

    #[test]
    fn test_service_error_plan_is_rejected() {
        let req = request(json!({ "plan": { "error": "Could not generate an investment plan at this time." } }));
        assert!(matches!(run_projection(req), Err(PlannerError::ServiceError(_))));
    }

    fn body_of(response: &Value) -> Value {
        serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_preflight_returns_ok() {
        let event = json!({ "requestContext": { "http": { "method": "OPTIONS" } } });
        let response = handle_payload(event).await.unwrap();
        assert_eq!(response["statusCode"], 200);
        assert_eq!(response["headers"]["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_base64_body_is_rejected() {
        let event = json!({
            "requestContext": { "http": { "method": "POST" } },
            "body": "e30=",
            "isBase64Encoded": true
        });
        let response = handle_payload(event).await.unwrap();
        assert_eq!(response["statusCode"], 400);
        assert!(body_of(&response)["error"].as_str().unwrap().contains("base64"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let event = json!({
            "requestContext": { "http": { "method": "POST" } },
            "body": "{\"investment_pct\": "
        });
        let response = handle_payload(event).await.unwrap();
        assert_eq!(response["statusCode"], 400);
        assert!(body_of(&response)["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_function_url_projection() {
        let event = json!({
            "requestContext": { "http": { "method": "POST" } },
            "body": json!({ "predicted_surplus": 20000.0, "investment_pct": 10, "projection_years": 1 }).to_string()
        });
        let response = handle_payload(event).await.unwrap();
        assert_eq!(response["statusCode"], 200);
        let body = body_of(&response);
        assert_eq!(body["monthly_investment"], 2000.0);
        assert_eq!(body["total_invested"], 24000.0);
        assert_eq!(body["horizons"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_direct_invocation() {
        let response = handle_payload(json!({ "projection_years": 2, "include_horizons": false }))
            .await
            .unwrap();
        assert!(response.get("statusCode").is_none());
        assert_eq!(response["projection_years"], 2);
        assert_eq!(response["formatted"]["monthly_investment"], "₹25,000");

        let rejected = handle_payload(json!({ "projection_years": 0 })).await.unwrap();
        assert!(rejected["error"].as_str().unwrap().contains("horizon"));
    }

    #[test]
    fn test_http_envelope() {
        let response = http_response(400, json!({ "error": "bad" }));
        assert_eq!(response["statusCode"], 400);
        assert_eq!(response["body"], "{\"error\":\"bad\"}");
        assert!(is_http_event(&json!({ "requestContext": {}, "body": "{}" })));
        assert!(!is_http_event(&json!({ "investment_pct": 10 })));
    }
}
