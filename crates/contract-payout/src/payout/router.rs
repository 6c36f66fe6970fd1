use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::amount::ContractAmount;
use super::coordinator::{IntermediaryField, PayoutCoordinator, Selections};
use super::rules::{AppliedStep, RuleCatalog};

/// Router builder exposing the quote and rule listing endpoints.
pub fn payout_router(coordinator: Arc<PayoutCoordinator>) -> Router {
    Router::new()
        .route("/api/v1/payout/quote", post(quote_handler))
        .route("/api/v1/payout/rules", get(rules_handler))
        .with_state(coordinator)
}

/// Contract amount as typed into the form, or already numeric.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    fn resolve(&self) -> ContractAmount {
        match self {
            AmountInput::Number(value) => ContractAmount::from_number(*value),
            AmountInput::Text(raw) => ContractAmount::parse_lenient(raw),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub contract_type: String,
    pub client_type: String,
    pub producer_type: String,
    #[serde(default)]
    pub amount: Option<AmountInput>,
}

impl QuoteRequest {
    fn selections(&self) -> Result<Selections, AppError> {
        Ok(Selections {
            contract_type: self.contract_type.parse()?,
            client_type: self.client_type.parse()?,
            producer_type: self.producer_type.parse()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResponse {
    pub rule_key: String,
    pub amount: f64,
    pub defined: bool,
    pub payout: Option<f64>,
    pub display: String,
    pub intermediary: IntermediaryField,
    pub breakdown: Vec<AppliedStep>,
}

pub(crate) async fn quote_handler(
    State(coordinator): State<Arc<PayoutCoordinator>>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, AppError> {
    let Json(request) = payload?;
    let selections = request.selections()?;
    let amount = request
        .amount
        .as_ref()
        .map(AmountInput::resolve)
        .unwrap_or(ContractAmount::ZERO);

    let view = coordinator.compute(&selections, amount);

    Ok(Json(QuoteResponse {
        rule_key: view.key.to_string(),
        amount: view.amount.value(),
        defined: view.breakdown.is_some(),
        payout: view.display.payout(),
        display: view.display.text().to_string(),
        intermediary: view.intermediary,
        breakdown: view
            .breakdown
            .map(|breakdown| breakdown.steps)
            .unwrap_or_default(),
    }))
}

pub(crate) async fn rules_handler(
    State(coordinator): State<Arc<PayoutCoordinator>>,
) -> Json<RuleCatalog> {
    Json(coordinator.rules().catalog())
}
