use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;

use super::amount::ContractAmount;
use super::domain::{ClientType, ContractType, ProducerType, RuleKey};
use super::format::{floor_payout, format_payout};
use super::rules::{PayoutBreakdown, RuleTable};

/// Current value of the three selection controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    pub contract_type: ContractType,
    pub client_type: ClientType,
    pub producer_type: ProducerType,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            contract_type: ContractType::TwoParty,
            client_type: ClientType::Corporate,
            producer_type: ProducerType::Corporate,
        }
    }
}

impl Selections {
    pub fn rule_key(&self) -> RuleKey {
        RuleKey::new(self.contract_type, self.client_type, self.producer_type)
    }
}

/// Display state of the intermediary field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntermediaryField {
    pub enabled: bool,
    pub label: String,
}

/// What the amount output shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AmountDisplay {
    Computed { payout: f64, text: String },
    Pending { text: String },
}

impl AmountDisplay {
    pub fn text(&self) -> &str {
        match self {
            AmountDisplay::Computed { text, .. } | AmountDisplay::Pending { text } => text,
        }
    }

    pub fn payout(&self) -> Option<f64> {
        match self {
            AmountDisplay::Computed { payout, .. } => Some(*payout),
            AmountDisplay::Pending { .. } => None,
        }
    }
}

/// Everything the form renders after one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoutView {
    pub key: RuleKey,
    pub amount: ContractAmount,
    pub display: AmountDisplay,
    pub intermediary: IntermediaryField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PayoutBreakdown>,
}

/// Pure pipeline from selections and amount to the rendered view.
#[derive(Debug, Clone)]
pub struct PayoutCoordinator {
    rules: RuleTable,
    display: DisplayConfig,
}

impl Default for PayoutCoordinator {
    fn default() -> Self {
        Self::new(RuleTable::standard(), DisplayConfig::default())
    }
}

impl PayoutCoordinator {
    pub fn new(rules: RuleTable, display: DisplayConfig) -> Self {
        Self { rules, display }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn intermediary_field(&self, contract_type: ContractType) -> IntermediaryField {
        if contract_type.has_intermediary() {
            IntermediaryField {
                enabled: true,
                label: self.display.intermediary_name.clone(),
            }
        } else {
            IntermediaryField {
                enabled: false,
                label: self.display.not_applicable_label.clone(),
            }
        }
    }

    pub fn compute(&self, selections: &Selections, amount: ContractAmount) -> PayoutView {
        let key = selections.rule_key();
        let intermediary = self.intermediary_field(selections.contract_type);
        let breakdown = self.rules.breakdown(&key, amount);

        let display = match &breakdown {
            Some(breakdown) => {
                tracing::debug!(rule_key = %key, payout = breakdown.payout, "payout computed");
                AmountDisplay::Computed {
                    payout: floor_payout(breakdown.payout),
                    text: format_payout(breakdown.payout, &self.display.currency_suffix),
                }
            }
            None => {
                tracing::debug!(rule_key = %key, "no payout rule defined yet");
                AmountDisplay::Pending {
                    text: self.display.placeholder.clone(),
                }
            }
        };

        PayoutView {
            key,
            amount,
            display,
            intermediary,
            breakdown,
        }
    }

    /// Same as [`compute`](Self::compute) with the amount taken from raw field text.
    pub fn compute_from_text(&self, selections: &Selections, amount_text: &str) -> PayoutView {
        self.compute(selections, ContractAmount::parse_lenient(amount_text))
    }
}
