use std::collections::BTreeMap;

use serde::Serialize;

use super::amount::ContractAmount;
use super::domain::RuleKey;

/// Single arithmetic operation in a deduction chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DeductionOp {
    Multiply { factor: f64 },
    Divide { divisor: f64 },
}

impl DeductionOp {
    fn apply(&self, value: f64) -> f64 {
        match self {
            DeductionOp::Multiply { factor } => value * factor,
            DeductionOp::Divide { divisor } => value / divisor,
        }
    }
}

/// Labelled fee or tax deduction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeductionStep {
    pub label: &'static str,
    #[serde(flatten)]
    pub op: DeductionOp,
}

impl DeductionStep {
    pub const fn multiply(label: &'static str, factor: f64) -> Self {
        Self {
            label,
            op: DeductionOp::Multiply { factor },
        }
    }

    pub const fn divide(label: &'static str, divisor: f64) -> Self {
        Self {
            label,
            op: DeductionOp::Divide { divisor },
        }
    }
}

pub const PLATFORM_FEE: DeductionStep = DeductionStep::multiply("platform fee 10%", 0.9);
pub const TAX_EXEMPT_PLATFORM_FEE: DeductionStep =
    DeductionStep::multiply("platform fee 11%", 0.89);
pub const VAT_EXCLUSION: DeductionStep = DeductionStep::divide("exclude VAT 10%", 1.1);
pub const FREELANCER_WITHHOLDING: DeductionStep =
    DeductionStep::multiply("withholding tax 3.3%", 0.967);

/// Ordered deduction chain applied left to right to the contract amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoutFormula {
    steps: Vec<DeductionStep>,
}

impl PayoutFormula {
    pub fn new(steps: Vec<DeductionStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[DeductionStep] {
        &self.steps
    }

    pub fn apply(&self, amount: f64) -> f64 {
        self.steps
            .iter()
            .fold(amount, |value, step| step.op.apply(value))
    }

    fn trail(&self, amount: f64) -> Vec<AppliedStep> {
        let mut value = amount;
        self.steps
            .iter()
            .map(|step| {
                value = step.op.apply(value);
                AppliedStep {
                    step: *step,
                    value_after: value,
                }
            })
            .collect()
    }
}

/// Deduction step together with the running value it produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppliedStep {
    #[serde(flatten)]
    pub step: DeductionStep,
    pub value_after: f64,
}

/// Evaluation trail for audits and the explain output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayoutBreakdown {
    pub key: RuleKey,
    pub amount: f64,
    pub steps: Vec<AppliedStep>,
    pub payout: f64,
}

/// Immutable lookup table from rule key to payout formula.
///
/// Keys missing from the table are combinations whose formula has not been agreed yet;
/// lookups for them return `None` rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: BTreeMap<RuleKey, PayoutFormula>,
}

impl RuleTable {
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (RuleKey, PayoutFormula)>,
    {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn standard() -> Self {
        use crate::payout::domain::ClientType::{Corporate as CorporateClient, TaxExempt};
        use crate::payout::domain::ContractType::{ThreeParty, TwoParty};
        use crate::payout::domain::ProducerType::{Corporate as CorporateProducer, Freelancer};

        Self::new([
            (
                RuleKey::new(TwoParty, CorporateClient, CorporateProducer),
                PayoutFormula::new(vec![PLATFORM_FEE]),
            ),
            (
                RuleKey::new(TwoParty, CorporateClient, Freelancer),
                PayoutFormula::new(vec![PLATFORM_FEE]),
            ),
            (
                RuleKey::new(ThreeParty, CorporateClient, CorporateProducer),
                PayoutFormula::new(vec![PLATFORM_FEE]),
            ),
            (
                RuleKey::new(ThreeParty, CorporateClient, Freelancer),
                PayoutFormula::new(vec![VAT_EXCLUSION, PLATFORM_FEE, FREELANCER_WITHHOLDING]),
            ),
            (
                RuleKey::new(ThreeParty, TaxExempt, CorporateProducer),
                PayoutFormula::new(vec![TAX_EXEMPT_PLATFORM_FEE]),
            ),
            (
                RuleKey::new(ThreeParty, TaxExempt, Freelancer),
                PayoutFormula::new(vec![TAX_EXEMPT_PLATFORM_FEE, FREELANCER_WITHHOLDING]),
            ),
        ])
    }

    pub fn get(&self, key: &RuleKey) -> Option<&PayoutFormula> {
        self.rules.get(key)
    }

    pub fn is_defined(&self, key: &RuleKey) -> bool {
        self.rules.contains_key(key)
    }

    pub fn evaluate(&self, key: &RuleKey, amount: ContractAmount) -> Option<f64> {
        self.get(key).map(|formula| formula.apply(amount.value()))
    }

    pub fn breakdown(&self, key: &RuleKey, amount: ContractAmount) -> Option<PayoutBreakdown> {
        let formula = self.get(key)?;
        let steps = formula.trail(amount.value());
        let payout = steps
            .last()
            .map(|applied| applied.value_after)
            .unwrap_or(amount.value());

        Some(PayoutBreakdown {
            key: *key,
            amount: amount.value(),
            steps,
            payout,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = (&RuleKey, &PayoutFormula)> {
        self.rules.iter()
    }

    /// Combinations with no formula yet, in key order.
    pub fn pending(&self) -> Vec<RuleKey> {
        RuleKey::all()
            .into_iter()
            .filter(|key| !self.is_defined(key))
            .collect()
    }

    pub fn catalog(&self) -> RuleCatalog {
        RuleCatalog {
            rules: self
                .rules()
                .map(|(key, formula)| RuleEntry {
                    rule_key: key.to_string(),
                    steps: formula.steps().to_vec(),
                })
                .collect(),
            pending: self.pending().iter().map(RuleKey::to_string).collect(),
        }
    }
}

/// Serializable listing of the defined and pending rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleCatalog {
    pub rules: Vec<RuleEntry>,
    pub pending: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleEntry {
    pub rule_key: String,
    pub steps: Vec<DeductionStep>,
}
