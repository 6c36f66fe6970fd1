use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of parties signing the production contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "2party", alias = "two-party")]
    TwoParty,
    #[serde(rename = "3party", alias = "three-party")]
    ThreeParty,
}

impl ContractType {
    pub const ALL: [ContractType; 2] = [ContractType::TwoParty, ContractType::ThreeParty];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::TwoParty => "2party",
            ContractType::ThreeParty => "3party",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContractType::TwoParty => "two-party",
            ContractType::ThreeParty => "three-party (with intermediary)",
        }
    }

    /// Whether an intermediary sits between client and producer.
    pub fn has_intermediary(&self) -> bool {
        matches!(self, ContractType::ThreeParty)
    }
}

/// Tax category of the commissioning client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientType {
    Corporate,
    TaxExempt,
}

impl ClientType {
    pub const ALL: [ClientType; 2] = [ClientType::Corporate, ClientType::TaxExempt];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Corporate => "corporate",
            ClientType::TaxExempt => "tax-exempt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClientType::Corporate => "corporate client",
            ClientType::TaxExempt => "tax-exempt client",
        }
    }
}

/// Employment/taxation category of the producer receiving the payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProducerType {
    Corporate,
    Freelancer,
    Simplified,
}

impl ProducerType {
    pub const ALL: [ProducerType; 3] = [
        ProducerType::Corporate,
        ProducerType::Freelancer,
        ProducerType::Simplified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProducerType::Corporate => "corporate",
            ProducerType::Freelancer => "freelancer",
            ProducerType::Simplified => "simplified",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProducerType::Corporate => "corporate producer",
            ProducerType::Freelancer => "freelance producer",
            ProducerType::Simplified => "simplified-taxation producer",
        }
    }
}

/// Composite lookup key selecting a payout formula.
///
/// The canonical text form is `{contract}-{client}-{producer}`, for example
/// `3party-tax-exempt-freelancer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub contract_type: ContractType,
    pub client_type: ClientType,
    pub producer_type: ProducerType,
}

impl RuleKey {
    pub fn new(
        contract_type: ContractType,
        client_type: ClientType,
        producer_type: ProducerType,
    ) -> Self {
        Self {
            contract_type,
            client_type,
            producer_type,
        }
    }

    /// Every combination of the three selections, in declaration order.
    pub fn all() -> Vec<RuleKey> {
        let mut keys = Vec::with_capacity(
            ContractType::ALL.len() * ClientType::ALL.len() * ProducerType::ALL.len(),
        );
        for contract_type in ContractType::ALL {
            for client_type in ClientType::ALL {
                for producer_type in ProducerType::ALL {
                    keys.push(RuleKey::new(contract_type, client_type, producer_type));
                }
            }
        }
        keys
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.contract_type.as_str(),
            self.client_type.as_str(),
            self.producer_type.as_str()
        )
    }
}

/// Raised when a selection token does not name a known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown contract type '{0}' (expected 2party or 3party)")]
    UnknownContractType(String),
    #[error("unknown client type '{0}' (expected corporate or tax-exempt)")]
    UnknownClientType(String),
    #[error("unknown producer type '{0}' (expected corporate, freelancer or simplified)")]
    UnknownProducerType(String),
    #[error("malformed rule key '{0}' (expected contract-client-producer)")]
    MalformedKey(String),
}

fn normalize_token(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('_', "-")
}

impl FromStr for ContractType {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "2party" | "two-party" => Ok(ContractType::TwoParty),
            "3party" | "three-party" => Ok(ContractType::ThreeParty),
            _ => Err(SelectionError::UnknownContractType(raw.trim().to_string())),
        }
    }
}

impl FromStr for ClientType {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "corporate" => Ok(ClientType::Corporate),
            "tax-exempt" => Ok(ClientType::TaxExempt),
            _ => Err(SelectionError::UnknownClientType(raw.trim().to_string())),
        }
    }
}

impl FromStr for ProducerType {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize_token(raw).as_str() {
            "corporate" => Ok(ProducerType::Corporate),
            "freelancer" => Ok(ProducerType::Freelancer),
            "simplified" => Ok(ProducerType::Simplified),
            _ => Err(SelectionError::UnknownProducerType(raw.trim().to_string())),
        }
    }
}

impl FromStr for RuleKey {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let malformed = || SelectionError::MalformedKey(trimmed.to_string());

        // The client token may itself contain a hyphen; producer tokens never do.
        let (contract, rest) = trimmed.split_once('-').ok_or_else(malformed)?;
        let (client, producer) = rest.rsplit_once('-').ok_or_else(malformed)?;

        Ok(RuleKey::new(
            contract.parse()?,
            client.parse()?,
            producer.parse()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_key_text_round_trips_for_every_combination() {
        for key in RuleKey::all() {
            let text = key.to_string();
            let parsed: RuleKey = text.parse().expect("canonical key parses");
            assert_eq!(parsed, key, "round trip failed for {text}");
        }
    }

    #[test]
    fn all_covers_the_full_product() {
        let keys = RuleKey::all();
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[0].to_string(), "2party-corporate-corporate");
        assert_eq!(keys[11].to_string(), "3party-tax-exempt-simplified");
    }

    #[test]
    fn tokens_parse_case_insensitively_with_aliases() {
        assert_eq!(" Three-Party ".parse::<ContractType>(), Ok(ContractType::ThreeParty));
        assert_eq!("TAX_EXEMPT".parse::<ClientType>(), Ok(ClientType::TaxExempt));
        assert_eq!("Freelancer".parse::<ProducerType>(), Ok(ProducerType::Freelancer));
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert_eq!(
            "2party".parse::<RuleKey>(),
            Err(SelectionError::MalformedKey("2party".to_string()))
        );
        assert_eq!(
            "4party-corporate-corporate".parse::<RuleKey>(),
            Err(SelectionError::UnknownContractType("4party".to_string()))
        );
        assert_eq!(
            "2party-exempt-corporate".parse::<RuleKey>(),
            Err(SelectionError::UnknownClientType("exempt".to_string()))
        );
    }

    #[test]
    fn serde_uses_canonical_tokens() {
        let key = RuleKey::new(
            ContractType::ThreeParty,
            ClientType::TaxExempt,
            ProducerType::Simplified,
        );
        let value = serde_json::to_value(key).expect("serialize key");
        assert_eq!(
            value,
            serde_json::json!({
                "contract_type": "3party",
                "client_type": "tax-exempt",
                "producer_type": "simplified",
            })
        );
    }
}
