use std::str::FromStr;

use super::coordinator::{
    AmountDisplay, IntermediaryField, PayoutCoordinator, PayoutView, Selections,
};
use super::domain::{ClientType, ContractType, ProducerType, SelectionError};

/// Output regions the form writes to after every recomputation.
pub trait PayoutSurface {
    fn render_amount(&mut self, display: &AmountDisplay);
    fn render_intermediary(&mut self, field: &IntermediaryField);
}

/// Input change raised by one of the form controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ContractTypeChanged(ContractType),
    ClientTypeChanged(ClientType),
    ProducerTypeChanged(ProducerType),
    /// Raw text of the amount field; parsed leniently on every recomputation.
    AmountInput(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormEventError {
    #[error("empty event")]
    Empty,
    #[error("unknown field '{0}' (expected contract, client, producer or amount)")]
    UnknownField(String),
    #[error("missing value for '{0}'")]
    MissingValue(String),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl FromStr for FormEvent {
    type Err = FormEventError;

    /// Parses `<field> <value>` lines such as `contract 3party` or `amount 1,000,000`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FormEventError::Empty);
        }

        let (field, value) = match trimmed.split_once(char::is_whitespace) {
            Some((field, value)) => (field, value.trim()),
            None => (trimmed, ""),
        };
        let field = field.to_ascii_lowercase();

        match field.as_str() {
            // An empty amount is a valid input state (cleared field).
            "amount" => Ok(FormEvent::AmountInput(value.to_string())),
            "contract" | "client" | "producer" if value.is_empty() => {
                Err(FormEventError::MissingValue(field.clone()))
            }
            "contract" => Ok(FormEvent::ContractTypeChanged(value.parse()?)),
            "client" => Ok(FormEvent::ClientTypeChanged(value.parse()?)),
            "producer" => Ok(FormEvent::ProducerTypeChanged(value.parse()?)),
            _ => Err(FormEventError::UnknownField(field.clone())),
        }
    }
}

/// Event adapter holding the current control values.
///
/// Every event re-runs the full pipeline from the current values, so the last event
/// always wins and no intermediate state is carried between recomputations.
pub struct PayoutForm<'a, S> {
    coordinator: &'a PayoutCoordinator,
    surface: S,
    selections: Selections,
    amount_text: String,
}

impl<'a, S: PayoutSurface> PayoutForm<'a, S> {
    /// Builds the form with default selections and renders the initial result.
    pub fn new(coordinator: &'a PayoutCoordinator, surface: S) -> Self {
        Self::with_state(coordinator, surface, Selections::default(), String::new())
    }

    pub fn with_state(
        coordinator: &'a PayoutCoordinator,
        surface: S,
        selections: Selections,
        amount_text: String,
    ) -> Self {
        let mut form = Self {
            coordinator,
            surface,
            selections,
            amount_text,
        };
        form.recalculate();
        form
    }

    pub fn handle(&mut self, event: FormEvent) -> PayoutView {
        match event {
            FormEvent::ContractTypeChanged(contract_type) => {
                self.selections.contract_type = contract_type
            }
            FormEvent::ClientTypeChanged(client_type) => self.selections.client_type = client_type,
            FormEvent::ProducerTypeChanged(producer_type) => {
                self.selections.producer_type = producer_type
            }
            FormEvent::AmountInput(text) => self.amount_text = text,
        }

        self.recalculate()
    }

    pub fn recalculate(&mut self) -> PayoutView {
        let view = self
            .coordinator
            .compute_from_text(&self.selections, &self.amount_text);
        self.surface.render_intermediary(&view.intermediary);
        self.surface.render_amount(&view.display);
        view
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
