//! Rule evaluation, display formatting, and the input surfaces built on them.

pub mod amount;
pub mod batch;
pub mod coordinator;
pub mod domain;
pub mod form;
pub mod format;
pub mod router;
pub mod rules;

pub use amount::ContractAmount;
pub use batch::{BatchImportError, BatchQuote, BatchQuoter};
pub use coordinator::{
    AmountDisplay, IntermediaryField, PayoutCoordinator, PayoutView, Selections,
};
pub use domain::{ClientType, ContractType, ProducerType, RuleKey, SelectionError};
pub use form::{FormEvent, FormEventError, PayoutForm, PayoutSurface};
pub use format::format_payout;
pub use router::payout_router;
pub use rules::{
    AppliedStep, DeductionOp, DeductionStep, PayoutBreakdown, PayoutFormula, RuleCatalog,
    RuleEntry, RuleTable,
};
