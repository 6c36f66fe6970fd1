//! Behavioral checks for the rule table and the form pipeline through the public API.

use contract_payout::payout::{
    format_payout, AmountDisplay, ClientType, ContractAmount, ContractType, FormEvent,
    IntermediaryField, PayoutCoordinator, PayoutForm, PayoutSurface, ProducerType, RuleKey,
    RuleTable, Selections,
};

fn key(raw: &str) -> RuleKey {
    raw.parse().expect("valid rule key")
}

fn selections_for(key: RuleKey) -> Selections {
    Selections {
        contract_type: key.contract_type,
        client_type: key.client_type,
        producer_type: key.producer_type,
    }
}

#[test]
fn every_defined_rule_maps_zero_to_zero() {
    let table = RuleTable::standard();
    for (key, _) in table.rules() {
        assert_eq!(
            table.evaluate(key, ContractAmount::ZERO),
            Some(0.0),
            "rule {key} should map zero to zero"
        );
    }
}

#[test]
fn two_party_corporate_pays_ninety_percent() {
    let coordinator = PayoutCoordinator::default();
    let view = coordinator.compute(
        &selections_for(key("2party-corporate-corporate")),
        ContractAmount::from_number(1_000_000.0),
    );

    assert_eq!(view.display.text(), "900,000 원");
    assert_eq!(view.display.payout(), Some(900_000.0));
}

#[test]
fn three_party_tax_exempt_freelancer_applies_fee_then_withholding() {
    let table = RuleTable::standard();
    let amount = 1_000_000.0;
    let payout = table
        .evaluate(
            &key("3party-tax-exempt-freelancer"),
            ContractAmount::from_number(amount),
        )
        .expect("rule defined");

    assert_eq!(payout, (amount * 0.89) * 0.967);

    let view = PayoutCoordinator::default().compute(
        &selections_for(key("3party-tax-exempt-freelancer")),
        ContractAmount::from_number(amount),
    );
    assert_eq!(view.display.text(), format_payout(payout, "원"));
}

#[test]
fn unknown_combination_shows_placeholder() {
    let coordinator = PayoutCoordinator::default();
    let view = coordinator.compute_from_text(
        &selections_for(key("2party-tax-exempt-corporate")),
        "1000000",
    );

    assert_eq!(
        view.display,
        AmountDisplay::Pending {
            text: "추가 예정".to_string()
        }
    );
}

#[test]
fn simplified_producers_are_all_pending() {
    let table = RuleTable::standard();
    for key in RuleKey::all()
        .into_iter()
        .filter(|key| key.producer_type == ProducerType::Simplified)
    {
        assert!(!table.is_defined(&key), "{key} should be pending");
    }
}

#[test]
fn intermediary_state_follows_contract_type_only() {
    let coordinator = PayoutCoordinator::default();
    for key in RuleKey::all() {
        let view = coordinator.compute(&selections_for(key), ContractAmount::ZERO);
        match key.contract_type {
            ContractType::TwoParty => assert_eq!(
                view.intermediary,
                IntermediaryField {
                    enabled: false,
                    label: "해당 없음".to_string()
                }
            ),
            ContractType::ThreeParty => assert_eq!(
                view.intermediary,
                IntermediaryField {
                    enabled: true,
                    label: "드롭샷매치".to_string()
                }
            ),
        }
    }
}

#[test]
fn non_numeric_amount_counts_as_zero_for_defined_rules() {
    let coordinator = PayoutCoordinator::default();
    for (key, _) in coordinator.rules().rules() {
        let view = coordinator.compute_from_text(&selections_for(*key), "not a number");
        assert_eq!(view.display.text(), "0 원", "rule {key}");
    }
}

#[derive(Default)]
struct LastRender {
    amount: Option<String>,
    intermediary: Option<IntermediaryField>,
    renders: usize,
}

impl PayoutSurface for LastRender {
    fn render_amount(&mut self, display: &AmountDisplay) {
        self.amount = Some(display.text().to_string());
        self.renders += 1;
    }

    fn render_intermediary(&mut self, field: &IntermediaryField) {
        self.intermediary = Some(field.clone());
    }
}

#[test]
fn form_recomputes_on_every_event() {
    let coordinator = PayoutCoordinator::default();
    let mut form = PayoutForm::new(&coordinator, LastRender::default());

    let events = [
        FormEvent::ContractTypeChanged(ContractType::ThreeParty),
        FormEvent::ClientTypeChanged(ClientType::TaxExempt),
        FormEvent::ProducerTypeChanged(ProducerType::Freelancer),
        FormEvent::AmountInput("1,000,000".to_string()),
    ];
    for event in events {
        form.handle(event);
    }

    let expected = format_payout((1_000_000.0 * 0.89) * 0.967, "원");
    let surface = form.into_surface();
    assert_eq!(surface.renders, 5);
    assert_eq!(surface.amount, Some(expected));
    assert_eq!(
        surface.intermediary.map(|field| field.enabled),
        Some(true)
    );
}

#[test]
fn form_reaches_placeholder_and_back() {
    let coordinator = PayoutCoordinator::default();
    let mut form = PayoutForm::with_state(
        &coordinator,
        LastRender::default(),
        Selections::default(),
        "2000".to_string(),
    );
    assert_eq!(form.surface().amount.as_deref(), Some("1,800 원"));

    form.handle(FormEvent::ClientTypeChanged(ClientType::TaxExempt));
    assert_eq!(form.surface().amount.as_deref(), Some("추가 예정"));

    form.handle(FormEvent::ClientTypeChanged(ClientType::Corporate));
    assert_eq!(form.surface().amount.as_deref(), Some("1,800 원"));
}
