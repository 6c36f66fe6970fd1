use crate::infra::build_coordinator;
use clap::Args;
use contract_payout::config::AppConfig;
use contract_payout::error::AppError;
use contract_payout::payout::{
    BatchQuote, BatchQuoter, ClientType, ContractType, DeductionOp, PayoutView, ProducerType,
    RuleCatalog, Selections,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Contract type: 2party or 3party
    #[arg(long, default_value = "2party")]
    pub(crate) contract_type: ContractType,
    /// Client type: corporate or tax-exempt
    #[arg(long, default_value = "corporate")]
    pub(crate) client_type: ClientType,
    /// Producer type: corporate, freelancer or simplified
    #[arg(long, default_value = "corporate")]
    pub(crate) producer_type: ProducerType,
    /// Contract amount as typed; unparseable input counts as 0
    #[arg(long, default_value = "")]
    pub(crate) amount: String,
    /// Show each deduction step
    #[arg(long)]
    pub(crate) explain: bool,
    /// Print the quote as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RulesArgs {
    /// Print the rule catalog as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV with contract_type,client_type,producer_type,amount columns
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the quotes as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_quote(config: &AppConfig, args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        contract_type,
        client_type,
        producer_type,
        amount,
        explain,
        json,
    } = args;

    let coordinator = build_coordinator(&config.display);
    let selections = Selections {
        contract_type,
        client_type,
        producer_type,
    };
    let view = coordinator.compute_from_text(&selections, &amount);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_quote(&view, explain));
    }

    Ok(())
}

pub(crate) fn run_rules(config: &AppConfig, args: RulesArgs) -> Result<(), AppError> {
    let coordinator = build_coordinator(&config.display);
    let catalog = coordinator.rules().catalog();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print!("{}", render_catalog(&catalog));
    }

    Ok(())
}

pub(crate) fn run_batch(config: &AppConfig, args: BatchArgs) -> Result<(), AppError> {
    let coordinator = build_coordinator(&config.display);
    let quotes = BatchQuoter::new(&coordinator).quote_path(&args.input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
    } else {
        print!("{}", render_batch(&quotes));
    }

    Ok(())
}

fn describe_op(op: &DeductionOp) -> String {
    match op {
        DeductionOp::Multiply { factor } => format!("x {factor}"),
        DeductionOp::Divide { divisor } => format!("/ {divisor}"),
    }
}

fn render_quote(view: &PayoutView, explain: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("Rule: {}\n", view.key));
    out.push_str(&format!(
        "Selections: {}, {}, {}\n",
        view.key.contract_type.label(),
        view.key.client_type.label(),
        view.key.producer_type.label()
    ));
    out.push_str(&format!("Contract amount: {}\n", view.amount.value()));

    let state = if view.intermediary.enabled {
        "enabled"
    } else {
        "disabled"
    };
    out.push_str(&format!(
        "Intermediary: {} ({state})\n",
        view.intermediary.label
    ));
    out.push_str(&format!("Final amount: {}\n", view.display.text()));

    if explain {
        match &view.breakdown {
            Some(breakdown) => {
                out.push_str("\nDeductions\n");
                for applied in &breakdown.steps {
                    out.push_str(&format!(
                        "- {} ({}): {:.2}\n",
                        applied.step.label,
                        describe_op(&applied.step.op),
                        applied.value_after
                    ));
                }
            }
            None => out.push_str("\nDeductions: no rule defined for this combination yet\n"),
        }
    }

    out
}

fn render_catalog(catalog: &RuleCatalog) -> String {
    let mut out = String::from("Payout rules\n");
    for entry in &catalog.rules {
        let chain = entry
            .steps
            .iter()
            .map(|step| format!("{} ({})", step.label, describe_op(&step.op)))
            .collect::<Vec<_>>()
            .join(" -> ");
        out.push_str(&format!("- {}: {}\n", entry.rule_key, chain));
    }

    if catalog.pending.is_empty() {
        out.push_str("\nPending combinations: none\n");
    } else {
        out.push_str("\nPending combinations\n");
        for key in &catalog.pending {
            out.push_str(&format!("- {key}\n"));
        }
    }

    out
}

fn render_batch(quotes: &[BatchQuote]) -> String {
    quotes
        .iter()
        .map(|quote| {
            format!(
                "#{} {} | amount {} | intermediary {} | {}\n",
                quote.row,
                quote.view.key,
                quote.view.amount.value(),
                quote.view.intermediary.label,
                quote.view.display.text()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_payout::payout::PayoutCoordinator;

    fn quote(contract: ContractType, client: ClientType, producer: ProducerType) -> PayoutView {
        let selections = Selections {
            contract_type: contract,
            client_type: client,
            producer_type: producer,
        };
        PayoutCoordinator::default().compute_from_text(&selections, "1000000")
    }

    #[test]
    fn quote_rendering_lists_each_deduction() {
        let view = quote(
            ContractType::ThreeParty,
            ClientType::Corporate,
            ProducerType::Freelancer,
        );

        let rendered = render_quote(&view, true);

        assert!(rendered.contains("Rule: 3party-corporate-freelancer"));
        assert!(rendered.contains(
            "Selections: three-party (with intermediary), corporate client, freelance producer"
        ));
        assert!(rendered.contains("Intermediary: 드롭샷매치 (enabled)"));
        assert!(rendered.contains("- exclude VAT 10% (/ 1.1): 909090.91"));
        assert!(rendered.contains("- withholding tax 3.3% (x 0.967)"));
    }

    #[test]
    fn pending_quote_explains_missing_rule() {
        let view = quote(
            ContractType::TwoParty,
            ClientType::TaxExempt,
            ProducerType::Corporate,
        );

        let rendered = render_quote(&view, true);

        assert!(rendered.contains("Final amount: 추가 예정"));
        assert!(rendered.contains("Intermediary: 해당 없음 (disabled)"));
        assert!(rendered.contains("no rule defined"));
    }

    #[test]
    fn catalog_rendering_lists_pending_combinations() {
        let catalog = PayoutCoordinator::default().rules().catalog();
        let rendered = render_catalog(&catalog);

        assert!(rendered.contains("- 2party-corporate-corporate: platform fee 10% (x 0.9)"));
        assert!(rendered.contains(
            "- 3party-tax-exempt-freelancer: platform fee 11% (x 0.89) -> withholding tax 3.3% (x 0.967)"
        ));
        assert!(rendered.contains("- 2party-tax-exempt-simplified"));
    }
}
