use crate::infra::build_coordinator;
use contract_payout::config::AppConfig;
use contract_payout::error::AppError;
use contract_payout::payout::{
    AmountDisplay, FormEvent, IntermediaryField, PayoutCoordinator, PayoutForm, PayoutSurface,
};
use std::io::{self, BufRead, Write};

const USAGE: &str = "events: contract <2party|3party>, client <corporate|tax-exempt>, \
producer <corporate|freelancer|simplified>, amount <value>, quit";

/// Collects rendered lines until the session loop flushes them.
#[derive(Debug, Default)]
pub(crate) struct TerminalSurface {
    lines: Vec<String>,
}

impl TerminalSurface {
    fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl PayoutSurface for TerminalSurface {
    fn render_amount(&mut self, display: &AmountDisplay) {
        self.lines.push(format!("final amount: {}", display.text()));
    }

    fn render_intermediary(&mut self, field: &IntermediaryField) {
        let marker = if field.enabled { "" } else { " [disabled]" };
        self.lines
            .push(format!("intermediary: {}{marker}", field.label));
    }
}

pub(crate) fn run_form(config: &AppConfig) -> Result<(), AppError> {
    let coordinator = build_coordinator(&config.display);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(&coordinator, stdin.lock(), &mut stdout)?;
    Ok(())
}

fn run_session<R: BufRead, W: Write>(
    coordinator: &PayoutCoordinator,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "{USAGE}")?;
    let mut form = PayoutForm::new(coordinator, TerminalSurface::default());
    flush_surface(&mut form, output)?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if matches!(trimmed, "quit" | "exit") {
            break;
        }

        match trimmed.parse::<FormEvent>() {
            Ok(event) => {
                form.handle(event);
                flush_surface(&mut form, output)?;
            }
            Err(err) => {
                tracing::warn!(input = trimmed, error = %err, "ignoring form event");
                writeln!(output, "error: {err}")?;
            }
        }
    }

    output.flush()
}

fn flush_surface<W: Write>(
    form: &mut PayoutForm<'_, TerminalSurface>,
    output: &mut W,
) -> io::Result<()> {
    for line in form.surface_mut().drain() {
        writeln!(output, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(input: &str) -> Vec<String> {
        let coordinator = PayoutCoordinator::default();
        let mut output = Vec::new();
        run_session(&coordinator, Cursor::new(input), &mut output).expect("session runs");
        String::from_utf8(output)
            .expect("utf8 output")
            .lines()
            .skip(1)
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn renders_initial_state_and_each_event() {
        let lines = session("amount 1000000\ncontract 3party\nquit\namount 5\n");

        assert_eq!(
            lines,
            vec![
                "intermediary: 해당 없음 [disabled]",
                "final amount: 0 원",
                "intermediary: 해당 없음 [disabled]",
                "final amount: 900,000 원",
                "intermediary: 드롭샷매치",
                "final amount: 900,000 원",
            ]
        );
    }

    #[test]
    fn invalid_events_are_reported_and_skipped() {
        let lines = session("producer employee\namount abc\n");

        assert!(lines[2].starts_with("error: unknown producer type 'employee'"));
        assert_eq!(lines[4], "final amount: 0 원");
        assert_eq!(lines.len(), 5);
    }
}
