use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::coordinator::{PayoutCoordinator, PayoutView, Selections};
use super::domain::SelectionError;

#[derive(Debug, thiserror::Error)]
pub enum BatchImportError {
    #[error("failed to read contract list: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid contract CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Selection {
        row: usize,
        #[source]
        source: SelectionError,
    },
}

#[derive(Debug, Deserialize)]
struct ContractRow {
    contract_type: String,
    client_type: String,
    producer_type: String,
    #[serde(default)]
    amount: String,
}

impl ContractRow {
    fn selections(&self) -> Result<Selections, SelectionError> {
        Ok(Selections {
            contract_type: self.contract_type.parse()?,
            client_type: self.client_type.parse()?,
            producer_type: self.producer_type.parse()?,
        })
    }
}

/// Quote for one data row; `row` is 1-based and excludes the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchQuote {
    pub row: usize,
    #[serde(flatten)]
    pub view: PayoutView,
}

/// Quotes every row of a `contract_type,client_type,producer_type,amount` CSV.
pub struct BatchQuoter<'a> {
    coordinator: &'a PayoutCoordinator,
}

impl<'a> BatchQuoter<'a> {
    pub fn new(coordinator: &'a PayoutCoordinator) -> Self {
        Self { coordinator }
    }

    pub fn quote_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<BatchQuote>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        self.quote_reader(file)
    }

    pub fn quote_reader<R: Read>(&self, reader: R) -> Result<Vec<BatchQuote>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut quotes = Vec::new();

        for (index, record) in csv_reader.deserialize::<ContractRow>().enumerate() {
            let row = index + 1;
            let contract = record?;
            let selections = contract
                .selections()
                .map_err(|source| BatchImportError::Selection { row, source })?;
            let view = self
                .coordinator
                .compute_from_text(&selections, &contract.amount);

            quotes.push(BatchQuote { row, view });
        }

        let pending = quotes
            .iter()
            .filter(|quote| quote.view.display.payout().is_none())
            .count();
        tracing::info!(rows = quotes.len(), pending, "batch quotes computed");

        Ok(quotes)
    }
}
