//! CBC (Belgium) account-history CSV parser
//!
//! CBC exports are `;`-delimited with a French header row and 18 fixed
//! columns. Every row in one file belongs to a single account and a single
//! currency. Card payments (Bancontact/Maestro) leave both counterparty
//! columns blank, so the payee falls back to the merchant text embedded in
//! the description between the "... HEURES" timestamp and "AVEC CARTE".

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use csv::StringRecord;
use regex::Regex;

use crate::errors::ParseError;
use crate::types::{Statement, StatementLine, TransactionKind};

/// First cell of the header row that CBC repeats through the export.
const HEADER_START: &str = "Numéro de compte";

/// Every data row carries exactly this many fields.
const FIELD_COUNT: usize = 18;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Column offsets of the fixed CBC export schema. Order is load-bearing:
/// `[compte, rubrique, nom, devise, extrait, date, description, valeur,
/// montant, solde, crédit, débit, compte contrepartie, BIC contrepartie,
/// nom contrepartie, adresse contrepartie, comm. structurée, comm. libre]`
mod field {
    pub const ACCOUNT: usize = 0;
    pub const CURRENCY: usize = 3;
    pub const STATEMENT_NO: usize = 4;
    pub const DATE: usize = 5;
    pub const DESCRIPTION: usize = 6;
    pub const AMOUNT: usize = 8;
    pub const COUNTERPARTY_ACCOUNT: usize = 12;
    pub const COUNTERPARTY_NAME: usize = 14;
}

/// First word character after the "... A 12:00 HEURES" timestamp phrase.
static MERCHANT_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HEURES\s+(\w)").expect("literal regex"));

/// Streaming row normalizer for one CBC export file.
///
/// The first data row locks the account id and currency; every later data
/// row must agree with them. Create a fresh parser per file.
#[derive(Debug, Default)]
pub struct CbcParser {
    line_nr: usize,
    account_id: Option<String>,
    currency: Option<String>,
}

impl CbcParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account id locked by the first data row, if one was seen yet.
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Currency locked by the first data row, if one was seen yet.
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Normalize one tokenized row.
    ///
    /// Returns `Ok(None)` for header rows, `Ok(Some(..))` for data rows.
    /// Line numbers in errors are 1-based and count every physical row,
    /// headers included.
    pub fn parse_record(
        &mut self,
        record: &StringRecord,
    ) -> Result<Option<StatementLine>, ParseError> {
        self.line_nr += 1;

        if record.get(field::ACCOUNT) == Some(HEADER_START) {
            return Ok(None);
        }
        if record.len() != FIELD_COUNT {
            return Err(ParseError::FieldCountMismatch {
                line: self.line_nr,
                found: record.len(),
                expected: FIELD_COUNT,
            });
        }

        let account = &record[field::ACCOUNT];
        match self.account_id.as_deref() {
            Some(locked) if locked != account => {
                return Err(ParseError::AccountMismatch {
                    line: self.line_nr,
                    found: account.to_string(),
                    expected: locked.to_string(),
                });
            }
            Some(_) => {}
            None => self.account_id = Some(account.to_string()),
        }

        let currency = &record[field::CURRENCY];
        match self.currency.as_deref() {
            Some(locked) if locked != currency => {
                return Err(ParseError::CurrencyMismatch {
                    line: self.line_nr,
                    found: currency.to_string(),
                    expected: locked.to_string(),
                });
            }
            Some(_) => {}
            None => self.currency = Some(currency.to_string()),
        }

        let date_raw = &record[field::DATE];
        let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT).map_err(|_| {
            ParseError::InvalidDate {
                line: self.line_nr,
                value: date_raw.to_string(),
            }
        })?;

        let amount_raw = &record[field::AMOUNT];
        let amount = parse_decimal(amount_raw).ok_or_else(|| ParseError::InvalidAmount {
            line: self.line_nr,
            value: amount_raw.to_string(),
        })?;

        let kind = if amount < 0.0 {
            TransactionKind::Debit
        } else {
            TransactionKind::Credit
        };

        let statement_no = record[field::STATEMENT_NO].trim().to_string();
        let payee = resolve_payee(
            &record[field::COUNTERPARTY_ACCOUNT],
            &record[field::COUNTERPARTY_NAME],
            &record[field::DESCRIPTION],
        );

        Ok(Some(StatementLine {
            date,
            amount,
            memo: record[field::DESCRIPTION].to_string(),
            payee,
            id: statement_no.clone(),
            check_no: statement_no.clone(),
            refnum: statement_no,
            kind,
        }))
    }
}

/// Parse a decimal that uses ',' as the decimal mark (e.g. "-12,50").
///
/// Plain substitution only: a thousands-separated value like "1.234,56"
/// ends up with two dots and is rejected.
fn parse_decimal(value: &str) -> Option<f64> {
    value.replace(',', ".").parse().ok()
}

/// Pick a display name for the counterparty.
///
/// Precedence: "<name> - <account>", then the name alone, then the bare
/// account number. When both columns are blank (card payments), extract
/// the merchant text from the description instead.
fn resolve_payee(counter_account: &str, counter_name: &str, description: &str) -> String {
    let account = counter_account.trim();
    let name = collapse_whitespace(counter_name.trim());

    let payee = if name.is_empty() {
        account.to_string()
    } else if account.is_empty() {
        name
    } else {
        format!("{name} - {account}")
    };

    if payee.is_empty() {
        merchant_from_description(description)
    } else {
        payee
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Merchant text of a card payment.
///
/// Bancontact/Maestro descriptions look like
/// "PAIEMENT ... LE 01/01 A 12:00 HEURES CHEZ MERCHANT AVEC CARTE 6703 ...".
/// The merchant sits between the timestamp and the card marker. Without a
/// "HEURES" anchor the description is returned untouched; without a
/// trailing "AVEC CARTE" the text runs to the end of the description.
fn merchant_from_description(description: &str) -> String {
    let Some(anchor) = MERCHANT_ANCHOR
        .captures(description)
        .and_then(|caps| caps.get(1))
    else {
        return description.to_string();
    };

    let tail = &description[anchor.start()..];
    let end = tail.find("AVEC CARTE").unwrap_or(tail.len());
    tail[..end].trim().to_string()
}

/// Parse a whole CBC export from a reader.
///
/// Stops at the first invalid row. Fails with [`ParseError::EmptyStatement`]
/// when the input holds no data rows at all, since a statement needs a
/// resolved account and currency.
pub fn parse_statement<R: Read>(reader: R) -> Result<Statement, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        // short/long rows must reach the field-count check, not die here
        .flexible(true)
        .from_reader(reader);

    let mut parser = CbcParser::new();
    let mut lines = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        if let Some(line) = parser.parse_record(&record)? {
            lines.push(line);
        }
    }

    match (parser.account_id, parser.currency) {
        (Some(account_id), Some(currency)) => Ok(Statement {
            account_id,
            currency,
            lines,
        }),
        _ => Err(ParseError::EmptyStatement),
    }
}

/// Parse a CBC export file from disk.
pub fn parse_statement_file(path: impl AsRef<Path>) -> Result<Statement, ParseError> {
    let file = File::open(path.as_ref())?;
    parse_statement(BufReader::new(file))
}
