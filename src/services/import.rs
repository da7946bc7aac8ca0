//! Delimited boat import
//!
//! Parses boat lines of the form
//! `category,name,year,makeModel,lengthFeet,purchasePrice[,expenses]`.
//! Every field is trimmed; the trailing expenses field defaults to zero.
//! Fields are split on every comma. Quote characters have no special meaning
//! and are kept as part of the field text.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{FleetError, FleetResult};
use crate::models::{Boat, BoatType, Money};

/// Fields every line must carry
const REQUIRED_FIELDS: usize = 6;
/// Fields a line may carry when expenses are supplied
const MAX_FIELDS: usize = 7;

/// Parse every boat line from a reader
///
/// Blank lines are skipped. The first malformed line fails the whole parse,
/// so callers either get every boat or none of them.
pub fn parse_boats<R: Read>(reader: R) -> FleetResult<Vec<Boat>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut boats = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(boats.len() + 1);

        if is_blank(&record) {
            continue;
        }

        boats.push(parse_record(&record, line)?);
    }

    Ok(boats)
}

/// Parse exactly one boat from a single line of text
pub fn parse_boat_line(line: &str) -> FleetResult<Boat> {
    let mut boats = parse_boats(line.as_bytes())?;
    match boats.len() {
        1 => Ok(boats.remove(0)),
        0 => Err(FleetError::parse(1, "No boat data supplied")),
        n => Err(FleetError::parse(
            1,
            format!("Expected one boat but found {} lines", n),
        )),
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.is_empty())
}

fn parse_record(record: &StringRecord, line: usize) -> FleetResult<Boat> {
    if record.len() < REQUIRED_FIELDS || record.len() > MAX_FIELDS {
        return Err(FleetError::parse(
            line,
            format!(
                "Expected {} or {} fields but found {}",
                REQUIRED_FIELDS,
                MAX_FIELDS,
                record.len()
            ),
        ));
    }

    let field = |index: usize| record.get(index).unwrap_or_default();

    let boat_type = BoatType::parse(field(0)).ok_or_else(|| {
        FleetError::parse(
            line,
            format!(
                "Unknown boat type '{}'. Valid types: SAILING, POWER",
                field(0)
            ),
        )
    })?;

    let name = field(1);
    let year: i32 = field(2)
        .parse()
        .map_err(|_| FleetError::parse(line, format!("Invalid year '{}'", field(2))))?;
    let make_model = field(3);
    let length_feet: u32 = field(4)
        .parse()
        .map_err(|_| FleetError::parse(line, format!("Invalid length '{}'", field(4))))?;
    let purchase_price = parse_money(field(5), "purchase price", line)?;
    let expenses = match record.get(6) {
        Some(raw) => parse_money(raw, "expenses", line)?,
        None => Money::zero(),
    };

    Boat::new(
        boat_type,
        name,
        year,
        make_model,
        length_feet,
        purchase_price,
        expenses,
    )
    .map_err(|e| FleetError::parse(line, e.to_string()))
}

fn parse_money(raw: &str, what: &str, line: usize) -> FleetResult<Money> {
    Money::parse(raw).map_err(|e| FleetError::parse(line, format!("Invalid {}: {}", what, e)))
}
