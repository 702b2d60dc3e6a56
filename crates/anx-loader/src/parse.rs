//! CSV parsing for exported `lines` and `flows` sheets.
//!
//! The first row is a header and is skipped. Columns are positional:
//! `name, bot_text, defines` and `source, answer, target`. Extra columns are
//! ignored and fully blank rows are skipped.

use anx_types::{FlowRecord, LineRecord};
use csv::{ReaderBuilder, StringRecord};

use crate::error::{LoaderError, Result};

const LINE_COLUMNS: usize = 3;
const FLOW_COLUMNS: usize = 3;

pub fn parse_lines(sheet: &str, body: &str) -> Result<Vec<LineRecord>> {
    let lines = rows(sheet, body, LINE_COLUMNS)?
        .into_iter()
        .map(|row| LineRecord {
            name: row[0].to_string(),
            bot_text: row[1].to_string(),
            defines: non_empty(&row[2]),
        })
        .collect();
    Ok(lines)
}

pub fn parse_flows(sheet: &str, body: &str) -> Result<Vec<FlowRecord>> {
    let flows = rows(sheet, body, FLOW_COLUMNS)?
        .into_iter()
        .map(|row| FlowRecord {
            source: row[0].to_string(),
            answer: non_empty(&row[1]),
            target: row[2].to_string(),
        })
        .collect();
    Ok(flows)
}

fn rows(sheet: &str, body: &str, expected: usize) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() < expected {
            return Err(LoaderError::MalformedRow {
                sheet: sheet.to_string(),
                // 1-based, counting the header
                row: idx + 2,
                expected,
                found: record.len(),
            });
        }
        rows.push(record);
    }
    Ok(rows)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
