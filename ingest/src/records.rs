//! JSON Lines record reader

use anyhow::{bail, Context};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every record of a JSON Lines file
pub fn read_records(path: &Path) -> anyhow::Result<Vec<Value>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    parse_records(BufReader::new(file)).with_context(|| format!("cannot read {}", path.display()))
}

/// One JSON object per non-blank line
pub fn parse_records<R: BufRead>(reader: R) -> anyhow::Result<Vec<Value>> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record: Value = serde_json::from_str(line)
            .with_context(|| format!("line {} is not valid JSON", index + 1))?;
        if !record.is_object() {
            bail!("line {} is not a JSON object", index + 1);
        }
        records.push(record);
    }

    Ok(records)
}
