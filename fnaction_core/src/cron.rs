// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

//! Validation of standard 5-field cron expressions:
//! `minute hour day-of-month month day-of-week`.

use anyhow::Context;

const MONTHS: [&str; 12] = ["JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC"];
const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

struct FieldSpec {
    label: &'static str,
    min: u32,
    max: u32,
    names: &'static [&'static str],
}

const FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        label: "minute",
        min: 0,
        max: 59,
        names: &[],
    },
    FieldSpec {
        label: "hour",
        min: 0,
        max: 23,
        names: &[],
    },
    FieldSpec {
        label: "day of month",
        min: 1,
        max: 31,
        names: &[],
    },
    FieldSpec {
        label: "month",
        min: 1,
        max: 12,
        names: &MONTHS,
    },
    // 7 is an alias of Sunday.
    FieldSpec {
        label: "day of week",
        min: 0,
        max: 7,
        names: &WEEKDAYS,
    },
];

/// Check that `expr` is a valid cron expression.
///
/// Each field accepts `*`, a value, a range `a-b`, comma-separated lists of
/// those, and a `/step` suffix on `*`, a value or a range. Months and
/// weekdays can also be given by their three-letter English names.
pub fn validate(expr: &str) -> anyhow::Result<()> {
    let parts: Vec<&str> = expr.split_whitespace().collect();
    anyhow::ensure!(parts.len() == FIELDS.len(), "expected 5 fields, got {}", parts.len());
    for (part, spec) in parts.iter().zip(FIELDS.iter()) {
        validate_field(part, spec).with_context(|| format!("invalid {} field '{}'", spec.label, part))?;
    }
    Ok(())
}

fn validate_field(field: &str, spec: &FieldSpec) -> anyhow::Result<()> {
    for item in field.split(',') {
        anyhow::ensure!(!item.is_empty(), "empty list element");
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (item, None),
        };
        if let Some(step) = step {
            let step: u32 = step.parse().context("step is not a number")?;
            anyhow::ensure!(step > 0 && step <= spec.max, "step must be 1-{}", spec.max);
        }
        if range == "*" {
            continue;
        }
        match range.split_once('-') {
            Some((start, end)) => {
                let start = parse_value(start, spec)?;
                let end = parse_value(end, spec)?;
                anyhow::ensure!(start <= end, "range start {} is after its end {}", start, end);
            }
            None => {
                parse_value(range, spec)?;
            }
        }
    }
    Ok(())
}

fn parse_value(value: &str, spec: &FieldSpec) -> anyhow::Result<u32> {
    let upper = value.to_ascii_uppercase();
    if let Some(pos) = spec.names.iter().position(|name| *name == upper) {
        // Months are numbered from 1, weekdays from 0.
        return Ok(pos as u32 + spec.min);
    }
    let num: u32 = value.parse().with_context(|| format!("'{}' is not a number", value))?;
    anyhow::ensure!(num >= spec.min && num <= spec.max, "value must be {}-{}", spec.min, spec.max);
    Ok(num)
}
