//! SQL INSERT export

use super::file::{validate_dataset, Export, ExportFile, ExportReport};
use crate::config::SqlConfig;
use crate::dataset::{GeneratedDataset, Record, Value};
use crate::error::{Error, Result};
use crate::format::{quote_identifier, sql_literal};
use crate::schema::{ColumnInferrer, ColumnSchema, ValueKind};
use crate::types::{ExportFormat, IdentifierCase};
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::{debug, warn};

/// Render a dataset as a batch of INSERT statements
///
/// Columns come from the first record, in order. Later records missing a
/// column get `NULL` there; keys outside the reference set are dropped.
/// Both cases are counted in the report instead of failing the export.
/// An empty dataset yields a comment-only file.
pub fn export_sql(dataset: &GeneratedDataset, config: &SqlConfig) -> Result<Export> {
    validate_dataset(dataset)?;
    let table = quote_identifier(&dataset.name)?;
    let mut report = ExportReport::new(&dataset.name, ExportFormat::Sql);

    let Some(reference) = dataset.data.first() else {
        let mut out = String::new();
        if config.header_comment {
            write_header(&mut out, dataset, &[]);
        }
        out.push_str("-- No rows to insert\n");
        debug!(dataset = %dataset.name, "Rendered empty SQL export");
        return Ok(Export {
            file: ExportFile::new(&dataset.name, ExportFormat::Sql, out),
            report,
        });
    };

    let columns: Vec<&str> = reference.keys().collect();
    if columns.is_empty() {
        return Err(Error::validation(format!(
            "First record of '{}' has no columns",
            dataset.name
        )));
    }
    let column_list = column_identifiers(&columns, config.identifier_case)?.join(", ");
    let schema = ColumnInferrer::new(columns.iter().copied()).infer_from_records(&dataset.data);

    let tuples: Vec<String> = dataset
        .data
        .iter()
        .enumerate()
        .map(|(row, record)| render_tuple(row, record, &schema, &mut report))
        .collect();
    report.rows = tuples.len();

    let mut out = String::new();
    if config.header_comment {
        write_header(&mut out, dataset, &schema);
    }

    let batch_size = config.batch_size.unwrap_or(tuples.len()).max(1);
    for (i, chunk) in tuples.chunks(batch_size).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "INSERT INTO {table} ({column_list}) VALUES");
        out.push_str(&chunk.join(",\n"));
        out.push_str(";\n");
    }

    if report.is_degraded() {
        warn!(
            dataset = %dataset.name,
            degraded_rows = report.degraded_rows,
            missing_values = report.missing_values,
            dropped_columns = ?report.dropped_columns,
            "Records did not match the first record's columns"
        );
    }
    debug!(
        dataset = %dataset.name,
        rows = report.rows,
        kind_mismatches = report.kind_mismatches,
        bytes = out.len(),
        "Rendered SQL export"
    );

    Ok(Export {
        file: ExportFile::new(&dataset.name, ExportFormat::Sql, out),
        report,
    })
}

/// Quote column identifiers, rejecting names that collide after normalization
fn column_identifiers(columns: &[&str], case: IdentifierCase) -> Result<Vec<String>> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(columns.len());
    let mut quoted = Vec::with_capacity(columns.len());

    for &column in columns {
        if let Some(previous) = seen.insert(case.normalize(column), column) {
            return Err(Error::schema(format!(
                "Columns '{previous}' and '{column}' map to the same SQL identifier"
            )));
        }
        quoted.push(quote_identifier(column)?);
    }

    Ok(quoted)
}

/// Render one record as a value tuple in reference column order
fn render_tuple(
    row: usize,
    record: &Record,
    schema: &[ColumnSchema],
    report: &mut ExportReport,
) -> String {
    let mut degraded = false;
    let mut values = Vec::with_capacity(schema.len());

    for column in schema {
        match record.get(&column.name) {
            Some(value) => {
                let kind = ValueKind::of(value);
                if !fits_column(kind, column.kind) {
                    report.kind_mismatches += 1;
                    debug!(
                        row,
                        column = %column.name,
                        expected = %column.kind,
                        actual = %kind,
                        "Value kind differs from column kind"
                    );
                }
                if let Value::Float(f) = value {
                    if !f.is_finite() {
                        warn!(row, column = %column.name, "Non-finite number written as NULL");
                    }
                }
                values.push(sql_literal(value));
            }
            None => {
                degraded = true;
                report.missing_values += 1;
                values.push("NULL".to_string());
            }
        }
    }

    for key in record.keys() {
        if !schema.iter().any(|column| column.name == key) {
            degraded = true;
            report.dropped_columns.insert(key.to_string());
        }
    }

    if degraded {
        report.degraded_rows += 1;
    }

    format!("({})", values.join(", "))
}

/// Whether a value of `kind` agrees with a column inferred as `column`
///
/// Whole floats classify as integers, so integers are at home in float columns.
fn fits_column(kind: ValueKind, column: ValueKind) -> bool {
    kind == ValueKind::Null
        || kind == column
        || (kind == ValueKind::Integer && column == ValueKind::Float)
}

/// Comment lines describing the dataset
fn write_header(out: &mut String, dataset: &GeneratedDataset, schema: &[ColumnSchema]) {
    let _ = writeln!(out, "-- Dataset: {}", dataset.name);
    let _ = writeln!(out, "-- Rows: {}", dataset.len());
    if !schema.is_empty() {
        let columns: Vec<String> = schema
            .iter()
            .map(|column| format!("{} {}", column.name, column.kind))
            .collect();
        let _ = writeln!(out, "-- Columns: {}", columns.join(", "));
    }
}
