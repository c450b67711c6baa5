//! Column kind inference over dataset records

use super::types::{ColumnSchema, ValueKind, MAX_SAFE_INTEGER};
use crate::dataset::{Record, Value};

impl ValueKind {
    /// Classify a single value
    ///
    /// Finite whole floats within the safe-integer range count as integers.
    pub fn of(value: &Value) -> ValueKind {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(f) if is_whole_safe(*f) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Composite(_) => ValueKind::Composite,
        }
    }
}

/// Check whether a float is a whole number an integer can hold exactly
pub(crate) fn is_whole_safe(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64
}

/// Per-column accumulator
#[derive(Debug, Clone, Default)]
struct ColumnStats {
    kind: Option<ValueKind>,
    present: bool,
    null_count: usize,
    missing_count: usize,
    conflicting: bool,
}

impl ColumnStats {
    fn observe(&mut self, value: Option<&Value>) {
        let Some(value) = value else {
            self.missing_count += 1;
            return;
        };

        self.present = true;
        if value.is_null() {
            self.null_count += 1;
            return;
        }

        let kind = ValueKind::of(value);
        match self.kind {
            None => self.kind = Some(kind),
            Some(first) if first != kind => self.conflicting = true,
            Some(_) => {}
        }
    }

    fn resolve(&self) -> ValueKind {
        match (self.kind, self.present) {
            (Some(kind), _) => kind,
            (None, true) => ValueKind::Null,
            // Never seen: Text is the safest SQL rendering
            (None, false) => ValueKind::Text,
        }
    }
}

/// Column inferrer over a fixed, ordered column set
///
/// Feed it records one at a time with [`observe`](Self::observe), or in one
/// go with [`infer_from_records`](Self::infer_from_records).
#[derive(Debug, Clone)]
pub struct ColumnInferrer {
    columns: Vec<String>,
    stats: Vec<ColumnStats>,
    record_count: usize,
}

impl ColumnInferrer {
    /// Create an inferrer for the given columns, in order
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let stats = vec![ColumnStats::default(); columns.len()];
        Self {
            columns,
            stats,
            record_count: 0,
        }
    }

    /// Create an inferrer over the first record's columns
    pub fn from_reference(records: &[Record]) -> Self {
        match records.first() {
            Some(first) => Self::new(first.keys()),
            None => Self::new(Vec::<String>::new()),
        }
    }

    /// Number of records observed so far
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Observe one record
    pub fn observe(&mut self, record: &Record) {
        self.record_count += 1;
        for (column, stats) in self.columns.iter().zip(self.stats.iter_mut()) {
            stats.observe(record.get(column));
        }
    }

    /// Observe every record and return the column schemas
    pub fn infer_from_records(mut self, records: &[Record]) -> Vec<ColumnSchema> {
        for record in records {
            self.observe(record);
        }
        self.finish()
    }

    /// Resolve the observed columns
    pub fn finish(self) -> Vec<ColumnSchema> {
        self.columns
            .into_iter()
            .zip(self.stats)
            .map(|(name, stats)| ColumnSchema {
                kind: stats.resolve(),
                null_count: stats.null_count,
                missing_count: stats.missing_count,
                conflicting: stats.conflicting,
                name,
            })
            .collect()
    }
}

/// Infer the kind of one column
///
/// The first non-null value decides. A column that is present but always
/// null is [`ValueKind::Null`]; a column that never appears is
/// [`ValueKind::Text`].
pub fn infer(column: &str, records: &[Record]) -> ValueKind {
    let mut present = false;
    for record in records {
        match record.get(column) {
            Some(value) if !value.is_null() => return ValueKind::of(value),
            Some(_) => present = true,
            None => {}
        }
    }

    if present {
        ValueKind::Null
    } else {
        ValueKind::Text
    }
}

/// Infer every column of the first record, in order
pub fn infer_columns(records: &[Record]) -> Vec<ColumnSchema> {
    ColumnInferrer::from_reference(records).infer_from_records(records)
}
