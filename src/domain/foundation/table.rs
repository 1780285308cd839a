//! Flat comma-separated input tables.
//!
//! Every model input is a list of rows of trimmed fields. Blank lines,
//! `#` comment lines and empty fields are dropped; row arity is checked by
//! the consumer of each table.

use serde::Serialize;

use super::ModelError;

/// One non-empty row of a table, with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub line: u64,
    pub fields: Vec<String>,
}

impl TableRow {
    /// Creates a row from string fields.
    pub fn new(line: u64, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            line,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the first field.
    pub fn key(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A named table read from one input source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Parses comma-separated text into a table.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, ModelError> {
        let name = name.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ModelError::MalformedTable {
                table: name.clone(),
                reason: e.to_string(),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let fields: Vec<String> = record
                .iter()
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect();
            if !fields.is_empty() {
                rows.push(TableRow { line, fields });
            }
        }

        Ok(Self { name, rows })
    }

    /// Fails with `RowArity` unless the row has at least `min` fields.
    pub fn require_min_fields(&self, row: &TableRow, min: usize) -> Result<(), ModelError> {
        if row.len() < min {
            return Err(ModelError::RowArity {
                table: self.name.clone(),
                line: row.line,
                expected: format!("at least {}", min),
                found: row.len(),
            });
        }
        Ok(())
    }

    /// Fails with `RowArity` unless the row has between `min` and `max` fields.
    pub fn require_field_range(
        &self,
        row: &TableRow,
        min: usize,
        max: usize,
    ) -> Result<(), ModelError> {
        if row.len() < min || row.len() > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{} to {}", min, max)
            };
            return Err(ModelError::RowArity {
                table: self.name.clone(),
                line: row.line,
                expected,
                found: row.len(),
            });
        }
        Ok(())
    }

    /// Parses field `index` of `row` as a number.
    pub fn number(&self, row: &TableRow, index: usize) -> Result<f64, ModelError> {
        let raw = row.fields.get(index).map(String::as_str).unwrap_or("");
        raw.parse::<f64>().map_err(|_| ModelError::InvalidNumber {
            table: self.name.clone(),
            line: row.line,
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_skips_empty_fields() {
        let table = Table::parse("t", "G1 , AND,  A,,B \n\n# note\nG2,OR,C\n").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].fields, vec!["G1", "AND", "A", "B"]);
        assert_eq!(table.rows[1].key(), "G2");
    }

    #[test]
    fn parse_records_source_lines() {
        let table = Table::parse("t", "A,PE,0.1\n\nB,PE,0.2\n").unwrap();
        assert_eq!(table.rows[0].line, 1);
        assert_eq!(table.rows[1].line, 3);
    }

    #[test]
    fn empty_text_gives_empty_table() {
        assert!(Table::parse("t", "").unwrap().rows.is_empty());
    }

    #[test]
    fn require_min_fields_reports_arity() {
        let table = Table::parse("tree.txt", "G1,AND\n").unwrap();
        let err = table.require_min_fields(&table.rows[0], 3).unwrap_err();
        assert!(matches!(err, ModelError::RowArity { found: 2, line: 1, .. }));
    }

    #[test]
    fn number_rejects_garbage() {
        let table = Table::parse("p.txt", "A,PE,abc\n").unwrap();
        assert!(matches!(
            table.number(&table.rows[0], 2),
            Err(ModelError::InvalidNumber { .. })
        ));
        let table = Table::parse("p.txt", "A,PE,3.6E-8\n").unwrap();
        assert_eq!(table.number(&table.rows[0], 2).unwrap(), 3.6e-8);
    }
}
