//! Table data shown by the marquee list

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Header and body rows of a list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTable {
    Rows(Vec<Vec<serde_json::Value>>),
    Object {
        #[serde(default)]
        header: Option<Vec<serde_json::Value>>,
        rows: Vec<Vec<serde_json::Value>>,
    },
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn json_row(row: Vec<serde_json::Value>) -> Vec<String> {
    row.into_iter().map(cell_text).collect()
}

impl TableData {
    /// Number of columns, taken from the widest row
    pub fn column_count(&self) -> usize {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// Parse `{ "header": [...], "rows": [[...]] }` or a bare array of rows.
    ///
    /// With a bare array the first row becomes the header when
    /// `first_row_is_header` is set.
    pub fn from_json(content: &str, first_row_is_header: bool) -> Result<Self> {
        let table: JsonTable = serde_json::from_str(content)?;
        let data = match table {
            JsonTable::Object { header, rows } => Self {
                header: header.map(json_row),
                rows: rows.into_iter().map(json_row).collect(),
            },
            JsonTable::Rows(rows) => {
                Self::split_header(rows.into_iter().map(json_row).collect(), first_row_is_header)
            }
        };
        Ok(data)
    }

    /// Parse tab separated lines. A literal `\n` in a cell becomes a line break.
    pub fn from_tsv(content: &str, first_row_is_header: bool) -> Self {
        let rows = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.split('\t')
                    .map(|cell| cell.trim().replace("\\n", "\n"))
                    .collect()
            })
            .collect();
        Self::split_header(rows, first_row_is_header)
    }

    /// Parse by file extension: `.json` as JSON, anything else as TSV
    pub fn parse(path: &Path, content: &str, first_row_is_header: bool) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let data = if is_json {
            Self::from_json(content, first_row_is_header)?
        } else {
            Self::from_tsv(content, first_row_is_header)
        };

        if data.rows.is_empty() {
            return Err(Error::TableData(format!(
                "{} has no rows to show",
                path.display()
            )));
        }
        Ok(data)
    }

    fn split_header(mut rows: Vec<Vec<String>>, first_row_is_header: bool) -> Self {
        let header = if first_row_is_header && !rows.is_empty() {
            Some(rows.remove(0))
        } else {
            None
        };
        Self { header, rows }
    }
}
