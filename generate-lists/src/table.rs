//! Plain-text tables: delimited input with a header row, JSON lines for the
//! merged item table, and one-id-per-line output lists.
//!
//! The delimited reader does not understand quoting; none of the sources
//! quote their fields.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use lexicon_utils::{Item, ItemNumber};

use crate::error::ListsError;

/// A delimited table held in memory.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<(usize, Vec<String>)>,
    decimal_comma: bool,
}

/// One data row, with the 1-based line number it came from.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    line: usize,
    cells: &'a [String],
}

/// Guess the delimiter from the header line: tab, then semicolon, then comma.
pub fn sniff_delimiter(header: &str) -> char {
    if header.contains('\t') {
        '\t'
    } else if header.contains(';') {
        ';'
    } else {
        ','
    }
}

impl Table {
    /// Parse a table whose first non-empty line is the header.
    ///
    /// With a tab or semicolon delimiter, numbers may use a decimal comma.
    pub fn parse(content: &str) -> Result<Self, ListsError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(ListsError::Table {
                line: 1,
                message: "missing header row".to_string(),
            });
        };
        let delimiter = sniff_delimiter(header);
        let columns: Vec<String> = header
            .split(delimiter)
            .map(|column| column.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let rows = lines
            .map(|(line, text)| {
                let cells = text
                    .split(delimiter)
                    .map(|cell| cell.trim().to_string())
                    .collect();
                (line, cells)
            })
            .collect();

        Ok(Self {
            columns,
            rows,
            decimal_comma: delimiter != ',',
        })
    }

    /// Read a table from disk. Files that are not valid UTF-8 are decoded
    /// as Latin-1, the encoding of the published norm and frequency lists.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let content = decode_text(bytes);
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Index of a column by its header name.
    pub fn column(&self, name: &str) -> Result<usize, ListsError> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| ListsError::Table {
                line: 1,
                message: format!("missing column `{name}` (found {:?})", self.columns),
            })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|(line, cells)| Row {
            table: self,
            line: *line,
            cells,
        })
    }
}

impl<'a> Row<'a> {
    pub fn line(&self) -> usize {
        self.line
    }

    /// The raw cell, or an empty string for a short row.
    pub fn text(&self, column: usize) -> &'a str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// A numeric cell; empty cells and `NA`/`NaN` read as `None`.
    pub fn number(&self, column: usize) -> Result<Option<f64>, ListsError> {
        let text = self.text(column);
        if text.is_empty() || text.eq_ignore_ascii_case("na") || text.eq_ignore_ascii_case("nan")
        {
            return Ok(None);
        }
        let text = if self.table.decimal_comma {
            text.replace(',', ".")
        } else {
            text.to_string()
        };
        text.parse::<f64>().map(Some).map_err(|_| self.error(column, "a number"))
    }

    /// A numeric cell that must be present.
    pub fn required_number(&self, column: usize) -> Result<f64, ListsError> {
        self.number(column)?
            .ok_or_else(|| self.error(column, "a number"))
    }

    pub fn item_number(&self, column: usize) -> Result<ItemNumber, ListsError> {
        let number = self.required_number(column)?;
        if number.fract() != 0.0 || number < 0.0 || number > ItemNumber::MAX as f64 {
            return Err(self.error(column, "an item number"));
        }
        Ok(number as ItemNumber)
    }

    fn error(&self, column: usize, expected: &str) -> ListsError {
        let name = self
            .table
            .columns
            .get(column)
            .map(String::as_str)
            .unwrap_or("?");
        ListsError::Table {
            line: self.line,
            message: format!("expected {expected} in `{name}`, found {:?}", self.text(column)),
        }
    }
}

/// Read the merged item table, one JSON object per line.
pub fn read_items_jsonl(path: &Path) -> anyhow::Result<Vec<Item>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut items = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let item = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid item", path.display(), i + 1))?;
        items.push(item);
    }
    Ok(items)
}

/// Write rows as JSON lines.
pub fn write_jsonl<T: serde::Serialize>(rows: &[T], path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        let json = serde_json::to_string(row)?;
        writeln!(writer, "{json}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write item numbers one per line in ascending order.
pub fn write_id_list(ids: &[ItemNumber], path: &Path) -> anyhow::Result<()> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for id in ids {
        writeln!(writer, "{id}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one string per line.
pub fn write_lines(lines: &[String], path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

/// UTF-8 if the bytes are valid UTF-8, Latin-1 otherwise.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            log::debug!("input is not UTF-8 ({err}), decoding as Latin-1");
            err.into_bytes().iter().map(|&b| char::from(b)).collect()
        }
    }
}
