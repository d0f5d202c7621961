//! CSV table of tiles.
//!
//! One header row, then one row per tile in row-major order with 1-based
//! row and column indices. The full layout adds the fill colour as a
//! quoted hex string:
//!
//! ```text
//! Row,Column,Face,Color
//! 1,1,4,"#F5F5F5"
//! ```

use std::fs;
use std::path::Path;

use crate::error::{DiceError, Result};
use crate::mosaic::{OverrideCell, OverrideGrid, TileView};
use crate::types::{Colour, FaceValue};

pub const FULL_HEADER: &str = "Row,Column,Face,Color";
pub const SIMPLE_HEADER: &str = "Row,Column,Dice Value";

/// Which columns the table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CsvLayout {
    /// Row, column, face and fill colour.
    #[default]
    Full,
    /// Row, column and face only.
    Simple,
}

impl CsvLayout {
    pub fn header(self) -> &'static str {
        match self {
            CsvLayout::Full => FULL_HEADER,
            CsvLayout::Simple => SIMPLE_HEADER,
        }
    }
}

/// One parsed table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvRecord {
    /// 1-based row.
    pub row: usize,
    /// 1-based column.
    pub col: usize,
    pub face: FaceValue,
    /// Present in the full layout only.
    pub fill: Option<Colour>,
}

/// Serialize the resolved tiles of `view`.
pub fn to_csv(view: &TileView<'_>, layout: CsvLayout) -> String {
    let mut out = String::with_capacity(16 * (view.rows() * view.cols() + 1));
    out.push_str(layout.header());
    out.push('\n');

    for (row, col, cell) in view.iter() {
        match layout {
            CsvLayout::Full => {
                out.push_str(&format!("{},{},{},\"{}\"\n", row + 1, col + 1, cell.face, cell.fill));
            }
            CsvLayout::Simple => {
                out.push_str(&format!("{},{},{}\n", row + 1, col + 1, cell.face));
            }
        }
    }

    out
}

/// Write the table to a file.
pub fn write_csv(view: &TileView<'_>, layout: CsvLayout, path: &Path) -> Result<()> {
    fs::write(path, to_csv(view, layout)).map_err(|e| DiceError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write CSV: {}", e),
    })
}

/// Parse a table in either layout.
///
/// The layout is detected from the header. Blank lines are skipped.
pub fn parse_csv(text: &str) -> Result<Vec<CsvRecord>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let layout = match lines.next() {
        Some((_, header)) if header.eq_ignore_ascii_case(FULL_HEADER) => CsvLayout::Full,
        Some((_, header)) if header.eq_ignore_ascii_case(SIMPLE_HEADER) => CsvLayout::Simple,
        Some((line_no, header)) => {
            return Err(DiceError::Parse {
                message: format!("Line {}: unrecognised header '{}'", line_no, header),
                help: Some(format!("Expected '{}' or '{}'", FULL_HEADER, SIMPLE_HEADER)),
            })
        }
        None => {
            return Err(DiceError::Parse {
                message: "CSV is empty".to_string(),
                help: None,
            })
        }
    };

    lines.map(|(line_no, line)| parse_record(line_no, line, layout)).collect()
}

/// Build an override grid from parsed records.
///
/// Each record sets the face (and fill, when present) of its tile.
/// Records outside `rows x cols` are rejected.
pub fn records_to_overrides(records: &[CsvRecord], rows: usize, cols: usize) -> Result<OverrideGrid> {
    let mut grid = OverrideGrid::empty(rows, cols);
    for record in records {
        if record.row == 0 || record.col == 0 {
            return Err(DiceError::input(format!(
                "Row and column indices start at 1, got ({}, {})",
                record.row, record.col
            )));
        }
        let patch = OverrideCell {
            face: Some(record.face),
            fill: record.fill,
            pip: None,
        };
        grid = grid.apply(record.row - 1, record.col - 1, patch)?;
    }
    Ok(grid)
}

/// Grid dimensions spanned by `records`, as (rows, cols).
pub fn record_dimensions(records: &[CsvRecord]) -> (usize, usize) {
    records.iter().fold((0, 0), |(rows, cols), record| {
        (rows.max(record.row), cols.max(record.col))
    })
}

fn parse_record(line_no: usize, line: &str, layout: CsvLayout) -> Result<CsvRecord> {
    let fields = split_fields(line).map_err(|message| line_error(line_no, message))?;

    let expected = match layout {
        CsvLayout::Full => 4,
        CsvLayout::Simple => 3,
    };
    if fields.len() != expected {
        return Err(line_error(
            line_no,
            format!("expected {} fields, found {}", expected, fields.len()),
        ));
    }

    let index = |name: &str, value: &str| -> Result<usize> {
        value
            .trim()
            .parse()
            .map_err(|_| line_error(line_no, format!("invalid {} '{}'", name, value)))
    };

    let row = index("row", &fields[0])?;
    let col = index("column", &fields[1])?;
    let face = fields[2]
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(FaceValue::new)
        .ok_or_else(|| line_error(line_no, format!("invalid face '{}'", fields[2])))?;

    let fill = match layout {
        CsvLayout::Full => Some(
            Colour::parse(&fields[3])
                .map_err(|_| line_error(line_no, format!("invalid colour '{}'", fields[3])))?,
        ),
        CsvLayout::Simple => None,
    };

    Ok(CsvRecord { row, col, face, fill })
}

/// Split one line into fields, honouring double quotes and `""` escapes.
fn split_fields(line: &str) -> std::result::Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            ('"', true) => quoted = false,
            ('"', false) if field.trim().is_empty() => {
                field.clear();
                quoted = true;
            }
            (',', false) => fields.push(std::mem::take(&mut field)),
            (c, _) => field.push(c),
        }
    }

    if quoted {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(field);
    Ok(fields)
}

fn line_error(line_no: usize, message: impl Into<String>) -> DiceError {
    DiceError::Parse {
        message: format!("Line {}: {}", line_no, message.into()),
        help: Some(format!("Rows look like: 1,1,4,\"#F5F5F5\" after the '{}' header", FULL_HEADER)),
    }
}
