//! Reading uploaded spreadsheets into rows of text.
//!
//! The first row of a sheet is taken as the header row; every following
//! non-blank row becomes a mapping from header to cell text. Parsing is a pure
//! function of the buffer.

use std::collections::HashMap;
use std::collections::HashSet;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;

use calamine::open_workbook_auto_from_rs;
use calamine::Data;
use calamine::Range;
use calamine::Reader;
use calamine::Sheets;

/// Column name -> cell text. Every header of the sheet is present.
pub type Row = HashMap<String, String>;

/// Name given to header cells that are blank
const EMPTY_HEADER: &str = "__EMPTY";

#[derive(Debug)]
pub struct Sheet {
    pub sheet_name: String,
    /// In column order
    pub headers: Vec<String>,
    /// In row order
    pub data: Vec<Row>,
}

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("File is not a recognised spreadsheet")]
    UnknownFormat(#[source] calamine::Error),
    #[error("Spreadsheet has no sheets")]
    NoSheets,
    #[error("Could not read sheet {name:?}")]
    UnreadableSheet {
        name: String,
        #[source]
        source: calamine::Error,
    },
}

/// Parse only the first sheet of the workbook
pub fn parse_first_sheet(buf: &[u8]) -> Result<Sheet, ParseError> {
    let mut workbook = open_workbook(buf)?;
    let name = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or(ParseError::NoSheets)?;
    read_sheet(&mut workbook, name)
}

/// Parse every sheet, in workbook order
pub fn parse_all_sheets(buf: &[u8]) -> Result<Vec<Sheet>, ParseError> {
    let mut workbook = open_workbook(buf)?;
    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(ParseError::NoSheets);
    }
    names
        .into_iter()
        .map(|name| read_sheet(&mut workbook, name))
        .collect()
}

/// Format is sniffed from the content (xlsx, xlsm, xlsb, xls, ods), never from
/// a file name
fn open_workbook(buf: &[u8]) -> Result<Sheets<Cursor<&[u8]>>, ParseError> {
    open_workbook_auto_from_rs(Cursor::new(buf)).map_err(ParseError::UnknownFormat)
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    name: String,
) -> Result<Sheet, ParseError> {
    match workbook.worksheet_range(&name) {
        Ok(range) => Ok(sheet_from_range(name, &range)),
        Err(source) => Err(ParseError::UnreadableSheet { name, source }),
    }
}

fn sheet_from_range(
    sheet_name: String,
    range: &Range<Data>,
) -> Sheet {
    let mut rows = range.rows();

    let headers = match rows.next() {
        Some(header_row) => header_names(header_row),
        None => vec![],
    };

    let data = rows
        .filter(|row| row.iter().any(|cell| !cell_text(cell).trim().is_empty()))
        .map(|row| {
            // a range is rectangular, but don't rely on it for the header count
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), row.get(i).map(cell_text).unwrap_or_default()))
                .collect()
        })
        .collect();

    Sheet {
        sheet_name,
        headers,
        data,
    }
}

/// Header text, with blank headers named `__EMPTY` and repeats suffixed `_1`,
/// `_2`, ... so that every column keeps its own key
fn header_names(header_row: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    header_row
        .iter()
        .map(|cell| {
            let text = cell_text(cell).trim().to_string();
            let base = match text.is_empty() {
                true => EMPTY_HEADER.to_string(),
                false => text,
            };
            let mut name = base.clone();
            let mut n = 0;
            while !seen.insert(name.clone()) {
                n += 1;
                name = format!("{base}_{n}");
            }
            name
        })
        .collect()
}

/// Cell value as text. Integral floats (Excel stores all numbers as floats)
/// are printed without a fractional part, so phone numbers survive.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
