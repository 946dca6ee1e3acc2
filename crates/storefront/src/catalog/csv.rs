//! Quote-aware CSV parsing for published spreadsheet exports.
//!
//! The format is what spreadsheet "publish as CSV" produces for a simple
//! product sheet: one header row, one product per line, fields wrapped in
//! double quotes when they contain commas. A `"` toggles quoted mode and is
//! never part of the emitted value.

use std::collections::BTreeMap;
use std::fmt;

use wildlife_prints_core::{Price, PriceError};

use super::CatalogError;

/// Canonical column a header maps to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Id,
    Title,
    Price,
    Description,
    FullDescription,
    Image,
    Category,
    Size,
    /// Extra image filenames separated by `|` or `;`.
    Gallery,
    /// Any other header, kept verbatim.
    Extra(String),
}

impl Column {
    /// Map a header cell to its column, ignoring case.
    #[must_use]
    pub fn from_header(header: &str) -> Self {
        match header.trim().to_lowercase().as_str() {
            "id" => Self::Id,
            "title" | "name" => Self::Title,
            "price" => Self::Price,
            "description" | "short_description" => Self::Description,
            "full_description" | "long_description" => Self::FullDescription,
            "image" | "image_filename" => Self::Image,
            "category" => Self::Category,
            "size" => Self::Size,
            "gallery" => Self::Gallery,
            _ => Self::Extra(header.trim().to_string()),
        }
    }

    /// Name used in issue reports.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Price => "price",
            Self::Description => "description",
            Self::FullDescription => "full_description",
            Self::Image => "image",
            Self::Category => "category",
            Self::Size => "size",
            Self::Gallery => "gallery",
            Self::Extra(name) => name,
        }
    }
}

/// One data line, keyed by column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based line number in the CSV text.
    pub line: usize,
    fields: BTreeMap<Column, String>,
}

impl SheetRow {
    /// Raw value for a column (empty string if the cell was empty).
    #[must_use]
    pub fn get(&self, column: &Column) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value for a column, treating an empty cell as absent.
    #[must_use]
    pub fn value(&self, column: &Column) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    /// Unmapped columns as `(header, value)` pairs.
    pub fn extras(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter_map(|(column, value)| match column {
            Column::Extra(name) => Some((name.as_str(), value.as_str())),
            _ => None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Header plus data rows of one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSheet {
    pub headers: Vec<Column>,
    pub rows: Vec<SheetRow>,
}

/// A data-quality problem in one spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldIssue {
    pub line: usize,
    pub column: String,
    pub value: String,
    pub problem: String,
}

impl FieldIssue {
    #[must_use]
    pub fn new(
        line: usize,
        column: &Column,
        value: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        Self {
            line,
            column: column.name().to_string(),
            value: value.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, {}: {} (value '{}')",
            self.line, self.column, self.problem, self.value
        )
    }
}

/// Split one line into fields, honouring quoted commas.
#[must_use]
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Parse CSV text into header and rows.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if the text has no header row.
pub fn parse_sheet(text: &str) -> Result<ParsedSheet, CatalogError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split('\n').enumerate();

    let header_line = lines
        .next()
        .map(|(_, line)| line.trim())
        .filter(|line| !line.is_empty())
        .ok_or_else(|| CatalogError::Parse("missing header row".to_string()))?;

    let headers: Vec<Column> = split_line(header_line)
        .iter()
        .map(|h| Column::from_header(h))
        .collect();

    let rows = lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let mut values = split_line(line.trim()).into_iter();
            let fields = headers
                .iter()
                .map(|column| {
                    let value = values.next().unwrap_or_default();
                    (column.clone(), value.trim().to_string())
                })
                .collect();
            SheetRow {
                line: index + 1,
                fields,
            }
        })
        .collect();

    Ok(ParsedSheet { headers, rows })
}

/// Parse a price cell, coercing bad input to zero.
///
/// The returned issue is `Some` whenever the cell was not a valid
/// non-negative number.
#[must_use]
pub fn parse_price(raw: &str, line: usize) -> (Price, Option<FieldIssue>) {
    if raw.trim().is_empty() {
        let issue = FieldIssue::new(line, &Column::Price, raw, "missing price, using 0");
        return (Price::zero(), Some(issue));
    }
    match raw.parse::<Price>() {
        Ok(price) => (price, None),
        Err(PriceError::Negative(_)) => {
            let issue = FieldIssue::new(line, &Column::Price, raw, "negative price, using 0");
            (Price::zero(), Some(issue))
        }
        Err(PriceError::Invalid(_)) => {
            let issue = FieldIssue::new(line, &Column::Price, raw, "not a number, using 0");
            (Price::zero(), Some(issue))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const SHEET: &str = "id,title,price,description\n\
        1,Sunset Serenity Print,280,Warm tones\n\
        \n\
        2,\"Tiger, Portrait\",420,\"Big cat, close up\"\n\
        \r\n\
        3,Humpback Whale Breach,380,Antarctic\n";

    #[test]
    fn test_row_count_skips_blank_lines() {
        let sheet = parse_sheet(SHEET).unwrap();
        assert_eq!(sheet.rows.len(), 3);
        assert_eq!(sheet.rows[2].line, 6);
    }

    #[test]
    fn test_quoted_comma_is_one_field() {
        let sheet = parse_sheet(SHEET).unwrap();
        let row = &sheet.rows[1];
        assert_eq!(row.get(&Column::Title), Some("Tiger, Portrait"));
        assert_eq!(row.get(&Column::Description), Some("Big cat, close up"));
        assert_eq!(row.get(&Column::Price), Some("420"));
    }

    #[test]
    fn test_split_line_strips_quotes() {
        assert_eq!(split_line("a,\"b,c\",d"), ["a", "b,c", "d"]);
        assert_eq!(split_line("\"x\"\"y\""), ["xy"]);
        assert_eq!(split_line(""), [""]);
    }

    #[test]
    fn test_headers_case_insensitive_and_extras() {
        let sheet = parse_sheet(
            "ID,Name,PRICE,Short_Description,Long_Description,Image_Filename,Category,Size,Edition\n\
             le-001,Black Deer,450,Deer,,1.jpg,Wildlife,A3,50 prints\n",
        )
        .unwrap();
        assert_eq!(
            sheet.headers,
            [
                Column::Id,
                Column::Title,
                Column::Price,
                Column::Description,
                Column::FullDescription,
                Column::Image,
                Column::Category,
                Column::Size,
                Column::Extra("Edition".to_string()),
            ]
        );
        let row = &sheet.rows[0];
        assert_eq!(row.value(&Column::FullDescription), None);
        assert_eq!(row.extras().collect::<Vec<_>>(), [("Edition", "50 prints")]);
    }

    #[test]
    fn test_quoted_headers_and_crlf() {
        let sheet = parse_sheet("\"id\",\"title\",\"price\"\r\n7,Forest Antelope,320\r\n").unwrap();
        assert_eq!(sheet.headers[1], Column::Title);
        assert_eq!(sheet.rows[0].get(&Column::Price), Some("320"));
    }

    #[test]
    fn test_short_row_fills_empty() {
        let sheet = parse_sheet("id,title,price,category\n9,Safari\n").unwrap();
        assert_eq!(sheet.rows[0].get(&Column::Price), Some(""));
        assert_eq!(sheet.rows[0].len(), 4);
    }

    #[test]
    fn test_missing_header_is_parse_error() {
        assert!(matches!(parse_sheet(""), Err(CatalogError::Parse(_))));
        assert!(matches!(parse_sheet("\n1,2,3"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_bom_is_ignored() {
        let sheet = parse_sheet("\u{feff}id,title\n1,A\n").unwrap();
        assert_eq!(sheet.headers[0], Column::Id);
    }

    #[test]
    fn test_parse_price_coerces_with_issue() {
        let (price, issue) = parse_price("ask us", 4);
        assert_eq!(price, Price::zero());
        let issue = issue.unwrap();
        assert_eq!(issue.line, 4);
        assert_eq!(issue.column, "price");

        let (price, issue) = parse_price("-10", 5);
        assert_eq!(price, Price::zero());
        assert!(issue.is_some());

        let (price, issue) = parse_price("$390", 6);
        assert_eq!(price, Price::whole(390));
        assert!(issue.is_none());
    }
}
