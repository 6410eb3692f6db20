//! Spreadsheet content and formatting for a prospect list.
//!
//! Everything here is pure: it turns rows into the value grid and the
//! `batchUpdate` request list that [`crate::api_clients::SheetsClient`]
//! sends. The layout is a single `Prospect` tab with a frozen, styled header,
//! per-priority row colours, fixed column widths and an auto-filter.

use serde::Serialize;
use serde_json::{Value, json};

use crate::prospect::{COLUMN_COUNT, Geography, HEADERS, Priority, ProspectRow};

/// Title of the only tab in the document.
pub const SHEET_TITLE: &str = "Prospect";

/// Grid id of the only tab in the document.
pub const SHEET_ID: u32 = 0;

/// Pixel height of every data row.
pub const DATA_ROW_HEIGHT: u32 = 90;

/// Pixel widths, one per entry of [`HEADERS`].
pub const COLUMN_WIDTHS: [u32; COLUMN_COUNT] = [
    220, 140, 230, 140, 230, 200, 160, 280, 320, 220, 80, 400, 140, 120,
];

/// Sheets API colour (components in `0.0..=1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Rgb {
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }
}

pub const HEADER_BACKGROUND: Rgb = Rgb::new(0.122, 0.286, 0.490);
pub const HEADER_TEXT: Rgb = Rgb::new(1.0, 1.0, 1.0);

/// Row background for a priority tier.
pub fn priority_color(priority: Priority) -> Rgb {
    match priority {
        Priority::Alta => Rgb::new(0.776, 0.937, 0.808),
        Priority::Media => Rgb::new(1.0, 0.953, 0.702),
        Priority::Bassa => Rgb::new(1.0, 0.780, 0.788),
    }
}

/// Document title, e.g. `IREX Prospect Germany – Hamburg`.
pub fn sheet_title(brand: &str, geography: &Geography) -> String {
    if geography.country.is_empty() {
        format!("{brand} Prospect {}", geography.area)
    } else {
        format!("{brand} Prospect {} – {}", geography.country, geography.area)
    }
}

/// A1 range where the value grid starts.
pub fn values_anchor() -> String {
    format!("{SHEET_TITLE}!A1")
}

/// Header row followed by one row per prospect.
pub fn value_rows(rows: &[ProspectRow]) -> Vec<Vec<String>> {
    std::iter::once(HEADERS.iter().map(|h| (*h).to_string()).collect())
        .chain(
            rows.iter()
                .map(|row| row.cells().iter().map(|c| (*c).to_string()).collect()),
        )
        .collect()
}

/// Public view link for a spreadsheet id.
pub fn spreadsheet_url(spreadsheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}")
}

/// Body of the `spreadsheets.create` call.
pub fn create_body(title: &str) -> Value {
    json!({
        "properties": { "title": title },
        "sheets": [{ "properties": { "title": SHEET_TITLE, "sheetId": SHEET_ID } }]
    })
}

/// Formatting requests for one `batchUpdate`, in application order.
pub fn format_requests(rows: &[ProspectRow]) -> Vec<Value> {
    let n_cols = COLUMN_COUNT;
    let n_rows = rows.len();
    let mut requests = Vec::with_capacity(rows.len() + COLUMN_COUNT + 4);

    requests.push(json!({
        "repeatCell": {
            "range": grid_range(0, 1, n_cols),
            "cell": {
                "userEnteredFormat": {
                    "backgroundColor": HEADER_BACKGROUND,
                    "textFormat": { "bold": true, "foregroundColor": HEADER_TEXT, "fontSize": 10 },
                    "horizontalAlignment": "CENTER",
                    "verticalAlignment": "MIDDLE",
                    "wrapStrategy": "WRAP"
                }
            },
            "fields": "userEnteredFormat(backgroundColor,textFormat,horizontalAlignment,verticalAlignment,wrapStrategy)"
        }
    }));

    for (idx, row) in rows.iter().enumerate() {
        let Some(tier) = row.priority_tier() else {
            continue;
        };
        requests.push(json!({
            "repeatCell": {
                "range": grid_range(idx + 1, idx + 2, n_cols),
                "cell": {
                    "userEnteredFormat": {
                        "backgroundColor": priority_color(tier),
                        "verticalAlignment": "TOP",
                        "wrapStrategy": "WRAP"
                    }
                },
                "fields": "userEnteredFormat(backgroundColor,verticalAlignment,wrapStrategy)"
            }
        }));
    }

    requests.push(json!({
        "updateSheetProperties": {
            "properties": { "sheetId": SHEET_ID, "gridProperties": { "frozenRowCount": 1 } },
            "fields": "gridProperties.frozenRowCount"
        }
    }));

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        requests.push(dimension_size("COLUMNS", col, col + 1, *width));
    }

    requests.push(dimension_size("ROWS", 1, n_rows + 1, DATA_ROW_HEIGHT));

    requests.push(json!({
        "setBasicFilter": {
            "filter": { "range": grid_range(0, n_rows + 1, n_cols) }
        }
    }));

    requests
}

fn grid_range(start_row: usize, end_row: usize, end_col: usize) -> Value {
    json!({
        "sheetId": SHEET_ID,
        "startRowIndex": start_row,
        "endRowIndex": end_row,
        "startColumnIndex": 0,
        "endColumnIndex": end_col
    })
}

fn dimension_size(dimension: &str, start: usize, end: usize, pixels: u32) -> Value {
    json!({
        "updateDimensionProperties": {
            "range": { "sheetId": SHEET_ID, "dimension": dimension, "startIndex": start, "endIndex": end },
            "properties": { "pixelSize": pixels },
            "fields": "pixelSize"
        }
    })
}
