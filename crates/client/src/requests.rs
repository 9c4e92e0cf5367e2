//! batchUpdate request fragments.
//!
//! Pure builders: validated parameters plus a resolved sheet id in, one or
//! more JSON fragments out. Nothing here talks to the network, which is what
//! keeps every command's request shape unit-testable offline.

use serde_json::{json, Value};

use getsheet_core::{CellRange, ColorRgb, Dimension, DimensionRange};

/// Cell formatting options for a `repeatCell` request. Only populated
/// options are emitted, and the field mask lists exactly those paths.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub bold: bool,
    pub background: Option<ColorRgb>,
    pub foreground: Option<ColorRgb>,
    pub font_size: Option<i64>,
    /// Already uppercased (`LEFT`/`CENTER`/`RIGHT`).
    pub align: Option<String>,
    /// Already mapped to the API enum (`OVERFLOW_CELL`/`CLIP`/`WRAP`).
    pub wrap: Option<String>,
    pub font_family: Option<String>,
}

/// A boolean conditional-format condition. Exactly one per rule.
#[derive(Debug, Clone)]
pub enum Condition {
    GreaterThan(String),
    LessThan(String),
    EqualTo(String),
    /// Raw operands in declaration order, split from `"min:max"`.
    Between(String, String),
    /// Custom formula, e.g. `=A1>100`.
    Formula(String),
}

impl Condition {
    fn to_json(&self) -> Value {
        match self {
            Condition::GreaterThan(v) => json!({
                "type": "NUMBER_GREATER",
                "values": [{ "userEnteredValue": v }]
            }),
            Condition::LessThan(v) => json!({
                "type": "NUMBER_LESS",
                "values": [{ "userEnteredValue": v }]
            }),
            Condition::EqualTo(v) => json!({
                "type": "NUMBER_EQ",
                "values": [{ "userEnteredValue": v }]
            }),
            Condition::Between(low, high) => json!({
                "type": "NUMBER_BETWEEN",
                "values": [
                    { "userEnteredValue": low },
                    { "userEnteredValue": high }
                ]
            }),
            Condition::Formula(formula) => json!({
                "type": "CUSTOM_FORMULA",
                "values": [{ "userEnteredValue": formula }]
            }),
        }
    }
}

/// Positional grid range in the API's shape (zero-based, end-exclusive).
pub fn grid_range(sheet_id: i64, range: &CellRange) -> Value {
    json!({
        "sheetId": sheet_id,
        "startRowIndex": range.start_row,
        "endRowIndex": range.end_row,
        "startColumnIndex": range.start_col,
        "endColumnIndex": range.end_col,
    })
}

/// `repeatCell` formatting request. The field mask order is fixed
/// (bold, background, foreground, fontSize, alignment, wrap, fontFamily)
/// so output is reproducible.
pub fn repeat_cell_format(sheet_id: i64, range: &CellRange, opts: &FormatOptions) -> Value {
    let mut format = serde_json::Map::new();
    let mut text_format = serde_json::Map::new();
    let mut fields: Vec<&str> = Vec::new();

    if opts.bold {
        text_format.insert("bold".into(), json!(true));
        fields.push("userEnteredFormat.textFormat.bold");
    }
    if let Some(bg) = &opts.background {
        format.insert("backgroundColor".into(), json!(bg));
        fields.push("userEnteredFormat.backgroundColor");
    }
    if let Some(fg) = &opts.foreground {
        text_format.insert("foregroundColor".into(), json!(fg));
        fields.push("userEnteredFormat.textFormat.foregroundColor");
    }
    if let Some(size) = opts.font_size {
        text_format.insert("fontSize".into(), json!(size));
        fields.push("userEnteredFormat.textFormat.fontSize");
    }
    if let Some(align) = &opts.align {
        format.insert("horizontalAlignment".into(), json!(align));
        fields.push("userEnteredFormat.horizontalAlignment");
    }
    if let Some(wrap) = &opts.wrap {
        format.insert("wrapStrategy".into(), json!(wrap));
        fields.push("userEnteredFormat.wrapStrategy");
    }
    if let Some(font) = &opts.font_family {
        text_format.insert("fontFamily".into(), json!(font));
        fields.push("userEnteredFormat.textFormat.fontFamily");
    }

    if !text_format.is_empty() {
        format.insert("textFormat".into(), Value::Object(text_format));
    }

    json!({
        "repeatCell": {
            "range": grid_range(sheet_id, range),
            "cell": { "userEnteredFormat": format },
            "fields": fields.join(","),
        }
    })
}

/// Gradient conditional-format rule request, inserted at index 0 so new
/// rules always evaluate first.
///
/// `min`/`max` overrides pass through as raw strings (the API wants string
/// values); when both parse numerically the 3-color midpoint is their mean,
/// otherwise it falls back to the 50th percentile.
pub fn add_gradient_rule(
    sheet_id: i64,
    range: &CellRange,
    colors: &[ColorRgb],
    min: Option<&str>,
    max: Option<&str>,
) -> Value {
    let mut rule = serde_json::Map::new();

    let minpoint = match min {
        Some(value) => json!({ "color": colors[0], "type": "NUMBER", "value": value }),
        None => json!({ "color": colors[0], "type": "MIN" }),
    };
    rule.insert("minpoint".into(), minpoint);

    if colors.len() == 3 {
        let numeric_mid = min
            .and_then(|v| v.parse::<f64>().ok())
            .zip(max.and_then(|v| v.parse::<f64>().ok()))
            .map(|(low, high)| (low + high) / 2.0);

        let midpoint = match numeric_mid {
            Some(mid) => json!({
                "color": colors[1],
                "type": "NUMBER",
                "value": mid.to_string(),
            }),
            None => json!({ "color": colors[1], "type": "PERCENTILE", "value": "50" }),
        };
        rule.insert("midpoint".into(), midpoint);
    }

    let last = colors[colors.len() - 1];
    let maxpoint = match max {
        Some(value) => json!({ "color": last, "type": "NUMBER", "value": value }),
        None => json!({ "color": last, "type": "MAX" }),
    };
    rule.insert("maxpoint".into(), maxpoint);

    json!({
        "addConditionalFormatRule": {
            "rule": {
                "ranges": [grid_range(sheet_id, range)],
                "gradientRule": Value::Object(rule),
            },
            "index": 0,
        }
    })
}

/// Boolean conditional-format rule request, inserted at index 0.
pub fn add_boolean_rule(
    sheet_id: i64,
    range: &CellRange,
    condition: &Condition,
    background: Option<&ColorRgb>,
    bold: bool,
) -> Value {
    let mut format = serde_json::Map::new();
    if let Some(bg) = background {
        format.insert("backgroundColor".into(), json!(bg));
    }
    if bold {
        format.insert("textFormat".into(), json!({ "bold": true }));
    }

    json!({
        "addConditionalFormatRule": {
            "rule": {
                "ranges": [grid_range(sheet_id, range)],
                "booleanRule": {
                    "condition": condition.to_json(),
                    "format": format,
                }
            },
            "index": 0,
        }
    })
}

/// Drain all `count` conditional-format rules from a tab.
///
/// Every request targets index 0: each deletion shifts the remaining rules
/// down, so repeatedly deleting the head empties the list in one batch.
/// This ordering is load-bearing: indexing 0..count would skip every
/// other rule.
pub fn delete_conditional_format_rules(sheet_id: i64, count: usize) -> Vec<Value> {
    (0..count)
        .map(|_| {
            json!({
                "deleteConditionalFormatRule": {
                    "sheetId": sheet_id,
                    "index": 0,
                }
            })
        })
        .collect()
}

/// `addChart` request. The first column of the range is the domain, every
/// remaining column one series; the chart anchors one row below the data,
/// left-aligned with it.
pub fn add_chart(sheet_id: i64, range: &CellRange, chart_type: &str, title: &str) -> Value {
    let series: Vec<Value> = (range.start_col + 1..range.end_col)
        .map(|col| {
            json!({
                "series": {
                    "sourceRange": {
                        "sources": [{
                            "sheetId": sheet_id,
                            "startRowIndex": range.start_row,
                            "endRowIndex": range.end_row,
                            "startColumnIndex": col,
                            "endColumnIndex": col + 1,
                        }]
                    }
                }
            })
        })
        .collect();

    json!({
        "addChart": {
            "chart": {
                "spec": {
                    "title": title,
                    "basicChart": {
                        "chartType": chart_type,
                        "legendPosition": "BOTTOM_LEGEND",
                        "domains": [{
                            "domain": {
                                "sourceRange": {
                                    "sources": [{
                                        "sheetId": sheet_id,
                                        "startRowIndex": range.start_row,
                                        "endRowIndex": range.end_row,
                                        "startColumnIndex": range.start_col,
                                        "endColumnIndex": range.start_col + 1,
                                    }]
                                }
                            }
                        }],
                        "series": series,
                        "headerCount": 1,
                    }
                },
                "position": {
                    "overlayPosition": {
                        "anchorCell": {
                            "sheetId": sheet_id,
                            "rowIndex": range.end_row + 1,
                            "columnIndex": range.start_col,
                        }
                    }
                }
            }
        }
    })
}

fn dimension_range(sheet_id: i64, dimension: Dimension, bounds: DimensionRange) -> Value {
    json!({
        "sheetId": sheet_id,
        "dimension": dimension.as_str(),
        "startIndex": bounds.start,
        "endIndex": bounds.end,
    })
}

/// `deleteDimension` request for a row or column span.
pub fn delete_dimension(sheet_id: i64, dimension: Dimension, bounds: DimensionRange) -> Value {
    json!({
        "deleteDimension": {
            "range": dimension_range(sheet_id, dimension, bounds),
        }
    })
}

/// Resize rows or columns to a pixel size.
pub fn update_dimension_pixel_size(
    sheet_id: i64,
    dimension: Dimension,
    bounds: DimensionRange,
    pixels: i64,
) -> Value {
    json!({
        "updateDimensionProperties": {
            "range": dimension_range(sheet_id, dimension, bounds),
            "properties": { "pixelSize": pixels },
            "fields": "pixelSize",
        }
    })
}

/// Hide or unhide rows or columns.
pub fn update_dimension_hidden(
    sheet_id: i64,
    dimension: Dimension,
    bounds: DimensionRange,
    hidden: bool,
) -> Value {
    json!({
        "updateDimensionProperties": {
            "range": dimension_range(sheet_id, dimension, bounds),
            "properties": { "hiddenByUser": hidden },
            "fields": "hiddenByUser",
        }
    })
}

/// Freeze the first N rows and/or columns. Only supplied counts appear in
/// the field mask, preserving the other axis server-side.
pub fn update_frozen(sheet_id: i64, rows: Option<i64>, cols: Option<i64>) -> Value {
    let mut grid_properties = serde_json::Map::new();
    let mut fields: Vec<&str> = Vec::new();

    if let Some(rows) = rows {
        grid_properties.insert("frozenRowCount".into(), json!(rows));
        fields.push("gridProperties.frozenRowCount");
    }
    if let Some(cols) = cols {
        grid_properties.insert("frozenColumnCount".into(), json!(cols));
        fields.push("gridProperties.frozenColumnCount");
    }

    json!({
        "updateSheetProperties": {
            "properties": {
                "sheetId": sheet_id,
                "gridProperties": grid_properties,
            },
            "fields": fields.join(","),
        }
    })
}

/// Set a tab's color swatch.
pub fn update_tab_color(sheet_id: i64, color: &ColorRgb) -> Value {
    json!({
        "updateSheetProperties": {
            "properties": {
                "sheetId": sheet_id,
                "tabColor": color,
            },
            "fields": "tabColor",
        }
    })
}

/// Set a basic filter over a range.
pub fn set_basic_filter(sheet_id: i64, range: &CellRange) -> Value {
    json!({
        "setBasicFilter": {
            "filter": {
                "range": grid_range(sheet_id, range),
            }
        }
    })
}

/// Add a new tab by title.
pub fn add_sheet(title: &str) -> Value {
    json!({
        "addSheet": {
            "properties": {
                "title": title,
            }
        }
    })
}
