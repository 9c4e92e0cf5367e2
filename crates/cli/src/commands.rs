//! Command orchestration.
//!
//! Each function here runs after its validator has passed: it resolves tab
//! metadata when a numeric sheet id is needed, builds the request fragments,
//! submits them, and maps the response into the result envelope. Functions
//! take `&dyn SheetsApi` so tests drive them with a fake instead of the
//! network.
//!
//! There is no retry anywhere: a failed remote call surfaces verbatim,
//! prefixed with the operation name.

use std::path::Path;

use serde_json::{json, Value};

use getsheet_client::requests::{self, Condition, FormatOptions};
use getsheet_client::{ApiError, SheetsApi, TabMeta};
use getsheet_config::ConfigError;
use getsheet_core::{
    column_range_bounds, hex_to_rgb, normalize_dimension_spec, parse_a1_range, resolve_scale,
    row_range_bounds, Dimension, DimensionRange,
};

/// Error type for command execution. Everything converts to the
/// `{status:false, error}` envelope at the boundary; nothing propagates.
#[derive(Debug)]
pub enum CmdError {
    /// Bad CLI input, caught before any remote call
    Validation(String),
    /// Missing or unreadable configuration
    Config(ConfigError),
    /// Auth or client construction failure
    Auth(ApiError),
    /// Referenced tab has no metadata entry
    NotFound(String),
    /// Remote call failed; message prefixed with the operation name
    Remote { op: &'static str, source: ApiError },
}

impl std::fmt::Display for CmdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CmdError::Validation(msg) => write!(f, "{}", msg),
            CmdError::Config(err) => write!(f, "{}", err),
            CmdError::Auth(err) => write!(f, "{}", err),
            CmdError::NotFound(msg) => write!(f, "{}", msg),
            CmdError::Remote { op, source } => write!(f, "{} failed: {}", op, source),
        }
    }
}

impl std::error::Error for CmdError {}

impl From<ConfigError> for CmdError {
    fn from(err: ConfigError) -> Self {
        CmdError::Config(err)
    }
}

/// Resolve a tab title to its metadata. Always a fresh fetch: sheet ids
/// are never guessed or cached across commands.
fn resolve_tab(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    with_rules: bool,
    op: &'static str,
) -> Result<TabMeta, CmdError> {
    let tabs = api
        .list_tabs(spreadsheet, with_rules)
        .map_err(|source| CmdError::Remote { op, source })?;

    tabs.into_iter()
        .find(|meta| meta.title == tab)
        .ok_or_else(|| CmdError::NotFound(format!("Tab \"{}\" not found", tab)))
}

/// Compose the `Tab!A1:C10` form the values endpoints expect.
fn sheet_range(tab: Option<&str>, range: Option<&str>) -> String {
    let tab = tab.unwrap_or("Sheet1");
    match range {
        Some(range) => format!("{}!{}", tab, range),
        None => tab.to_string(),
    }
}

/// Merge update statistics into a `{status:true}` envelope, skipping
/// fields the API did not report.
fn summary_envelope(summary: getsheet_client::UpdateSummary) -> Value {
    let mut envelope = json!({ "status": true });
    if let Value::Object(fields) = serde_json::to_value(&summary).unwrap_or_else(|_| json!({})) {
        if let Some(envelope) = envelope.as_object_mut() {
            envelope.extend(fields);
        }
    }
    envelope
}

// ── Values ──────────────────────────────────────────────────────────

pub fn read(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: Option<&str>,
    range: Option<&str>,
) -> Result<Value, CmdError> {
    let target = sheet_range(tab, range);
    let data = api
        .get_values(spreadsheet, &target)
        .map_err(|source| CmdError::Remote { op: "Read", source })?;

    Ok(json!({
        "status": true,
        "range": data.range,
        "rows": data.values.len(),
        "data": data.values,
    }))
}

pub fn write(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    range: Option<&str>,
    data: &Value,
) -> Result<Value, CmdError> {
    let target = sheet_range(Some(tab), range);
    let rows = as_rows(data);
    let summary = api
        .update_values(spreadsheet, &target, &rows)
        .map_err(|source| CmdError::Remote { op: "Write", source })?;

    Ok(summary_envelope(summary))
}

pub fn append(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    data: &Value,
) -> Result<Value, CmdError> {
    let rows = as_rows(data);
    let summary = api
        .append_values(spreadsheet, tab, &rows)
        .map_err(|source| CmdError::Remote { op: "Append", source })?;

    Ok(summary_envelope(summary))
}

pub fn clear(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: Option<&str>,
    range: Option<&str>,
) -> Result<Value, CmdError> {
    let target = sheet_range(tab, range);
    api.clear_values(spreadsheet, &target)
        .map_err(|source| CmdError::Remote { op: "Clear", source })?;

    Ok(json!({
        "status": true,
        "clearedRange": target,
    }))
}

/// The validator has already guaranteed a 2-D array shape.
fn as_rows(data: &Value) -> Vec<Vec<Value>> {
    data.as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| row.as_array().cloned().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

// ── Tabs ────────────────────────────────────────────────────────────

pub fn tabs(api: &dyn SheetsApi, spreadsheet: &str) -> Result<Value, CmdError> {
    let tabs = api
        .list_tabs(spreadsheet, false)
        .map_err(|source| CmdError::Remote { op: "Tabs", source })?;

    Ok(json!({
        "status": true,
        "total": tabs.len(),
        "tabs": tabs,
    }))
}

pub fn addtab(api: &dyn SheetsApi, spreadsheet: &str, name: &str) -> Result<Value, CmdError> {
    api.batch_update(spreadsheet, vec![requests::add_sheet(name)])
        .map_err(|source| CmdError::Remote { op: "Add tab", source })?;

    Ok(json!({
        "status": true,
        "message": format!("Tab \"{}\" created", name),
        "name": name,
    }))
}

pub fn tabcolor(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    color: &str,
) -> Result<Value, CmdError> {
    let meta = resolve_tab(api, spreadsheet, tab, false, "Tab color")?;
    let rgb = hex_to_rgb(color)
        .ok_or_else(|| CmdError::Validation(r##"--color must be a hex color, e.g. "#ff0000""##.into()))?;

    api.batch_update(spreadsheet, vec![requests::update_tab_color(meta.sheet_id, &rgb)])
        .map_err(|source| CmdError::Remote { op: "Tab color", source })?;

    Ok(json!({
        "status": true,
        "message": format!("Set tab color of \"{}\" to {}", tab, color),
        "tab": tab,
        "color": color,
    }))
}

// ── Formatting ──────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn format(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    range: &str,
    bold: bool,
    bg: Option<&str>,
    color: Option<&str>,
    fontsize: Option<&str>,
    align: Option<&str>,
    wrap: Option<&str>,
    font: Option<&str>,
) -> Result<Value, CmdError> {
    let meta = resolve_tab(api, spreadsheet, tab, false, "Format")?;
    let cell_range = parse_a1_range(range);

    let opts = FormatOptions {
        bold,
        background: bg.and_then(hex_to_rgb),
        foreground: color.and_then(hex_to_rgb),
        font_size: fontsize.and_then(|s| s.parse().ok()),
        align: align.map(|a| a.to_uppercase()),
        wrap: wrap.map(wrap_strategy),
        font_family: font.map(str::to_string),
    };

    api.batch_update(
        spreadsheet,
        vec![requests::repeat_cell_format(meta.sheet_id, &cell_range, &opts)],
    )
    .map_err(|source| CmdError::Remote { op: "Format", source })?;

    let mut applied: Vec<String> = Vec::new();
    if bold {
        applied.push("bold".into());
    }
    if let Some(bg) = bg {
        applied.push(format!("bg:{}", bg));
    }
    if let Some(color) = color {
        applied.push(format!("color:{}", color));
    }
    if let Some(fontsize) = fontsize {
        applied.push(format!("fontsize:{}", fontsize));
    }
    if let Some(align) = align {
        applied.push(format!("align:{}", align));
    }
    if let Some(wrap) = wrap {
        applied.push(format!("wrap:{}", wrap));
    }
    if let Some(font) = font {
        applied.push(format!("font:{}", font));
    }

    Ok(json!({
        "status": true,
        "message": format!("Formatted {}!{} with {}", tab, range, applied.join(", ")),
        "tab": tab,
        "range": range,
        "formats": applied,
    }))
}

fn wrap_strategy(wrap: &str) -> String {
    match wrap.to_lowercase().as_str() {
        "overflow" => "OVERFLOW_CELL".into(),
        "clip" => "CLIP".into(),
        _ => "WRAP".into(),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn condformat(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    range: &str,
    scale: Option<&str>,
    min: Option<&str>,
    max: Option<&str>,
    gt: Option<&str>,
    lt: Option<&str>,
    eq: Option<&str>,
    between: Option<&str>,
    formula: Option<&str>,
    bg: Option<&str>,
    bold: bool,
) -> Result<Value, CmdError> {
    let meta = resolve_tab(api, spreadsheet, tab, false, "Conditional format")?;
    let cell_range = parse_a1_range(range);

    let request = if let Some(scale) = scale {
        let colors = resolve_scale(scale).ok_or_else(|| {
            CmdError::Validation(
                r##"--scale colors must be named (red, green, yellow, white, orange, blue) or hex, e.g. "#ff0000""##
                    .into(),
            )
        })?;
        requests::add_gradient_rule(meta.sheet_id, &cell_range, &colors, min, max)
    } else {
        // First matching condition wins; the validator has already ruled
        // out the ambiguous combinations.
        let condition = if let Some(gt) = gt {
            Condition::GreaterThan(gt.into())
        } else if let Some(lt) = lt {
            Condition::LessThan(lt.into())
        } else if let Some(eq) = eq {
            Condition::EqualTo(eq.into())
        } else if let Some(between) = between {
            let (low, high) = between.split_once(':').unwrap_or((between, ""));
            Condition::Between(low.into(), high.into())
        } else if let Some(formula) = formula {
            Condition::Formula(formula.into())
        } else {
            return Err(CmdError::Validation(
                "Either --scale, --formula, or a condition (--gt, --lt, --eq, --between) is required"
                    .into(),
            ));
        };

        let background = bg.and_then(hex_to_rgb);
        requests::add_boolean_rule(meta.sheet_id, &cell_range, &condition, background.as_ref(), bold)
    };

    api.batch_update(spreadsheet, vec![request])
        .map_err(|source| CmdError::Remote { op: "Conditional format", source })?;

    let (message, rule_type) = match scale {
        Some(scale) => (format!("Added color scale ({}) to {}!{}", scale, tab, range), "gradient"),
        None => (format!("Added conditional rule to {}!{}", tab, range), "boolean"),
    };

    Ok(json!({
        "status": true,
        "message": message,
        "tab": tab,
        "range": range,
        "ruleType": rule_type,
    }))
}

pub fn clearcondformat(api: &dyn SheetsApi, spreadsheet: &str, tab: &str) -> Result<Value, CmdError> {
    let meta = resolve_tab(api, spreadsheet, tab, true, "Clear conditional format")?;
    let count = meta.conditional_format_count;

    if count > 0 {
        // Each deletion shifts the remaining rules down, so the drain
        // targets index 0 every time.
        api.batch_update(
            spreadsheet,
            requests::delete_conditional_format_rules(meta.sheet_id, count),
        )
        .map_err(|source| CmdError::Remote { op: "Clear conditional format", source })?;
    }

    Ok(json!({
        "status": true,
        "message": format!("Cleared {} conditional format rule(s) from \"{}\"", count, tab),
        "tab": tab,
        "rulesCleared": count,
    }))
}

// ── Layout ──────────────────────────────────────────────────────────

pub fn freeze(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    rows: Option<&str>,
    cols: Option<&str>,
) -> Result<Value, CmdError> {
    let meta = resolve_tab(api, spreadsheet, tab, false, "Freeze")?;
    let rows: Option<i64> = rows.and_then(|r| r.parse().ok());
    let cols: Option<i64> = cols.and_then(|c| c.parse().ok());

    api.batch_update(spreadsheet, vec![requests::update_frozen(meta.sheet_id, rows, cols)])
        .map_err(|source| CmdError::Remote { op: "Freeze", source })?;

    let mut parts = Vec::new();
    if let Some(rows) = rows {
        parts.push(format!("{} row(s)", rows));
    }
    if let Some(cols) = cols {
        parts.push(format!("{} column(s)", cols));
    }

    Ok(json!({
        "status": true,
        "message": format!("Froze {} in \"{}\"", parts.join(" and "), tab),
        "tab": tab,
        "frozenRows": rows,
        "frozenCols": cols,
    }))
}

pub fn filter(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    range: &str,
) -> Result<Value, CmdError> {
    let meta = resolve_tab(api, spreadsheet, tab, false, "Filter")?;
    let cell_range = parse_a1_range(range);

    api.batch_update(spreadsheet, vec![requests::set_basic_filter(meta.sheet_id, &cell_range)])
        .map_err(|source| CmdError::Remote { op: "Filter", source })?;

    Ok(json!({
        "status": true,
        "message": format!("Filter applied to {}!{}", tab, range),
        "tab": tab,
        "range": range,
    }))
}

pub fn delete(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    rows: Option<&str>,
    cols: Option<&str>,
) -> Result<Value, CmdError> {
    let meta = resolve_tab(api, spreadsheet, tab, false, "Delete")?;
    let (dimension, bounds, label) = dimension_bounds(rows, cols, false)?;

    api.batch_update(
        spreadsheet,
        vec![requests::delete_dimension(meta.sheet_id, dimension, bounds)],
    )
    .map_err(|source| CmdError::Remote { op: "Delete", source })?;

    Ok(json!({
        "status": true,
        "message": format!("Deleted {} from \"{}\"", label, tab),
        "tab": tab,
        "dimension": dimension.as_str(),
        "startIndex": bounds.start,
        "endIndex": bounds.end,
    }))
}

pub fn colwidth(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    cols: &str,
    width: &str,
) -> Result<Value, CmdError> {
    let meta = resolve_tab(api, spreadsheet, tab, false, "Column width")?;
    let spec = normalize_dimension_spec(cols);
    let bounds = column_range_bounds(&spec).ok_or_else(|| {
        CmdError::Validation(r#"--cols must be a single column (e.g. "A") or range (e.g. "A:C")"#.into())
    })?;
    let pixels: i64 = width
        .parse()
        .map_err(|_| CmdError::Validation("--width must be a positive number (pixels)".into()))?;

    api.batch_update(
        spreadsheet,
        vec![requests::update_dimension_pixel_size(
            meta.sheet_id,
            Dimension::Columns,
            bounds,
            pixels,
        )],
    )
    .map_err(|source| CmdError::Remote { op: "Column width", source })?;

    Ok(json!({
        "status": true,
        "message": format!("Set width of columns {} to {}px in \"{}\"", cols, pixels, tab),
        "tab": tab,
        "cols": cols,
        "width": pixels,
    }))
}

pub fn rowheight(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    rows: &str,
    height: &str,
) -> Result<Value, CmdError> {
    let meta = resolve_tab(api, spreadsheet, tab, false, "Row height")?;
    let spec = normalize_dimension_spec(rows);
    let bounds = row_range_bounds(&spec).ok_or_else(|| {
        CmdError::Validation(r#"--rows must be a single row (e.g. "2") or range (e.g. "2:5")"#.into())
    })?;
    let pixels: i64 = height
        .parse()
        .map_err(|_| CmdError::Validation("--height must be a positive number (pixels)".into()))?;

    api.batch_update(
        spreadsheet,
        vec![requests::update_dimension_pixel_size(
            meta.sheet_id,
            Dimension::Rows,
            bounds,
            pixels,
        )],
    )
    .map_err(|source| CmdError::Remote { op: "Row height", source })?;

    Ok(json!({
        "status": true,
        "message": format!("Set height of rows {} to {}px in \"{}\"", rows, pixels, tab),
        "tab": tab,
        "rows": rows,
        "height": pixels,
    }))
}

pub fn set_hidden(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    rows: Option<&str>,
    cols: Option<&str>,
    hidden: bool,
) -> Result<Value, CmdError> {
    let op: &'static str = if hidden { "Hide" } else { "Unhide" };
    let meta = resolve_tab(api, spreadsheet, tab, false, op)?;
    let (dimension, bounds, label) = dimension_bounds(rows, cols, true)?;

    api.batch_update(
        spreadsheet,
        vec![requests::update_dimension_hidden(meta.sheet_id, dimension, bounds, hidden)],
    )
    .map_err(|source| CmdError::Remote { op, source })?;

    let verb = if hidden { "Hid" } else { "Unhid" };
    Ok(json!({
        "status": true,
        "message": format!("{} {} in \"{}\"", verb, label, tab),
        "tab": tab,
        "dimension": dimension.as_str(),
        "startIndex": bounds.start,
        "endIndex": bounds.end,
    }))
}

/// Convert the mutually-exclusive `rows`/`cols` pair into dimension bounds.
/// `normalize` additionally accepts the bare single-token form.
fn dimension_bounds(
    rows: Option<&str>,
    cols: Option<&str>,
    normalize: bool,
) -> Result<(Dimension, DimensionRange, String), CmdError> {
    if let Some(rows) = rows {
        let spec = if normalize { normalize_dimension_spec(rows) } else { rows.to_string() };
        let bounds = row_range_bounds(&spec).ok_or_else(|| {
            CmdError::Validation(r#"--rows must be in format "start:end", e.g. "2:5""#.into())
        })?;
        return Ok((Dimension::Rows, bounds, format!("rows {}", rows)));
    }

    let cols = cols.ok_or_else(|| {
        CmdError::Validation("One of --rows or --cols is required".into())
    })?;
    let spec = if normalize { normalize_dimension_spec(cols) } else { cols.to_string() };
    let bounds = column_range_bounds(&spec).ok_or_else(|| {
        CmdError::Validation(r#"--cols must be in format "start:end", e.g. "B:C""#.into())
    })?;
    Ok((Dimension::Columns, bounds, format!("columns {}", cols)))
}

// ── Charts ──────────────────────────────────────────────────────────

pub fn chart(
    api: &dyn SheetsApi,
    spreadsheet: &str,
    tab: &str,
    range: &str,
    chart_type: Option<&str>,
    title: Option<&str>,
) -> Result<Value, CmdError> {
    let chart_type = chart_type.unwrap_or("COLUMN").to_uppercase();
    let meta = resolve_tab(api, spreadsheet, tab, false, "Chart")?;
    let cell_range = parse_a1_range(range);

    api.batch_update(
        spreadsheet,
        vec![requests::add_chart(
            meta.sheet_id,
            &cell_range,
            &chart_type,
            title.unwrap_or(""),
        )],
    )
    .map_err(|source| CmdError::Remote { op: "Chart", source })?;

    Ok(json!({
        "status": true,
        "message": format!("{} chart created from {}!{}", chart_type, tab, range),
        "chartType": chart_type,
        "dataRange": format!("{}!{}", tab, range),
        "title": title.unwrap_or("(untitled)"),
    }))
}

// ── Local-only commands ─────────────────────────────────────────────

pub fn init(
    credentials: Option<&str>,
    spreadsheet: Option<&str>,
    cwd: &Path,
) -> Result<Value, CmdError> {
    let existing = getsheet_config::load_global();
    let cred_path = credentials
        .map(str::to_string)
        .or_else(|| existing.map(|g| g.credentials));

    crate::validate::validate_init(cred_path.as_deref(), spreadsheet)
        .map_err(CmdError::Validation)?;
    let cred_path = cred_path.unwrap_or_default();
    let spreadsheet = spreadsheet.unwrap_or_default();

    let cred_json = read_credentials(&cred_path)?;
    let client_email = cred_json["client_email"].as_str().ok_or_else(|| {
        CmdError::Validation("Credentials file missing \"client_email\" field".into())
    })?;

    // The global pointer is only (re)written when --credentials was passed
    // explicitly; otherwise the existing one stays untouched.
    if credentials.is_some() {
        getsheet_config::save_global(&getsheet_config::GlobalConfig {
            credentials: cred_path.clone(),
        })?;
    }

    getsheet_config::save_local(cwd, &getsheet_config::LocalConfig::new(spreadsheet))?;

    Ok(json!({
        "status": true,
        "message": format!("Initialized. Share your spreadsheet with: {}", client_email),
        "clientEmail": client_email,
        "spreadsheet": spreadsheet,
    }))
}

pub fn info(cwd: &Path) -> Result<Value, CmdError> {
    let global = getsheet_config::load_global().ok_or(ConfigError::NotInitialized)?;
    let cred_json = read_credentials(&global.credentials)?;

    let client_email = cred_json["client_email"].as_str().unwrap_or_default().to_string();
    let project_id = cred_json["project_id"].as_str().map(str::to_string);
    let local = getsheet_config::load_local(cwd);

    Ok(json!({
        "status": true,
        "clientEmail": client_email,
        "projectId": project_id,
        "spreadsheet": local.map(|l| l.spreadsheet),
        "shareInstructions": format!("Share your Google Sheet with: {} (Editor role)", client_email),
    }))
}

fn read_credentials(path: &str) -> Result<Value, CmdError> {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| serde_json::from_str(&contents).ok())
        .ok_or_else(|| {
            CmdError::Validation(format!("Could not read credentials file: {}", path))
        })
}
