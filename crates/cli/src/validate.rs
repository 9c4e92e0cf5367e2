//! Per-command validators.
//!
//! Every command has one validator: a total function over the raw flag
//! values that returns the first failing check's message and never panics.
//! Validators run before any config read or network call, and their error
//! strings are part of the CLI contract; each includes a corrective hint
//! with the expected shape.
//!
//! The A1-range regex is deliberately uppercase-only while the column-letter
//! flags (`--cols`) accept lowercase; the asymmetry is inherited behavior
//! and kept as-is.

use regex::Regex;

pub type Validation = Result<(), String>;

fn is_hex_color(s: &str) -> bool {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap().is_match(s)
}

fn is_row_range(s: &str) -> bool {
    Regex::new(r"^\d+:\d+$").unwrap().is_match(s)
}

fn is_col_range(s: &str) -> bool {
    Regex::new(r"^[A-Za-z]+:[A-Za-z]+$").unwrap().is_match(s)
}

/// Single row or row range: `"3"` or `"2:5"`.
fn is_row_spec(s: &str) -> bool {
    Regex::new(r"^\d+(:\d+)?$").unwrap().is_match(s)
}

/// Single column or column range: `"A"` or `"A:C"`.
fn is_col_spec(s: &str) -> bool {
    Regex::new(r"^[A-Za-z]+(:[A-Za-z]+)?$").unwrap().is_match(s)
}

fn is_numeric_range(s: &str) -> bool {
    Regex::new(r"^-?\d+(\.\d+)?:-?\d+(\.\d+)?$").unwrap().is_match(s)
}

fn is_a1_range(s: &str) -> bool {
    Regex::new(r"^[A-Z]+\d+:[A-Z]+\d+$").unwrap().is_match(s)
}

fn is_positive_int(s: &str) -> bool {
    matches!(s.parse::<i64>(), Ok(n) if n > 0)
}

fn is_non_negative_int(s: &str) -> bool {
    matches!(s.parse::<i64>(), Ok(n) if n >= 0)
}

fn require_tab(tab: Option<&str>) -> Validation {
    if tab.is_none() {
        return Err("--tab is required. Provide tab name".into());
    }
    Ok(())
}

pub fn validate_init(credentials: Option<&str>, spreadsheet: Option<&str>) -> Validation {
    if credentials.is_none() {
        return Err(
            "--credentials is required (first-time setup). Provide path to Google service account JSON"
                .into(),
        );
    }
    if spreadsheet.is_none() {
        return Err("--spreadsheet is required. Provide Google Spreadsheet ID".into());
    }
    Ok(())
}

pub fn validate_write(tab: Option<&str>, data: Option<&serde_json::Value>) -> Validation {
    require_tab(tab)?;

    let Some(data) = data else {
        return Err("--data is required. Provide 2D array as JSON".into());
    };
    let Some(rows) = data.as_array() else {
        return Err(r#"--data must be a 2D array. Example: [["a","b"],["c","d"]]"#.into());
    };
    if rows.is_empty() {
        return Err("--data must not be empty".into());
    }
    if rows.iter().any(|row| !row.is_array()) {
        return Err("--data must be a 2D array. Each row must be an array".into());
    }
    Ok(())
}

pub fn validate_delete(tab: Option<&str>, rows: Option<&str>, cols: Option<&str>) -> Validation {
    require_tab(tab)?;

    if rows.is_none() && cols.is_none() {
        return Err("One of --rows or --cols is required".into());
    }
    if rows.is_some() && cols.is_some() {
        return Err("Only one of --rows or --cols can be specified".into());
    }
    if let Some(rows) = rows {
        if !is_row_range(rows) {
            return Err(r#"--rows must be in format "start:end", e.g. "2:5""#.into());
        }
    }
    if let Some(cols) = cols {
        if !is_col_range(cols) {
            return Err(r#"--cols must be in format "start:end", e.g. "B:C""#.into());
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn validate_format(
    tab: Option<&str>,
    range: Option<&str>,
    bold: bool,
    bg: Option<&str>,
    color: Option<&str>,
    fontsize: Option<&str>,
    align: Option<&str>,
    wrap: Option<&str>,
    font: Option<&str>,
) -> Validation {
    require_tab(tab)?;

    if range.is_none() {
        return Err("--range is required. e.g. A1:O1".into());
    }

    let has_format = bold
        || bg.is_some()
        || color.is_some()
        || fontsize.is_some()
        || align.is_some()
        || wrap.is_some()
        || font.is_some();
    if !has_format {
        return Err(
            "At least one format option required: --bold, --bg, --color, --fontsize, --align, --wrap, --font"
                .into(),
        );
    }

    if let Some(bg) = bg {
        if !is_hex_color(bg) {
            return Err(r##"--bg must be a hex color, e.g. "#4285f4""##.into());
        }
    }
    if let Some(color) = color {
        if !is_hex_color(color) {
            return Err(r##"--color must be a hex color, e.g. "#333333""##.into());
        }
    }
    if let Some(fontsize) = fontsize {
        if !is_positive_int(fontsize) {
            return Err("--fontsize must be a positive number, e.g. 14".into());
        }
    }
    if let Some(align) = align {
        if !["left", "center", "right"].contains(&align.to_lowercase().as_str()) {
            return Err("--align must be one of: left, center, right".into());
        }
    }
    if let Some(wrap) = wrap {
        if !["overflow", "clip", "wrap"].contains(&wrap.to_lowercase().as_str()) {
            return Err("--wrap must be one of: overflow, clip, wrap".into());
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn validate_condformat(
    tab: Option<&str>,
    range: Option<&str>,
    scale: Option<&str>,
    gt: Option<&str>,
    lt: Option<&str>,
    eq: Option<&str>,
    between: Option<&str>,
    formula: Option<&str>,
    bg: Option<&str>,
) -> Validation {
    require_tab(tab)?;

    if range.is_none() {
        return Err("--range is required. e.g. A1:N44".into());
    }

    let has_condition = gt.is_some() || lt.is_some() || eq.is_some() || between.is_some();

    if scale.is_none() && formula.is_none() && !has_condition {
        return Err(
            "Either --scale, --formula, or a condition (--gt, --lt, --eq, --between) is required"
                .into(),
        );
    }
    if scale.is_some() && has_condition {
        return Err("Cannot combine --scale with conditions (--gt, --lt, --eq, --between)".into());
    }
    if scale.is_some() && formula.is_some() {
        return Err("Cannot combine --scale with --formula".into());
    }
    if formula.is_some() && has_condition {
        return Err("Cannot combine --formula with conditions (--gt, --lt, --eq, --between)".into());
    }

    if let Some(scale) = scale {
        let parts = scale.split(':').count();
        if !(2..=3).contains(&parts) {
            return Err(
                r#"--scale must have 2 or 3 colors separated by ":", e.g. "red:green" or "red:yellow:green""#
                    .into(),
            );
        }
        if getsheet_core::resolve_scale(scale).is_none() {
            return Err(
                r##"--scale colors must be named (red, green, yellow, white, orange, blue) or hex, e.g. "#ff0000""##
                    .into(),
            );
        }
    }

    if (has_condition || formula.is_some()) && bg.is_none() {
        return Err(
            r##"--bg is required when using conditions or --formula. Provide background color, e.g. "#4caf50""##
                .into(),
        );
    }
    if let Some(bg) = bg {
        if !is_hex_color(bg) {
            return Err(r##"--bg must be a hex color, e.g. "#4caf50""##.into());
        }
    }
    if let Some(between) = between {
        if !is_numeric_range(between) {
            return Err(r#"--between must be in format "min:max", e.g. "8:10""#.into());
        }
    }
    Ok(())
}

pub fn validate_freeze(tab: Option<&str>, rows: Option<&str>, cols: Option<&str>) -> Validation {
    require_tab(tab)?;

    if rows.is_none() && cols.is_none() {
        return Err("At least one of --rows or --cols is required".into());
    }
    if let Some(rows) = rows {
        if !is_non_negative_int(rows) {
            return Err(r#"--rows must be a non-negative number, e.g. "1""#.into());
        }
    }
    if let Some(cols) = cols {
        if !is_non_negative_int(cols) {
            return Err(r#"--cols must be a non-negative number, e.g. "1""#.into());
        }
    }
    Ok(())
}

/// Shared by `hide` and `unhide`. Unlike `delete`, a bare single row or
/// column is accepted and later normalized to the range form.
pub fn validate_hide(tab: Option<&str>, rows: Option<&str>, cols: Option<&str>) -> Validation {
    require_tab(tab)?;

    if rows.is_none() && cols.is_none() {
        return Err("One of --rows or --cols is required".into());
    }
    if rows.is_some() && cols.is_some() {
        return Err("Only one of --rows or --cols can be specified".into());
    }
    if let Some(rows) = rows {
        if !is_row_spec(rows) {
            return Err(r#"--rows must be a row or range in format "start:end", e.g. "2:5""#.into());
        }
    }
    if let Some(cols) = cols {
        if !is_col_spec(cols) {
            return Err(r#"--cols must be a column or range in format "start:end", e.g. "B:C""#.into());
        }
    }
    Ok(())
}

pub fn validate_colwidth(tab: Option<&str>, cols: Option<&str>, width: Option<&str>) -> Validation {
    require_tab(tab)?;

    let Some(cols) = cols else {
        return Err(r#"--cols is required. e.g. "A" or "A:C""#.into());
    };
    if !is_col_spec(cols) {
        return Err(r#"--cols must be a single column (e.g. "A") or range (e.g. "A:C")"#.into());
    }

    let Some(width) = width else {
        return Err("--width is required. Provide pixel value, e.g. 150".into());
    };
    if !is_positive_int(width) {
        return Err("--width must be a positive number (pixels)".into());
    }
    Ok(())
}

pub fn validate_rowheight(tab: Option<&str>, rows: Option<&str>, height: Option<&str>) -> Validation {
    require_tab(tab)?;

    let Some(rows) = rows else {
        return Err(r#"--rows is required. e.g. "2" or "2:5""#.into());
    };
    if !is_row_spec(rows) {
        return Err(r#"--rows must be a single row (e.g. "2") or range (e.g. "2:5")"#.into());
    }

    let Some(height) = height else {
        return Err("--height is required. Provide pixel value, e.g. 30".into());
    };
    if !is_positive_int(height) {
        return Err("--height must be a positive number (pixels)".into());
    }
    Ok(())
}

pub fn validate_filter(tab: Option<&str>, range: Option<&str>) -> Validation {
    require_tab(tab)?;

    let Some(range) = range else {
        return Err("--range is required. e.g. A1:D100".into());
    };
    if !is_a1_range(range) {
        return Err(r#"--range must be in format "A1:D100""#.into());
    }
    Ok(())
}

pub fn validate_chart(tab: Option<&str>, range: Option<&str>, chart_type: Option<&str>) -> Validation {
    require_tab(tab)?;

    if range.is_none() {
        return Err("--range is required. e.g. A1:B10".into());
    }

    let chart_type = chart_type.unwrap_or("COLUMN").to_uppercase();
    let valid = ["BAR", "LINE", "PIE", "COLUMN", "AREA", "SCATTER"];
    if !valid.contains(&chart_type.as_str()) {
        return Err(format!("--type must be one of: {}", valid.join(", ")));
    }
    Ok(())
}

pub fn validate_clearcondformat(tab: Option<&str>) -> Validation {
    require_tab(tab)
}

pub fn validate_addtab(name: Option<&str>) -> Validation {
    if name.is_none() {
        return Err("--name is required. Provide a tab name".into());
    }
    Ok(())
}

pub fn validate_tabcolor(tab: Option<&str>, color: Option<&str>) -> Validation {
    require_tab(tab)?;

    let Some(color) = color else {
        return Err(r##"--color is required. Provide hex color, e.g. "#ff0000""##.into());
    };
    if !is_hex_color(color) {
        return Err(r##"--color must be a hex color, e.g. "#ff0000""##.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── init ────────────────────────────────────────────────────────

    #[test]
    fn init_requires_credentials_then_spreadsheet() {
        let err = validate_init(None, Some("sheet-id")).unwrap_err();
        assert!(err.contains("--credentials"));

        let err = validate_init(Some("/keys/sa.json"), None).unwrap_err();
        assert!(err.contains("--spreadsheet"));

        assert!(validate_init(Some("/keys/sa.json"), Some("sheet-id")).is_ok());
    }

    // ── write ───────────────────────────────────────────────────────

    #[test]
    fn write_requires_tab_and_data() {
        let data = json!([["a", "b"]]);
        assert_eq!(
            validate_write(None, Some(&data)).unwrap_err(),
            "--tab is required. Provide tab name"
        );
        assert_eq!(
            validate_write(Some("Sheet1"), None).unwrap_err(),
            "--data is required. Provide 2D array as JSON"
        );
    }

    #[test]
    fn write_rejects_non_2d_data() {
        let not_array = json!({"a": 1});
        assert_eq!(
            validate_write(Some("Sheet1"), Some(&not_array)).unwrap_err(),
            r#"--data must be a 2D array. Example: [["a","b"],["c","d"]]"#
        );

        let empty = json!([]);
        assert_eq!(
            validate_write(Some("Sheet1"), Some(&empty)).unwrap_err(),
            "--data must not be empty"
        );

        let ragged = json!([["a"], "b"]);
        assert_eq!(
            validate_write(Some("Sheet1"), Some(&ragged)).unwrap_err(),
            "--data must be a 2D array. Each row must be an array"
        );
    }

    #[test]
    fn write_accepts_2d_data() {
        let data = json!([["Name", "Score"], ["Alice", 95]]);
        assert!(validate_write(Some("Sheet1"), Some(&data)).is_ok());
    }

    // ── delete ──────────────────────────────────────────────────────

    #[test]
    fn delete_requires_exactly_one_dimension() {
        assert_eq!(
            validate_delete(Some("Sheet1"), None, None).unwrap_err(),
            "One of --rows or --cols is required"
        );
        assert_eq!(
            validate_delete(Some("Sheet1"), Some("2:5"), Some("B:C")).unwrap_err(),
            "Only one of --rows or --cols can be specified"
        );
    }

    #[test]
    fn delete_checks_range_formats() {
        assert_eq!(
            validate_delete(Some("Sheet1"), Some("abc"), None).unwrap_err(),
            r#"--rows must be in format "start:end", e.g. "2:5""#
        );
        assert_eq!(
            validate_delete(Some("Sheet1"), Some("A:B"), None).unwrap_err(),
            r#"--rows must be in format "start:end", e.g. "2:5""#
        );
        assert_eq!(
            validate_delete(Some("Sheet1"), None, Some("123")).unwrap_err(),
            r#"--cols must be in format "start:end", e.g. "B:C""#
        );
        assert_eq!(
            validate_delete(Some("Sheet1"), None, Some("1:3")).unwrap_err(),
            r#"--cols must be in format "start:end", e.g. "B:C""#
        );
    }

    #[test]
    fn delete_accepts_valid_specs() {
        assert!(validate_delete(Some("Sheet1"), Some("2:5"), None).is_ok());
        assert!(validate_delete(Some("Sheet1"), Some("3:3"), None).is_ok());
        assert!(validate_delete(Some("Sheet1"), None, Some("B:C")).is_ok());
        assert!(validate_delete(Some("Sheet1"), None, Some("A:A")).is_ok());
        // Lowercase column letters are accepted here.
        assert!(validate_delete(Some("Sheet1"), None, Some("b:d")).is_ok());
        // A bare single token is not: delete requires the range form.
        assert!(validate_delete(Some("Sheet1"), Some("3"), None).is_err());
    }

    // ── format ──────────────────────────────────────────────────────

    fn format_ok(bold: bool) -> Validation {
        validate_format(Some("Sheet1"), Some("A1:C10"), bold, None, None, None, None, None, None)
    }

    #[test]
    fn format_requires_tab_range_and_an_option() {
        assert_eq!(
            validate_format(None, Some("A1:C10"), true, None, None, None, None, None, None)
                .unwrap_err(),
            "--tab is required. Provide tab name"
        );
        assert_eq!(
            validate_format(Some("Sheet1"), None, true, None, None, None, None, None, None)
                .unwrap_err(),
            "--range is required. e.g. A1:O1"
        );
        assert_eq!(
            format_ok(false).unwrap_err(),
            "At least one format option required: --bold, --bg, --color, --fontsize, --align, --wrap, --font"
        );
        assert!(format_ok(true).is_ok());
    }

    #[test]
    fn format_checks_hex_colors() {
        let err = validate_format(
            Some("Sheet1"), Some("A1:C10"), false, Some("#xyz"), None, None, None, None, None,
        )
        .unwrap_err();
        assert_eq!(err, r##"--bg must be a hex color, e.g. "#4285f4""##);

        let err = validate_format(
            Some("Sheet1"), Some("A1:C10"), false, Some("#fff"), None, None, None, None, None,
        )
        .unwrap_err();
        assert_eq!(err, r##"--bg must be a hex color, e.g. "#4285f4""##);

        let err = validate_format(
            Some("Sheet1"), Some("A1:C10"), false, None, Some("nope"), None, None, None, None,
        )
        .unwrap_err();
        assert_eq!(err, r##"--color must be a hex color, e.g. "#333333""##);
    }

    #[test]
    fn format_checks_enums() {
        let err = validate_format(
            Some("Sheet1"), Some("A1:C10"), false, None, None, None, Some("middle"), None, None,
        )
        .unwrap_err();
        assert_eq!(err, "--align must be one of: left, center, right");

        let err = validate_format(
            Some("Sheet1"), Some("A1:C10"), false, None, None, None, None, Some("fold"), None,
        )
        .unwrap_err();
        assert_eq!(err, "--wrap must be one of: overflow, clip, wrap");

        // Case-normalized before comparison.
        assert!(validate_format(
            Some("Sheet1"), Some("A1:C10"), false, None, None, None, Some("Center"), Some("WRAP"), None,
        )
        .is_ok());
    }

    #[test]
    fn format_checks_fontsize() {
        let err = validate_format(
            Some("Sheet1"), Some("A1:C10"), false, None, None, Some("abc"), None, None, None,
        )
        .unwrap_err();
        assert_eq!(err, "--fontsize must be a positive number, e.g. 14");

        assert!(validate_format(
            Some("Sheet1"), Some("A1:C10"), false, None, None, Some("14"), None, None, None,
        )
        .is_ok());
    }

    #[test]
    fn format_font_alone_is_enough() {
        assert!(validate_format(
            Some("Sheet1"), Some("A1:C10"), false, None, None, None, None, None, Some("Arial"),
        )
        .is_ok());
    }

    // ── condformat ──────────────────────────────────────────────────

    fn condformat(
        scale: Option<&str>,
        gt: Option<&str>,
        between: Option<&str>,
        formula: Option<&str>,
        bg: Option<&str>,
    ) -> Validation {
        validate_condformat(
            Some("Sheet1"),
            Some("A1:B10"),
            scale,
            gt,
            None,
            None,
            between,
            formula,
            bg,
        )
    }

    #[test]
    fn condformat_requires_a_variant() {
        assert_eq!(
            condformat(None, None, None, None, None).unwrap_err(),
            "Either --scale, --formula, or a condition (--gt, --lt, --eq, --between) is required"
        );
    }

    #[test]
    fn condformat_variant_exclusivity() {
        assert_eq!(
            condformat(Some("red:green"), Some("5"), None, None, Some("#4caf50")).unwrap_err(),
            "Cannot combine --scale with conditions (--gt, --lt, --eq, --between)"
        );
        assert_eq!(
            condformat(Some("red:green"), None, None, Some("=A1>100"), Some("#4caf50")).unwrap_err(),
            "Cannot combine --scale with --formula"
        );
        assert_eq!(
            condformat(None, Some("5"), None, Some("=A1>100"), Some("#4caf50")).unwrap_err(),
            "Cannot combine --formula with conditions (--gt, --lt, --eq, --between)"
        );
        assert_eq!(
            condformat(None, None, Some("1:10"), Some("=A1>100"), Some("#4caf50")).unwrap_err(),
            "Cannot combine --formula with conditions (--gt, --lt, --eq, --between)"
        );
    }

    #[test]
    fn condformat_scale_color_count() {
        let err = condformat(Some("red"), None, None, None, None).unwrap_err();
        assert!(err.contains("2 or 3 colors"));

        let err = condformat(Some("red:yellow:green:blue"), None, None, None, None).unwrap_err();
        assert!(err.contains("2 or 3 colors"));

        assert!(condformat(Some("red:green"), None, None, None, None).is_ok());
        assert!(condformat(Some("red:yellow:green"), None, None, None, None).is_ok());
        assert!(condformat(Some("#ff0000:#ffff00:#00ff00"), None, None, None, None).is_ok());
    }

    #[test]
    fn condformat_scale_unresolvable_token() {
        let err = condformat(Some("red:bogus"), None, None, None, None).unwrap_err();
        assert!(err.contains("--scale colors"));
    }

    #[test]
    fn condformat_conditions_need_bg() {
        assert_eq!(
            condformat(None, Some("5"), None, None, None).unwrap_err(),
            r##"--bg is required when using conditions or --formula. Provide background color, e.g. "#4caf50""##
        );
        assert_eq!(
            condformat(None, None, None, Some("=A1>100"), None).unwrap_err(),
            r##"--bg is required when using conditions or --formula. Provide background color, e.g. "#4caf50""##
        );
        assert_eq!(
            condformat(None, Some("5"), None, None, Some("#xyz")).unwrap_err(),
            r##"--bg must be a hex color, e.g. "#4caf50""##
        );
    }

    #[test]
    fn condformat_between_format() {
        assert_eq!(
            condformat(None, None, Some("abc"), None, Some("#4caf50")).unwrap_err(),
            r#"--between must be in format "min:max", e.g. "8:10""#
        );
        assert!(condformat(None, None, Some("8:10"), None, Some("#c8e6c9")).is_ok());
        assert!(condformat(None, None, Some("-1.5:2.5"), None, Some("#c8e6c9")).is_ok());
    }

    #[test]
    fn condformat_valid_variants() {
        assert!(condformat(None, Some("100"), None, None, Some("#4caf50")).is_ok());
        assert!(condformat(None, None, None, Some("=A1>100"), Some("#4caf50")).is_ok());
    }

    // ── freeze ──────────────────────────────────────────────────────

    #[test]
    fn freeze_checks() {
        assert_eq!(
            validate_freeze(None, Some("1"), None).unwrap_err(),
            "--tab is required. Provide tab name"
        );
        assert_eq!(
            validate_freeze(Some("Sheet1"), None, None).unwrap_err(),
            "At least one of --rows or --cols is required"
        );
        assert!(validate_freeze(Some("Sheet1"), Some("abc"), None)
            .unwrap_err()
            .contains("non-negative number"));
        assert!(validate_freeze(Some("Sheet1"), Some("-1"), None)
            .unwrap_err()
            .contains("non-negative number"));
        assert!(validate_freeze(Some("Sheet1"), None, Some("xyz"))
            .unwrap_err()
            .contains("non-negative number"));
        assert!(validate_freeze(Some("Sheet1"), Some("1"), None).is_ok());
        assert!(validate_freeze(Some("Sheet1"), Some("0"), Some("2")).is_ok());
    }

    // ── hide / unhide ───────────────────────────────────────────────

    #[test]
    fn hide_requires_exactly_one_dimension() {
        assert!(validate_hide(None, Some("2:5"), None)
            .unwrap_err()
            .contains("--tab"));
        assert!(validate_hide(Some("Sheet1"), None, None)
            .unwrap_err()
            .contains("--rows"));
        assert!(validate_hide(Some("Sheet1"), Some("2:5"), Some("B:C"))
            .unwrap_err()
            .contains("Only one"));
    }

    #[test]
    fn hide_checks_formats() {
        assert!(validate_hide(Some("Sheet1"), Some("abc"), None)
            .unwrap_err()
            .contains("format"));
        assert!(validate_hide(Some("Sheet1"), None, Some("123"))
            .unwrap_err()
            .contains("format"));
    }

    #[test]
    fn hide_accepts_ranges_and_single_tokens() {
        assert!(validate_hide(Some("Sheet1"), Some("2:5"), None).is_ok());
        assert!(validate_hide(Some("Sheet1"), Some("3:3"), None).is_ok());
        assert!(validate_hide(Some("Sheet1"), Some("3"), None).is_ok());
        assert!(validate_hide(Some("Sheet1"), None, Some("B:C")).is_ok());
        assert!(validate_hide(Some("Sheet1"), None, Some("A:A")).is_ok());
        assert!(validate_hide(Some("Sheet1"), None, Some("A")).is_ok());
    }

    // ── colwidth / rowheight ────────────────────────────────────────

    #[test]
    fn colwidth_checks() {
        assert_eq!(
            validate_colwidth(None, Some("A"), Some("150")).unwrap_err(),
            "--tab is required. Provide tab name"
        );
        assert_eq!(
            validate_colwidth(Some("Sheet1"), None, Some("150")).unwrap_err(),
            r#"--cols is required. e.g. "A" or "A:C""#
        );
        assert_eq!(
            validate_colwidth(Some("Sheet1"), Some("123"), Some("150")).unwrap_err(),
            r#"--cols must be a single column (e.g. "A") or range (e.g. "A:C")"#
        );
        assert_eq!(
            validate_colwidth(Some("Sheet1"), Some("A1:C3"), Some("150")).unwrap_err(),
            r#"--cols must be a single column (e.g. "A") or range (e.g. "A:C")"#
        );
        assert_eq!(
            validate_colwidth(Some("Sheet1"), Some("A"), None).unwrap_err(),
            "--width is required. Provide pixel value, e.g. 150"
        );
        for bad in ["0", "-1", "abc"] {
            assert_eq!(
                validate_colwidth(Some("Sheet1"), Some("A"), Some(bad)).unwrap_err(),
                "--width must be a positive number (pixels)"
            );
        }
        assert!(validate_colwidth(Some("Sheet1"), Some("A"), Some("150")).is_ok());
        assert!(validate_colwidth(Some("Sheet1"), Some("A:C"), Some("200")).is_ok());
        assert!(validate_colwidth(Some("Sheet1"), Some("a"), Some("100")).is_ok());
        assert!(validate_colwidth(Some("Sheet1"), Some("a:c"), Some("100")).is_ok());
    }

    #[test]
    fn rowheight_checks() {
        assert_eq!(
            validate_rowheight(Some("Sheet1"), None, Some("30")).unwrap_err(),
            r#"--rows is required. e.g. "2" or "2:5""#
        );
        assert_eq!(
            validate_rowheight(Some("Sheet1"), Some("A:B"), Some("30")).unwrap_err(),
            r#"--rows must be a single row (e.g. "2") or range (e.g. "2:5")"#
        );
        assert_eq!(
            validate_rowheight(Some("Sheet1"), Some("2"), None).unwrap_err(),
            "--height is required. Provide pixel value, e.g. 30"
        );
        assert_eq!(
            validate_rowheight(Some("Sheet1"), Some("2"), Some("0")).unwrap_err(),
            "--height must be a positive number (pixels)"
        );
        assert!(validate_rowheight(Some("Sheet1"), Some("2"), Some("30")).is_ok());
        assert!(validate_rowheight(Some("Sheet1"), Some("2:5"), Some("42")).is_ok());
    }

    // ── filter ──────────────────────────────────────────────────────

    #[test]
    fn filter_checks() {
        assert_eq!(
            validate_filter(None, Some("A1:D100")).unwrap_err(),
            "--tab is required. Provide tab name"
        );
        assert_eq!(
            validate_filter(Some("Sheet1"), None).unwrap_err(),
            "--range is required. e.g. A1:D100"
        );
        for bad in ["abc", "A:D", "a1:d100"] {
            assert_eq!(
                validate_filter(Some("Sheet1"), Some(bad)).unwrap_err(),
                r#"--range must be in format "A1:D100""#
            );
        }
        assert!(validate_filter(Some("Sheet1"), Some("A1:D100")).is_ok());
        assert!(validate_filter(Some("Sheet1"), Some("A1:A50")).is_ok());
        assert!(validate_filter(Some("Sheet1"), Some("A1:Z999")).is_ok());
    }

    // ── chart ───────────────────────────────────────────────────────

    #[test]
    fn chart_checks() {
        assert!(validate_chart(None, Some("A1:B4"), None)
            .unwrap_err()
            .contains("--tab"));
        assert_eq!(
            validate_chart(Some("Sheet1"), None, None).unwrap_err(),
            "--range is required. e.g. A1:B10"
        );
        assert_eq!(
            validate_chart(Some("Sheet1"), Some("A1:B4"), Some("DONUT")).unwrap_err(),
            "--type must be one of: BAR, LINE, PIE, COLUMN, AREA, SCATTER"
        );
        // Default and case-normalized types pass.
        assert!(validate_chart(Some("Sheet1"), Some("A1:B4"), None).is_ok());
        assert!(validate_chart(Some("Sheet1"), Some("A1:B4"), Some("bar")).is_ok());
    }

    // ── addtab / tabcolor ───────────────────────────────────────────

    #[test]
    fn clearcondformat_requires_tab() {
        assert_eq!(
            validate_clearcondformat(None).unwrap_err(),
            "--tab is required. Provide tab name"
        );
        assert!(validate_clearcondformat(Some("Sheet1")).is_ok());
    }

    #[test]
    fn addtab_requires_name() {
        assert_eq!(
            validate_addtab(None).unwrap_err(),
            "--name is required. Provide a tab name"
        );
        assert!(validate_addtab(Some("Benchmarks")).is_ok());
    }

    #[test]
    fn tabcolor_checks() {
        assert_eq!(
            validate_tabcolor(Some("Sheet1"), None).unwrap_err(),
            r##"--color is required. Provide hex color, e.g. "#ff0000""##
        );
        assert_eq!(
            validate_tabcolor(Some("Sheet1"), Some("red")).unwrap_err(),
            r##"--color must be a hex color, e.g. "#ff0000""##
        );
        assert!(validate_tabcolor(Some("Sheet1"), Some("#ff0000")).is_ok());
    }

    // ── idempotence ─────────────────────────────────────────────────

    #[test]
    fn validators_are_idempotent() {
        let first = validate_delete(Some("Sheet1"), Some("2:5"), Some("B:C"));
        let second = validate_delete(Some("Sheet1"), Some("2:5"), Some("B:C"));
        assert_eq!(first, second);

        let first = condformat(Some("red:green"), None, None, None, None);
        let second = condformat(Some("red:green"), None, None, None, None);
        assert_eq!(first, second);
    }
}
