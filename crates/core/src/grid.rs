// A1 addressing: letter columns, 1-based rows on the user side;
// zero-based half-open indices on the API side.

/// Zero-based, end-exclusive cell rectangle.
///
/// Built from A1 notation like `"A1:C10"`. The second coordinate of the
/// input is inclusive, so only the start row needs the `-1` shift; the
/// user's end row is already "one past" when read as an exclusive bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start_col: i64,
    pub start_row: i64,
    pub end_col: i64,
    pub end_row: i64,
}

/// Half-open index range along a single dimension (rows or columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionRange {
    pub start: i64,
    pub end: i64,
}

/// Which axis a dimension operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Rows,
    Columns,
}

impl Dimension {
    /// Wire name expected by the Sheets API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Rows => "ROWS",
            Dimension::Columns => "COLUMNS",
        }
    }
}

/// Convert column letters to a zero-based index (A -> 0, Z -> 25, AA -> 26).
///
/// Letters form a base-26 numeral with digits A=1..Z=26 and no zero digit.
/// Case-insensitive; callers validate the shape.
pub fn column_letter_to_index(letters: &str) -> i64 {
    let mut acc: i64 = 0;
    for c in letters.chars() {
        acc = acc * 26 + (c.to_ascii_uppercase() as i64 - 'A' as i64 + 1);
    }
    acc - 1
}

/// Convert a zero-based index back to column letters (0 -> A, 26 -> AA).
pub fn index_to_column_letter(index: i64) -> String {
    let mut result = String::new();
    let mut n = index;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Parse an `"A1:C10"` range into a [`CellRange`].
///
/// Anything that does not match `^[A-Z]+\d+:[A-Z]+\d+$` (uppercase only)
/// degrades to the degenerate `{0,0,1,1}` sentinel instead of failing.
/// Callers must not read the sentinel as "cell A1"; commands that parse
/// ranges regex-validate them first, so a well-formed command never sees it.
pub fn parse_a1_range(range: &str) -> CellRange {
    parse_a1_range_strict(range).unwrap_or(CellRange {
        start_col: 0,
        start_row: 0,
        end_col: 1,
        end_row: 1,
    })
}

fn parse_a1_range_strict(range: &str) -> Option<CellRange> {
    let (start, end) = range.split_once(':')?;
    let (start_letters, start_row) = split_cell(start)?;
    let (end_letters, end_row) = split_cell(end)?;

    Some(CellRange {
        start_col: column_letter_to_index(start_letters),
        start_row: start_row - 1,
        end_col: column_letter_to_index(end_letters) + 1,
        end_row,
    })
}

/// Split `"C10"` into `("C", 10)`. Letters must be uppercase A-Z, the rest
/// decimal digits; anything else is a non-match.
fn split_cell(cell: &str) -> Option<(&str, i64)> {
    let digits_at = cell.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell.split_at(digits_at);

    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some((letters, digits.parse().ok()?))
}

/// Row spec `"2:5"` (1-based, inclusive) to half-open indices `{1, 5}`.
pub fn row_range_bounds(spec: &str) -> Option<DimensionRange> {
    let (start, end) = spec.split_once(':')?;
    let start: i64 = start.parse().ok()?;
    let end: i64 = end.parse().ok()?;

    Some(DimensionRange {
        start: start - 1,
        end,
    })
}

/// Column spec `"B:C"` to half-open indices `{1, 3}`. Case-insensitive.
pub fn column_range_bounds(spec: &str) -> Option<DimensionRange> {
    let (start, end) = spec.split_once(':')?;
    if start.is_empty() || end.is_empty() {
        return None;
    }
    if !start.chars().chain(end.chars()).all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some(DimensionRange {
        start: column_letter_to_index(start),
        end: column_letter_to_index(end) + 1,
    })
}

/// Normalize a bare single token (`"A"`, `"3"`) to the range form
/// (`"A:A"`, `"3:3"`) so single and range specs share one conversion path.
pub fn normalize_dimension_spec(spec: &str) -> String {
    if spec.contains(':') {
        spec.to_string()
    } else {
        format!("{}:{}", spec, spec)
    }
}
