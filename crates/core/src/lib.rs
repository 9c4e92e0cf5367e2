//! Core addressing and color types.
//!
//! The Sheets API is positional: zero-based indices, half-open on the end.
//! Users speak A1 notation, letter columns, and named or hex colors. This
//! crate is the translation layer between the two, and nothing else: no
//! I/O, no HTTP, no CLI concepts.

pub mod color;
pub mod grid;

pub use color::{hex_to_rgb, named_color, resolve_scale, ColorRgb};
pub use grid::{
    column_letter_to_index, column_range_bounds, index_to_column_letter, normalize_dimension_spec,
    parse_a1_range, row_range_bounds, CellRange, Dimension, DimensionRange,
};
