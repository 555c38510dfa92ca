//! Mathematical utilities for layout and naming

/// Integer division, square roots and pixel conversions
pub mod integer;
