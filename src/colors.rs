//! Canvas palette.

// Colors in ARGB8888 format
pub const BACKGROUND: u32 = 0xFFFFFFFF;
pub const EDGE: u32 = 0xFF000000;
pub const MARKER: u32 = 0xFFFF0000;
pub const GRID: u32 = 0xFFDDDDDD;
