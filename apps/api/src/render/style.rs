//! Page geometry and the fixed paragraph style table.
//!
//! All measurements are PDF points (1/72 in). Page is US Letter.

use crate::render::font_metrics::Face;

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN_TOP: f32 = 36.0;
pub const MARGIN_BOTTOM: f32 = 36.0;
pub const MARGIN_LEFT: f32 = 54.0;
pub const MARGIN_RIGHT: f32 = 54.0;

/// Usable line width between the side margins.
pub const FRAME_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

/// Bullet glyph prefixed to every list item.
pub const BULLET_GLYPH: &str = "•";

/// 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to 0.0..=1.0 for the `rg` / `RG` operators.
    pub fn components(self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: Face,
    pub size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    pub color: Rgb,
    pub space_before: f32,
    pub space_after: f32,
    /// Indent of the text block from the left margin.
    pub left_indent: f32,
    /// Indent of the bullet glyph from the left margin.
    pub bullet_indent: f32,
}

const INK: Rgb = Rgb(0x11, 0x18, 0x27);

pub const BODY: TextStyle = TextStyle {
    face: Face::Regular,
    size: 10.5,
    leading: 13.0,
    color: Rgb(0x1f, 0x29, 0x37),
    space_before: 0.0,
    space_after: 4.0,
    left_indent: 0.0,
    bullet_indent: 0.0,
};

pub const NAME: TextStyle = TextStyle {
    face: Face::Bold,
    size: 18.0,
    leading: 20.0,
    color: INK,
    space_before: 0.0,
    space_after: 2.0,
    left_indent: 0.0,
    bullet_indent: 0.0,
};

pub const CONTACT: TextStyle = TextStyle {
    face: Face::Regular,
    size: 9.5,
    leading: 12.0,
    color: Rgb(0x4b, 0x55, 0x63),
    space_before: 0.0,
    space_after: 8.0,
    left_indent: 0.0,
    bullet_indent: 0.0,
};

pub const SECTION_HEADER: TextStyle = TextStyle {
    face: Face::Bold,
    size: 12.5,
    leading: 14.0,
    color: INK,
    space_before: 10.0,
    space_after: 4.0,
    left_indent: 0.0,
    bullet_indent: 0.0,
};

pub const BULLET: TextStyle = TextStyle {
    space_after: 2.0,
    left_indent: 16.0,
    bullet_indent: 8.0,
    ..BODY
};

pub const JOB_HEADER: TextStyle = TextStyle {
    face: Face::Bold,
    size: 11.0,
    leading: 13.0,
    color: INK,
    space_before: 4.0,
    space_after: 2.0,
    left_indent: 0.0,
    bullet_indent: 0.0,
};

pub const NOTE: TextStyle = TextStyle {
    face: Face::Oblique,
    size: 9.0,
    leading: 12.0,
    color: Rgb(0x6b, 0x72, 0x80),
    space_before: 8.0,
    space_after: 0.0,
    left_indent: 0.0,
    bullet_indent: 0.0,
};

/// Thin rule under the contact line.
pub const DIVIDER_THICKNESS: f32 = 0.6;
pub const DIVIDER_COLOR: Rgb = Rgb(0xe5, 0xe7, 0xeb);
/// Gap below the divider.
pub const DIVIDER_GAP: f32 = 6.0;
/// Gap after every rendered section.
pub const SECTION_GAP: f32 = 4.0;
