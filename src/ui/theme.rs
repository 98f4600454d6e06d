use ratatui::style::Color;

use crate::plan::model::PedagogicalType;
use crate::timeline::dimension::CategoryKey;

/// Fill glyphs. Solid categories use a full block, secondary ones a
/// hatch so they stay readable without colour.
pub const SOLID_GLYPH: char = '█';
pub const HATCH_GLYPH: char = '▒';
pub const ESTIMATED_GLYPH: char = '░';
pub const MISSING_GLYPH: char = '┄';
pub const OVERFLOW_GLYPH: char = '▶';

/// Pedagogy colours, in `PedagogicalType::KNOWN` order.
const PEDAGOGY_HEX: [&str; 7] = [
    "#f1f3f4", "#4285F4", "#EA4335", "#FBBC05", "#34A853", "#A142F4", "#FA7B17",
];
const NEUTRAL_HEX: &str = "#cccccc";

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub selection_border: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub ruler: Color,
    pub track_target: Color,
    pub track_estimated: Color,
    pub track_designed: Color,
    pub track_overflow: Color,
    pub track_missing: Color,
    pub detail_solid: Color,
    pub detail_secondary: Color,
    pub bar_primary: Color,
    pub bar_secondary: Color,
    pub bar_background: Color,
    pub pedagogy: [Color; 7],
    pub neutral: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str) -> Self {
        match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        }
    }

    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::mono(),
            _ => Self::dark(),
        }
    }

    /// Colour for a pedagogical type; unknown types get the neutral colour.
    pub fn pedagogy_color(&self, ty: &PedagogicalType) -> Color {
        PedagogicalType::KNOWN
            .iter()
            .position(|known| known == ty)
            .map(|idx| self.pedagogy[idx])
            .unwrap_or(self.neutral)
    }

    /// Colour of a sub-track segment or chart bucket.
    pub fn category_color(&self, key: &CategoryKey) -> Color {
        match key {
            CategoryKey::Pedagogy(ty) => self.pedagogy_color(ty),
            key if key.is_primary() => self.detail_solid,
            _ => self.detail_secondary,
        }
    }

    fn pedagogy_palette() -> [Color; 7] {
        PEDAGOGY_HEX.map(|hex| parse_hex_color(hex).unwrap_or(Color::Gray))
    }

    fn neutral_color() -> Color {
        parse_hex_color(NEUTRAL_HEX).unwrap_or(Color::Gray)
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Rgb(66, 133, 244),
            header_accent_fg: Color::Black,
            selection_border: Color::White,
            status_ok: Color::Green,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            ruler: Color::Gray,
            track_target: Color::Rgb(148, 163, 184),
            track_estimated: Color::Rgb(100, 116, 139),
            track_designed: Color::Rgb(103, 232, 249),
            track_overflow: Color::Rgb(239, 68, 68),
            track_missing: Color::Rgb(249, 115, 22),
            detail_solid: Color::Rgb(203, 213, 225),
            detail_secondary: Color::Rgb(100, 116, 139),
            bar_primary: Color::Rgb(203, 213, 225),
            bar_secondary: Color::Rgb(100, 116, 139),
            bar_background: Color::Rgb(35, 40, 51),
            pedagogy: Self::pedagogy_palette(),
            neutral: Self::neutral_color(),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            selection_border: Color::Rgb(200, 100, 0),
            status_ok: Color::Rgb(0, 120, 0),
            status_err: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Rgb(150, 150, 150),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            ruler: Color::DarkGray,
            track_target: Color::Rgb(100, 116, 139),
            track_estimated: Color::Rgb(148, 163, 184),
            track_designed: Color::Rgb(70, 130, 180),
            track_overflow: Color::Rgb(200, 60, 60),
            track_missing: Color::Rgb(220, 120, 80),
            detail_solid: Color::Rgb(71, 85, 105),
            detail_secondary: Color::Rgb(100, 116, 139),
            bar_primary: Color::Rgb(71, 85, 105),
            bar_secondary: Color::Rgb(100, 116, 139),
            bar_background: Color::Rgb(241, 245, 249),
            pedagogy: Self::pedagogy_palette(),
            neutral: Self::neutral_color(),
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::Black,
            header_accent_fg: Color::White,
            selection_border: Color::White,
            status_ok: Color::White,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            overlay_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            ruler: Color::Gray,
            track_target: Color::Gray,
            track_estimated: Color::DarkGray,
            track_designed: Color::White,
            track_overflow: Color::White,
            track_missing: Color::Gray,
            detail_solid: Color::White,
            detail_secondary: Color::Gray,
            bar_primary: Color::White,
            bar_secondary: Color::Gray,
            bar_background: Color::Black,
            pedagogy: [
                Color::DarkGray,
                Color::White,
                Color::Gray,
                Color::White,
                Color::Gray,
                Color::White,
                Color::Gray,
            ],
            neutral: Color::DarkGray,
        }
    }
}

pub fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
