use ratatui::style::Color;

pub const BG: Color = Color::Rgb(0x1c, 0x1f, 0x26);
pub const HEADER: Color = Color::Rgb(0x14, 0x16, 0x1d);
pub const CARD: Color = Color::Rgb(0x2a, 0x2f, 0x3a);
pub const TEXT: Color = Color::White;
pub const MUTED_TEXT: Color = Color::Rgb(0xb0, 0xb3, 0xb8);
pub const ACCENT: Color = Color::Rgb(0x1d, 0xb9, 0x54);
pub const WARNING: Color = Color::Rgb(230, 190, 40);
pub const ERROR: Color = Color::Rgb(230, 80, 80);
