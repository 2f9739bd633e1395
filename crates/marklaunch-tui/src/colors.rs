//! Dark picker theme

use ratatui::style::Color;

pub const BG: Color = Color::Rgb(0x33, 0x33, 0x33);
pub const INPUT_BG: Color = Color::Rgb(0x55, 0x55, 0x55);
pub const SELECTED_BG: Color = Color::Rgb(0x66, 0x66, 0x66);

pub const ON_SURFACE: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const SUBTEXT: Color = Color::Rgb(0xb0, 0xb0, 0xb0);
pub const OUTLINE: Color = Color::Rgb(0x8a, 0x8a, 0x8a);

pub const CURSOR: Color = Color::Rgb(0x00, 0xff, 0x00);
