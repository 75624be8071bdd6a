//! Shared colors and sizes for both screens

use macroquad::prelude::Color;

pub const BACKGROUND: Color = Color::new(0.098, 0.098, 0.137, 1.0); // rgba(25, 25, 35, 255)
pub const GRID_LINE: Color = Color::new(0.3, 0.4, 0.5, 0.08);

pub const FIELD_BG: Color = Color::new(0.235, 0.235, 0.314, 1.0); // rgba(60, 60, 80, 255)
pub const FIELD_BG_ACTIVE: Color = Color::new(0.314, 0.471, 0.706, 1.0); // rgba(80, 120, 180, 255)

pub const BUTTON_BG: Color = Color::new(0.125, 0.125, 0.173, 1.0); // rgba(32, 32, 44, 255)
pub const BUTTON_HOVER_BG: Color = Color::new(0.188, 0.188, 0.282, 1.0); // rgba(48, 48, 72, 255)
pub const BUTTON_BORDER: Color = Color::new(0.227, 0.212, 0.188, 1.0); // rgba(58, 54, 48, 255)
pub const BUTTON_HOVER_BORDER: Color = Color::new(0.659, 0.580, 0.424, 1.0); // rgba(168, 148, 108, 255)
pub const BUTTON_DISABLED_BG: Color = Color::new(0.086, 0.086, 0.118, 1.0); // rgba(22, 22, 30, 255)

// Selected item: green, like a lit shop sign
pub const ITEM_SELECTED_BG: Color = Color::new(0.157, 0.392, 0.216, 1.0); // rgba(40, 100, 55, 255)
pub const ITEM_SELECTED_BORDER: Color = Color::new(0.565, 0.933, 0.565, 1.0); // lightgreen

pub const TEXT_TITLE: Color = Color::new(0.855, 0.737, 0.502, 1.0); // rgba(218, 188, 128, 255)
pub const TEXT_NORMAL: Color = Color::new(0.824, 0.824, 0.855, 1.0); // rgba(210, 210, 218, 255)
pub const TEXT_DIM: Color = Color::new(0.502, 0.502, 0.541, 1.0); // rgba(128, 128, 138, 255)
pub const TEXT_TOTAL: Color = Color::new(0.459, 0.651, 1.0, 1.0); // rgba(117, 166, 255, 255)

pub const STATUS_INFO: Color = Color::new(0.459, 0.651, 1.0, 1.0);
pub const STATUS_SUCCESS: Color = Color::new(0.353, 0.784, 0.478, 1.0);
pub const STATUS_WARNING: Color = Color::new(0.95, 0.78, 0.25, 1.0);
pub const TEXT_ERROR: Color = Color::new(0.90, 0.35, 0.35, 1.0);

pub const OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.6);
pub const DIALOG_BG: Color = Color::new(0.063, 0.063, 0.086, 0.980); // rgba(16, 16, 22, 250)
pub const DIALOG_FRAME: Color = Color::new(0.557, 0.424, 0.267, 1.0); // rgba(142, 108, 68, 255)

pub const SCROLL_TRACK: Color = Color::new(0.086, 0.086, 0.118, 1.0);
pub const SCROLL_THUMB: Color = Color::new(0.463, 0.384, 0.267, 1.0);

pub const FONT_TITLE: f32 = 28.0;
pub const FONT_LARGE: f32 = 22.0;
pub const FONT_NORMAL: f32 = 18.0;
pub const FONT_SMALL: f32 = 15.0;

pub const PADDING: f32 = 16.0;
pub const BUTTON_HEIGHT: f32 = 34.0;
pub const ITEM_ROW_HEIGHT: f32 = 38.0;
pub const ITEM_ROW_SPACING: f32 = 8.0;
pub const ITEM_COLUMNS: usize = 2;
pub const SCROLLBAR_WIDTH: f32 = 6.0;
