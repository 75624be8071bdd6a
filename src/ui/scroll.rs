//! Scrolling for the item button grid

use macroquad::prelude::*;

/// Geometry of a scrolled grid of equally sized cells
pub struct GridScrollConfig {
    pub visible_height: f32,
    pub row_height: f32,
    pub row_spacing: f32,
    pub columns: usize,
    pub total_items: usize,
    /// Current scroll offset in pixels
    pub scroll_offset: f32,
}

pub struct GridScrollState {
    pub max_scroll: f32,
    pub clamped_scroll: f32,
    pub show_scrollbar: bool,
    /// Thumb position, 0.0 to 1.0
    pub scrollbar_position: f32,
    /// Thumb size as a fraction of the track
    pub scrollbar_size: f32,
}

impl GridScrollConfig {
    pub fn rows(&self) -> usize {
        self.total_items.div_ceil(self.columns.max(1))
    }

    /// Y of a row's top edge relative to the grid top, after scrolling
    pub fn row_y(&self, row: usize, scroll: f32) -> f32 {
        row as f32 * (self.row_height + self.row_spacing) - scroll
    }

    pub fn calculate(&self) -> GridScrollState {
        let total_height = self.rows() as f32 * (self.row_height + self.row_spacing);
        let max_scroll = (total_height - self.visible_height).max(0.0);
        let clamped_scroll = self.scroll_offset.clamp(0.0, max_scroll);

        let scrollbar_size = if total_height > 0.0 {
            (self.visible_height / total_height).min(1.0)
        } else {
            1.0
        };
        let scrollbar_position = if max_scroll > 0.0 {
            clamped_scroll / max_scroll
        } else {
            0.0
        };

        GridScrollState {
            max_scroll,
            clamped_scroll,
            show_scrollbar: total_height > self.visible_height,
            scrollbar_position,
            scrollbar_size,
        }
    }
}

/// Apply this frame's mouse wheel movement to a scroll offset
pub fn handle_scroll(current_scroll: f32, max_scroll: f32, scroll_speed: f32) -> f32 {
    let (_wheel_x, wheel_y) = mouse_wheel();
    (current_scroll - wheel_y * scroll_speed).clamp(0.0, max_scroll)
}

pub fn draw_scrollbar(track: Rect, state: &GridScrollState, track_color: Color, thumb_color: Color) {
    draw_rectangle(track.x, track.y, track.w, track.h, track_color);

    let thumb_height = track.h * state.scrollbar_size;
    let thumb_y = track.y + (track.h - thumb_height) * state.scrollbar_position;
    draw_rectangle(track.x, thumb_y, track.w, thumb_height, thumb_color);
}
