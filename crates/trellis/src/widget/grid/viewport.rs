//! Viewport layout for the grid.
//!
//! Whether each scrollbar is needed depends on the space left over by the
//! other one, so layout runs a small fixed-point iteration: guess no bars,
//! derive the render area, derive which bars that area needs, and repeat
//! until the guess is stable. Each flag can only flip from `false` to `true`,
//! so the iteration settles within [`MAX_LAYOUT_ROUNDS`].

use std::ops::Range;

use tracing::trace;
use trellis_core::logging::targets;
use trellis_render::Rect;

/// Upper bound on layout rounds.
pub const MAX_LAYOUT_ROUNDS: u8 = 3;

/// Inputs to [`Viewport::compute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportInput {
    /// Control width in pixels.
    pub width: f32,
    /// Control height in pixels.
    pub height: f32,
    pub header_height: f32,
    pub row_height: f32,
    /// Sum of all column widths.
    pub total_width: f32,
    pub row_count: usize,
    pub scrollbar_thickness: f32,
}

/// Resolved scrollbar and content geometry for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Vertical scrollbar shown.
    pub need_v: bool,
    /// Horizontal scrollbar shown.
    pub need_h: bool,
    /// Width left for header and body after the vertical bar.
    pub render_width: f32,
    /// Height left for header and body after the horizontal bar.
    pub render_height: f32,
    /// Height of the body below the header.
    pub body_height: f32,
    /// Number of rows that fit completely in the body.
    pub visible_rows: usize,
    pub max_scroll_row: usize,
    pub max_scroll_x: f32,
    /// Layout rounds run.
    pub rounds: u8,
    /// Whether the last round reproduced its input guess.
    pub converged: bool,
    header_height: f32,
    row_height: f32,
    scrollbar_thickness: f32,
}

impl Viewport {
    /// Resolve scrollbar visibility and visible geometry.
    ///
    /// Non-positive control sizes yield an empty viewport.
    pub fn compute(input: &ViewportInput) -> Self {
        let mut viewport = Self {
            header_height: input.header_height.max(0.0),
            row_height: input.row_height,
            scrollbar_thickness: input.scrollbar_thickness.max(0.0),
            ..Self::default()
        };
        if input.width <= 0.0 || input.height <= 0.0 {
            viewport.converged = true;
            return viewport;
        }

        let (mut need_v, mut need_h) = (false, false);
        while viewport.rounds < MAX_LAYOUT_ROUNDS {
            viewport.rounds += 1;
            viewport.apply(input, need_v, need_h);

            let next_v = input.row_count > viewport.visible_rows;
            let next_h = input.total_width > viewport.render_width;
            trace!(
                target: targets::GRID_LAYOUT,
                round = viewport.rounds,
                need_v,
                need_h,
                next_v,
                next_h,
                "layout round"
            );
            if next_v == need_v && next_h == need_h {
                viewport.converged = true;
                break;
            }
            need_v = next_v;
            need_h = next_h;
        }

        if !viewport.converged {
            viewport.apply(input, need_v, need_h);
        }
        viewport
    }

    fn apply(&mut self, input: &ViewportInput, need_v: bool, need_h: bool) {
        let thickness = self.scrollbar_thickness;
        self.need_v = need_v;
        self.need_h = need_h;
        self.render_width = (input.width - if need_v { thickness } else { 0.0 }).max(0.0);
        self.render_height = (input.height - if need_h { thickness } else { 0.0 }).max(0.0);
        self.body_height = (self.render_height - self.header_height).max(0.0);
        self.visible_rows = if input.row_height > 0.0 {
            (self.body_height / input.row_height).floor() as usize
        } else {
            0
        };
        self.max_scroll_row = input.row_count.saturating_sub(self.visible_rows.max(1));
        self.max_scroll_x = (input.total_width - self.render_width).max(0.0);
    }

    pub fn header_height(&self) -> f32 {
        self.header_height
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn scrollbar_thickness(&self) -> f32 {
        self.scrollbar_thickness
    }

    /// Header strip in grid-local coordinates.
    pub fn header_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.render_width,
            self.header_height.min(self.render_height),
        )
    }

    /// Body area below the header.
    pub fn body_rect(&self) -> Rect {
        Rect::new(0.0, self.header_height, self.render_width, self.body_height)
    }

    /// Track of the vertical scrollbar. It spans the body only.
    pub fn vertical_bar_rect(&self) -> Option<Rect> {
        self.need_v.then(|| {
            Rect::new(
                self.render_width,
                self.header_height,
                self.scrollbar_thickness,
                self.body_height,
            )
        })
    }

    /// Track of the horizontal scrollbar.
    pub fn horizontal_bar_rect(&self) -> Option<Rect> {
        self.need_h.then(|| {
            Rect::new(
                0.0,
                self.render_height,
                self.render_width,
                self.scrollbar_thickness,
            )
        })
    }

    /// The square where both scrollbars meet.
    pub fn corner_rect(&self) -> Option<Rect> {
        (self.need_v && self.need_h).then(|| {
            Rect::new(
                self.render_width,
                self.render_height,
                self.scrollbar_thickness,
                self.scrollbar_thickness,
            )
        })
    }
}

/// Scroll position of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// First visible row.
    pub row: usize,
    /// Horizontal offset in pixels.
    pub x: f32,
}

impl ScrollState {
    /// Clamp both offsets into the viewport's range. Returns `true` if
    /// anything changed.
    pub fn clamp_to(&mut self, viewport: &Viewport) -> bool {
        let row = self.row.min(viewport.max_scroll_row);
        let x = self.x.clamp(0.0, viewport.max_scroll_x);
        let changed = row != self.row || x != self.x;
        self.row = row;
        self.x = x;
        changed
    }
}

/// Index of the column containing content-space `x`.
pub fn column_at(widths: &[f32], x: f32) -> Option<usize> {
    if x < 0.0 {
        return None;
    }
    let mut left = 0.0;
    for (index, width) in widths.iter().enumerate() {
        let right = left + width;
        if x < right {
            return Some(index);
        }
        left = right;
    }
    None
}

/// Half-open range of columns intersecting `[scroll_x, scroll_x + render_width)`.
pub fn visible_column_range(widths: &[f32], scroll_x: f32, render_width: f32) -> Range<usize> {
    let view_end = scroll_x + render_width;
    let mut start = None;
    let mut end = 0;
    let mut left = 0.0;
    for (index, width) in widths.iter().enumerate() {
        let right = left + width;
        if right > scroll_x && left < view_end {
            start.get_or_insert(index);
            end = index + 1;
        }
        left = right;
    }
    match start {
        Some(start) => start..end,
        None => 0..0,
    }
}
