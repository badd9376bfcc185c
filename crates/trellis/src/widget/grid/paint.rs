//! Painting for [`GridView`].

use std::time::{Duration, Instant};

use trellis_core::logging::{span_names, targets};
use trellis_render::{Color, Point, Rect, Renderer, Stroke};

use super::viewport::{Viewport, visible_column_range};
use super::{GridView, ScrollBarGeometry};
use crate::model::{CellValue, ColumnKind, SortOrder};

const CHECK_BOX_SIZE: f32 = 12.0;

impl GridView {
    /// Paint the grid.
    pub fn paint(&mut self, renderer: &mut dyn Renderer) {
        self.paint_at(renderer, Instant::now());
    }

    /// Paint the grid with the caret blink sampled at `now`.
    pub fn paint_at(&mut self, renderer: &mut dyn Renderer, now: Instant) {
        let _span = tracing::trace_span!(target: targets::GRID, span_names::GRID_PAINT).entered();
        self.validate_edit();
        let viewport = self.layout();

        renderer.fill_rect(
            Rect::new(0.0, 0.0, self.size.width, self.size.height),
            self.palette.background,
        );
        if viewport.render_width <= 0.0 || viewport.render_height <= 0.0 {
            return;
        }

        let widths = self.column_widths();
        let columns = visible_column_range(&widths, self.scroll.x, viewport.render_width);

        renderer.push_clip(viewport.body_rect());
        self.paint_body(renderer, &viewport, columns.clone());
        self.paint_editor(renderer, now);
        renderer.pop_clip();

        renderer.push_clip(viewport.header_rect());
        self.paint_header(renderer, columns);
        renderer.pop_clip();

        let geometry = self.geometry(&viewport, &widths);
        if let Some(bar) = geometry.vertical_bar() {
            self.paint_scroll_bar(renderer, &bar);
        }
        if let Some(bar) = geometry.horizontal_bar() {
            self.paint_scroll_bar(renderer, &bar);
        }
        if let Some(corner) = viewport.corner_rect() {
            renderer.fill_rect(corner, self.palette.scrollbar_track);
        }
    }

    fn paint_body(
        &self,
        renderer: &mut dyn Renderer,
        viewport: &Viewport,
        columns: std::ops::Range<usize>,
    ) {
        let first = self.scroll.row;
        // One extra row for the partially visible one at the bottom
        let last = (first + viewport.visible_rows + 1).min(self.model.row_count());
        let grid_line = Stroke::new(self.palette.grid_line, 1.0);

        for row in first..last {
            for column in columns.clone() {
                let Some(rect) = self.cell_rect(column, row) else {
                    continue;
                };
                if self.selected == Some((column, row)) {
                    renderer.fill_rect(rect, self.palette.selection_background);
                } else if self.hovered == Some((column, row)) {
                    renderer.fill_rect(rect, self.palette.hover_background);
                }
                self.paint_cell(renderer, column, row, rect);
                renderer.stroke_rect(rect, &grid_line);
            }
        }
    }

    fn paint_cell(&self, renderer: &mut dyn Renderer, column: usize, row: usize, rect: Rect) {
        let Some(col) = self.model.column(column) else {
            return;
        };
        let empty = CellValue::Empty;
        let value = self.model.cell(column, row).unwrap_or(&empty);
        if self
            .edit
            .as_ref()
            .is_some_and(|e| (e.column(), e.row()) == (column, row))
        {
            return;
        }
        let inner = rect.deflate(self.config.cell_padding);

        match &col.kind {
            ColumnKind::Text => {
                self.paint_cell_text(renderer, value.display_text(), inner, self.palette.text);
            }
            ColumnKind::Image => {
                if let CellValue::Image(handle) = value {
                    let side = inner.height().min(inner.width());
                    renderer.draw_image(*handle, Rect::new(inner.left(), inner.top(), side, side));
                }
            }
            ColumnKind::Check => {
                let center = rect.center();
                let half = CHECK_BOX_SIZE / 2.0;
                let check_box =
                    Rect::new(center.x - half, center.y - half, CHECK_BOX_SIZE, CHECK_BOX_SIZE);
                renderer.fill_rect(check_box, self.palette.editor_background);
                renderer.stroke_rect(check_box, &Stroke::new(self.palette.control_border, 1.0));
                if value.is_checked() {
                    renderer.fill_rect(check_box.deflate(3.0), self.palette.text);
                }
            }
            ColumnKind::Button { label } => {
                renderer.fill_rect(inner, self.palette.control_face);
                renderer.stroke_rect(inner, &Stroke::new(self.palette.control_border, 1.0));
                self.paint_cell_text(renderer, label, inner, self.palette.text);
            }
            ColumnKind::ComboBox { .. } => {
                let arrow_width = inner.height().min(inner.width());
                let text_area = Rect::new(
                    inner.left(),
                    inner.top(),
                    (inner.width() - arrow_width).max(0.0),
                    inner.height(),
                );
                self.paint_cell_text(renderer, value.display_text(), text_area, self.palette.text);
                let arrow = Rect::new(text_area.right(), inner.top(), arrow_width, inner.height());
                renderer.fill_rect(arrow, self.palette.control_face);
                renderer.stroke_rect(arrow, &Stroke::new(self.palette.control_border, 1.0));
            }
        }
    }

    /// Draw one line of text vertically centered and clipped to `area`.
    fn paint_cell_text(&self, renderer: &mut dyn Renderer, text: &str, area: Rect, color: Color) {
        if text.is_empty() || area.is_empty() {
            return;
        }
        let size = self
            .metrics
            .measure_text(text, f32::INFINITY, self.config.row_height);
        let y = area.top() + (area.height() - size.height) / 2.0;
        renderer.push_clip(area);
        renderer.draw_text(text, Point::new(area.left(), y), color);
        renderer.pop_clip();
    }

    fn paint_editor(&self, renderer: &mut dyn Renderer, now: Instant) {
        let Some(edit) = &self.edit else {
            return;
        };
        let Some(rect) = self.cell_rect(edit.column(), edit.row()) else {
            return;
        };
        renderer.fill_rect(rect, self.palette.editor_background);
        renderer.stroke_rect(rect, &Stroke::new(self.palette.caret, 1.0));

        let area = Rect::new(
            rect.left() + self.config.cell_padding,
            rect.top(),
            (rect.width() - self.config.cell_padding * 2.0).max(0.0),
            rect.height(),
        );
        let line_height = self
            .metrics
            .measure_text(edit.text(), f32::INFINITY, self.config.row_height)
            .height;
        let text_origin = Point::new(
            area.left() - edit.offset_x(),
            area.top() + (area.height() - line_height) / 2.0,
        );

        renderer.push_clip(area);
        if edit.has_selection() {
            let (start, end) = edit.selection_range();
            for r in self.metrics.hit_test_text_range(edit.text(), start, end - start) {
                renderer.fill_rect(
                    r.offset(text_origin.x, text_origin.y),
                    self.palette.editor_selection,
                );
            }
        }
        renderer.draw_text(edit.text(), text_origin, self.palette.text);

        let blink = Duration::from_millis(self.config.caret_blink_ms);
        if edit.caret_visible(now, blink) {
            let x = text_origin.x + edit.caret_x(self.metrics.as_ref());
            renderer.fill_rect(
                Rect::new(x, text_origin.y, 1.0, line_height),
                self.palette.caret,
            );
        }
        renderer.pop_clip();
    }

    fn paint_header(&self, renderer: &mut dyn Renderer, columns: std::ops::Range<usize>) {
        let header_height = self.config.header_height;
        let border = Stroke::new(self.palette.grid_line, 1.0);
        let sort = self.model.sort_state();

        for column in columns {
            let (Some(left), Some(col)) = (self.model.column_left(column), self.model.column(column))
            else {
                continue;
            };
            let rect = Rect::new(left - self.scroll.x, 0.0, col.width, header_height);
            renderer.fill_rect(rect, self.palette.header_background);
            renderer.stroke_rect(rect, &border);

            let inner = rect.deflate(self.config.cell_padding);
            let indicator = sort.filter(|s| s.column == column).map(|s| match s.order {
                SortOrder::Ascending => "\u{25B2}",
                SortOrder::Descending => "\u{25BC}",
            });
            let title_area = match indicator {
                Some(arrow) => {
                    let arrow_size = self
                        .metrics
                        .measure_text(arrow, f32::INFINITY, header_height);
                    let arrow_x = inner.right() - arrow_size.width;
                    renderer.draw_text(
                        arrow,
                        Point::new(arrow_x, inner.top() + (inner.height() - arrow_size.height) / 2.0),
                        self.palette.header_text,
                    );
                    Rect::new(
                        inner.left(),
                        inner.top(),
                        (inner.width() - arrow_size.width - self.config.cell_padding).max(0.0),
                        inner.height(),
                    )
                }
                None => inner,
            };
            self.paint_cell_text(renderer, &col.name, title_area, self.palette.header_text);
        }
    }

    fn paint_scroll_bar(&self, renderer: &mut dyn Renderer, bar: &ScrollBarGeometry) {
        renderer.fill_rect(bar.track, self.palette.scrollbar_track);
        renderer.fill_rect(bar.thumb_rect().deflate(2.0), self.palette.scrollbar_thumb);
    }
}
