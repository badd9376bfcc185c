//! Input handling for [`GridView`].
//!
//! Every event runs to completion against a freshly computed layout, so hit
//! testing never sees stale geometry.

use tracing::{debug, trace};
use trellis_core::logging::targets;
use trellis_render::Point;

use super::editor::{CaretMove, filter_composition};
use super::hit_test::HitTarget;
use super::scrollbar::ScrollBarPart;
use super::{DragMode, EditSession, GridView};
use crate::model::{CellValue, ColumnKind, Row, SortOrder};
use crate::widget::events::{InputEvent, Key, KeyboardModifiers, MouseButton};

impl GridView {
    /// Handle one input event. Returns `true` if the grid consumed it.
    #[tracing::instrument(skip_all, target = "trellis::grid", level = "trace", fields(kind = event.kind()))]
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        self.validate_edit();
        let handled = match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => self.handle_pointer_down(position, button, modifiers),
            InputEvent::PointerMove {
                position, buttons, ..
            } => self.handle_pointer_move(position, buttons),
            InputEvent::PointerUp { button, .. } => self.handle_pointer_up(button),
            InputEvent::Wheel {
                delta_x,
                delta_y,
                modifiers,
                ..
            } => self.handle_wheel(delta_x, delta_y, modifiers),
            InputEvent::KeyDown { key, modifiers } => {
                if self.is_editing() {
                    self.handle_edit_key(key, modifiers)
                } else {
                    self.handle_navigation_key(key, modifiers)
                }
            }
            InputEvent::KeyUp { .. } => false,
            InputEvent::TextInput(text) => {
                let text: String = text.chars().filter(|c| !c.is_control()).collect();
                self.handle_text(&text)
            }
            InputEvent::CompositionResult(text) => self.handle_text(&filter_composition(&text)),
            InputEvent::DropFiles { position, paths } => {
                let cell = match self.hit_test(position) {
                    HitTarget::Cell { column, row } => Some((column, row)),
                    _ => None,
                };
                debug!(target: targets::GRID, ?cell, count = paths.len(), "files dropped");
                self.files_dropped.emit((cell, paths));
                true
            }
            InputEvent::FocusLost => {
                self.commit_edit();
                if self.drag != DragMode::None {
                    self.drag = DragMode::None;
                    self.host.release_pointer();
                }
                if self.hovered.take().is_some() {
                    self.update();
                }
                true
            }
        };
        trace!(target: targets::GRID, handled, "event dispatched");
        handled
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    fn handle_pointer_down(
        &mut self,
        position: Point,
        button: MouseButton,
        modifiers: KeyboardModifiers,
    ) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        let viewport = self.layout();
        let widths = self.column_widths();
        let geometry = self.geometry(&viewport, &widths);
        let target = geometry.hit_test(position);
        trace!(target: targets::GRID, ?target, "pointer down");

        match target {
            HitTarget::HorizontalScrollBar(part) => {
                self.cancel_edit();
                let Some(bar) = geometry.horizontal_bar() else {
                    return true;
                };
                let page = viewport.render_width;
                match part {
                    ScrollBarPart::Thumb => {
                        self.drag = DragMode::HorizontalThumb {
                            grab_offset: bar.grab_offset(position),
                        };
                        self.host.capture_pointer();
                    }
                    ScrollBarPart::TrackBefore => self.set_scroll_x(self.scroll.x - page),
                    ScrollBarPart::TrackAfter => self.set_scroll_x(self.scroll.x + page),
                }
                true
            }
            HitTarget::VerticalScrollBar(part) => {
                self.cancel_edit();
                let Some(bar) = geometry.vertical_bar() else {
                    return true;
                };
                let page = viewport.visible_rows.max(1);
                match part {
                    ScrollBarPart::Thumb => {
                        self.drag = DragMode::VerticalThumb {
                            grab_offset: bar.grab_offset(position),
                        };
                        self.host.capture_pointer();
                    }
                    ScrollBarPart::TrackBefore => {
                        self.set_scroll_row(self.scroll.row.saturating_sub(page));
                    }
                    ScrollBarPart::TrackAfter => self.set_scroll_row(self.scroll.row + page),
                }
                true
            }
            HitTarget::Corner => true,
            HitTarget::Divider { column } => {
                let start_width = self.model.column(column).map_or(0.0, |c| c.width);
                self.drag = DragMode::Resize {
                    column,
                    start_x: position.x,
                    start_width,
                };
                self.host.capture_pointer();
                true
            }
            HitTarget::Header { column } => {
                let order = match self.model.sort_state() {
                    Some(state) if state.column == column => state.order.reversed(),
                    _ => SortOrder::Ascending,
                };
                self.sort_by_column(column, order)
            }
            HitTarget::Cell { column, row } => {
                let editing_here = self
                    .edit
                    .as_ref()
                    .is_some_and(|e| (e.column(), e.row()) == (column, row));
                if editing_here {
                    self.place_caret(position, modifiers.shift);
                    self.drag = DragMode::TextSelect;
                    self.host.capture_pointer();
                } else {
                    self.click_cell(column, row);
                }
                true
            }
            HitTarget::None => {
                self.commit_edit();
                false
            }
        }
    }

    /// Activate a body cell the way a click does.
    fn click_cell(&mut self, column: usize, row: usize) {
        self.commit_edit();
        self.set_selected_cell(column, row);
        self.cell_clicked.emit((column, row));

        let Some(kind) = self.model.column(column).map(|c| c.kind.clone()) else {
            return;
        };
        match kind {
            ColumnKind::Check => self.toggle_check(column, row),
            ColumnKind::Button { .. } => self.button_clicked.emit((column, row)),
            ColumnKind::Text => {
                self.begin_edit(column, row);
            }
            ColumnKind::Image | ColumnKind::ComboBox { .. } => {}
        }
    }

    fn toggle_check(&mut self, column: usize, row: usize) {
        let checked = !self
            .model
            .cell(column, row)
            .is_some_and(CellValue::is_checked);
        if self.model.set_cell(column, row, CellValue::checked(checked)) {
            debug!(target: targets::GRID, column, row, checked, "check toggled");
            self.check_changed.emit((column, row, checked));
            self.update();
        }
    }

    /// Move the caret of the edited cell to the pointer.
    fn place_caret(&mut self, position: Point, extend: bool) {
        let Some(edit) = &self.edit else {
            return;
        };
        let Some(rect) = self.cell_rect(edit.column(), edit.row()) else {
            return;
        };
        let x = position.x - rect.left() - self.config.cell_padding;
        let caret = edit.caret_at(self.metrics.as_ref(), x, rect.height());
        let anchor = if extend { edit.selection().0 } else { caret };
        if let Some(edit) = self.edit.as_mut() {
            edit.set_selection(anchor, caret);
        }
        self.after_edit_change();
    }

    fn handle_pointer_move(&mut self, position: Point, buttons: u8) -> bool {
        let viewport = self.layout();
        match self.drag {
            DragMode::Resize {
                column,
                start_x,
                start_width,
            } => {
                self.set_column_width(column, start_width + position.x - start_x);
                true
            }
            DragMode::VerticalThumb { grab_offset } => {
                let widths = self.column_widths();
                if let Some(bar) = self.geometry(&viewport, &widths).vertical_bar() {
                    let value = bar.value_for_drag(bar.axis(position), grab_offset);
                    self.set_scroll_row(value.round() as usize);
                }
                true
            }
            DragMode::HorizontalThumb { grab_offset } => {
                let widths = self.column_widths();
                if let Some(bar) = self.geometry(&viewport, &widths).horizontal_bar() {
                    let value = bar.value_for_drag(bar.axis(position), grab_offset);
                    self.set_scroll_x(value);
                }
                true
            }
            DragMode::TextSelect if buttons & MouseButton::Left.mask() != 0 => {
                self.place_caret(position, true);
                true
            }
            DragMode::TextSelect | DragMode::None => {
                let hovered = match self.hit_test(position) {
                    HitTarget::Cell { column, row } => Some((column, row)),
                    _ => None,
                };
                if hovered != self.hovered {
                    self.hovered = hovered;
                    self.update();
                }
                false
            }
        }
    }

    fn handle_pointer_up(&mut self, button: MouseButton) -> bool {
        if button != MouseButton::Left || self.drag == DragMode::None {
            return false;
        }
        if let DragMode::Resize { column, .. } = self.drag {
            debug!(
                target: targets::GRID,
                column,
                width = self.model.column(column).map_or(0.0, |c| c.width),
                "column resized"
            );
        }
        self.drag = DragMode::None;
        self.host.release_pointer();
        true
    }

    fn handle_wheel(&mut self, delta_x: f32, delta_y: f32, modifiers: KeyboardModifiers) -> bool {
        let viewport = self.layout();
        let horizontal = if modifiers.shift { delta_y } else { delta_x };
        if horizontal != 0.0 && (modifiers.shift || delta_y == 0.0) {
            if !viewport.need_h {
                return false;
            }
            self.set_scroll_x(self.scroll.x - horizontal * self.config.wheel_pan_step);
            return true;
        }
        if delta_y == 0.0 {
            return false;
        }
        let mut notches = delta_y.round();
        if notches == 0.0 {
            notches = delta_y.signum();
        }
        let row = if notches > 0.0 {
            self.scroll.row.saturating_sub(notches as usize)
        } else {
            self.scroll.row.saturating_add((-notches) as usize)
        };
        self.set_scroll_row(row);
        true
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    fn handle_edit_key(&mut self, key: Key, modifiers: KeyboardModifiers) -> bool {
        let Some((column, row)) = self.edit.as_ref().map(|e| (e.column(), e.row())) else {
            return false;
        };
        let command = modifiers.command();
        let extend = modifiers.shift;

        match key {
            Key::Escape => self.cancel_edit(),
            Key::Enter | Key::NumpadEnter => {
                self.commit_edit();
                if row + 1 < self.model.row_count() {
                    self.begin_edit(column, row + 1);
                }
            }
            Key::ArrowUp | Key::ArrowDown => {
                self.commit_edit();
                return self.handle_navigation_key(key, modifiers);
            }
            Key::ArrowLeft if command => self.edit_op(|e| e.move_caret(CaretMove::WordLeft, extend)),
            Key::ArrowRight if command => {
                self.edit_op(|e| e.move_caret(CaretMove::WordRight, extend));
            }
            Key::ArrowLeft => self.edit_op(|e| e.move_caret(CaretMove::Left, extend)),
            Key::ArrowRight => self.edit_op(|e| e.move_caret(CaretMove::Right, extend)),
            Key::Home => self.edit_op(|e| e.move_caret(CaretMove::Home, extend)),
            Key::End => self.edit_op(|e| e.move_caret(CaretMove::End, extend)),
            Key::Delete => self.edit_op(|e| e.delete_forward()),
            Key::Backspace if command => self.edit_op(|e| e.delete_word_before()),
            Key::Backspace => self.edit_op(|e| e.backspace()),
            Key::A if command => self.edit_op(|e| e.select_all()),
            Key::C if command => self.copy_selection(),
            Key::X if command => self.cut_selection(),
            Key::V if command => self.paste(),
            _ => return false,
        }
        true
    }

    fn edit_op(&mut self, op: impl FnOnce(&mut EditSession)) {
        if let Some(edit) = self.edit.as_mut() {
            op(edit);
        }
        self.after_edit_change();
    }

    fn copy_selection(&mut self) {
        let Some(text) = self
            .edit
            .as_ref()
            .filter(|e| e.has_selection())
            .map(|e| e.selected_text().to_owned())
        else {
            return;
        };
        if let Err(err) = self.host.set_clipboard_text(&text) {
            debug!(target: targets::HOST, %err, "copy failed");
        }
    }

    fn cut_selection(&mut self) {
        let Some(text) = self
            .edit
            .as_ref()
            .filter(|e| e.has_selection())
            .map(|e| e.selected_text().to_owned())
        else {
            return;
        };
        match self.host.set_clipboard_text(&text) {
            Ok(()) => self.edit_op(|e| {
                e.cut_selection();
            }),
            Err(err) => debug!(target: targets::HOST, %err, "cut failed"),
        }
    }

    fn paste(&mut self) {
        match self.host.clipboard_text() {
            Ok(text) => self.edit_op(|e| e.insert_text(&text)),
            Err(err) => debug!(target: targets::HOST, %err, "paste failed"),
        }
    }

    fn handle_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        if !self.is_editing() {
            let Some((column, row)) = self.selected else {
                return false;
            };
            if !self.begin_edit(column, row) {
                return false;
            }
        }
        self.edit_op(|e| e.insert_text(text));
        true
    }

    fn handle_navigation_key(&mut self, key: Key, modifiers: KeyboardModifiers) -> bool {
        let rows = self.model.row_count();
        let columns = self.model.column_count();
        if rows == 0 || columns == 0 {
            return false;
        }
        let Some((column, row)) = self.selected else {
            if matches!(
                key,
                Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
            ) {
                self.move_to_cell(0, 0);
                return true;
            }
            return false;
        };
        let page = self.viewport().visible_rows.max(1);

        match key {
            Key::ArrowUp => self.move_to_cell(column, row.saturating_sub(1)),
            Key::ArrowDown if row + 1 < rows => self.move_to_cell(column, row + 1),
            Key::ArrowDown if self.config.allow_user_add_rows => {
                let new_row = self.model.add_row(Row::default());
                debug!(target: targets::GRID, row = new_row, "row added from keyboard");
                self.row_added.emit(new_row);
                self.move_to_cell(column, new_row);
            }
            Key::ArrowDown => {}
            Key::ArrowLeft => self.move_to_cell(column.saturating_sub(1), row),
            Key::ArrowRight => self.move_to_cell((column + 1).min(columns - 1), row),
            Key::PageUp => self.move_to_cell(column, row.saturating_sub(page)),
            Key::PageDown => self.move_to_cell(column, (row + page).min(rows - 1)),
            Key::Home if modifiers.command() => self.move_to_cell(0, 0),
            Key::End if modifiers.command() => self.move_to_cell(columns - 1, rows - 1),
            Key::Home => self.move_to_cell(0, row),
            Key::End => self.move_to_cell(columns - 1, row),
            Key::Enter | Key::NumpadEnter | Key::F2 => return self.begin_edit(column, row),
            Key::Space => {
                let is_check = self
                    .model
                    .column(column)
                    .is_some_and(|c| c.kind == ColumnKind::Check);
                if !is_check {
                    return false;
                }
                self.toggle_check(column, row);
            }
            _ => return false,
        }
        true
    }

    fn move_to_cell(&mut self, column: usize, row: usize) {
        if self.set_selected_cell(column, row) {
            self.ensure_row_visible(row);
            self.ensure_column_visible(column);
        }
    }
}
