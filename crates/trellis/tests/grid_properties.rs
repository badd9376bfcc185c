//! Property tests for layout, scrolling and selection.

mod common;

use common::RecordingHost;
use proptest::prelude::*;
use trellis::prelude::*;
use trellis::widget::grid::{MAX_LAYOUT_ROUNDS, ScrollState, Viewport, ViewportInput};

fn viewport_input() -> impl Strategy<Value = ViewportInput> {
    (
        1.0f32..1500.0,
        1.0f32..1500.0,
        0.0f32..60.0,
        1.0f32..60.0,
        0.0f32..3000.0,
        0usize..400,
        0.0f32..30.0,
    )
        .prop_map(
            |(width, height, header_height, row_height, total_width, row_count, thickness)| {
                ViewportInput {
                    width,
                    height,
                    header_height,
                    row_height,
                    total_width,
                    row_count,
                    scrollbar_thickness: thickness,
                }
            },
        )
}

#[derive(Debug, Clone)]
enum Op {
    Click(f32, f32),
    ShiftClick(f32, f32),
    /// Press, move and release with the primary button inside one body row.
    Drag { row: usize, from_x: f32, to_x: f32 },
    Wheel(f32),
    Key(Key, KeyboardModifiers),
    Text(String),
    Resize(f32, f32),
    AddRow,
    RemoveRow(usize),
    ClearRows,
    Sort(usize, bool),
    ScrollRow(usize),
    FocusLost,
}

fn op() -> impl Strategy<Value = Op> {
    let key = proptest::sample::select(vec![
        Key::ArrowUp,
        Key::ArrowDown,
        Key::ArrowLeft,
        Key::ArrowRight,
        Key::PageUp,
        Key::PageDown,
        Key::Home,
        Key::End,
        Key::Enter,
        Key::Escape,
        Key::Backspace,
        Key::Delete,
        Key::Space,
        Key::F2,
        Key::A,
        Key::C,
        Key::X,
        Key::V,
    ]);
    let modifiers = proptest::sample::select(vec![
        KeyboardModifiers::NONE,
        KeyboardModifiers::SHIFT,
        KeyboardModifiers::CTRL,
        KeyboardModifiers::CTRL_SHIFT,
    ]);
    let pointer = prop_oneof![
        (-20.0f32..340.0, -20.0f32..220.0).prop_map(|(x, y)| Op::Click(x, y)),
        (60.0f32..320.0, 24.0f32..200.0).prop_map(|(x, y)| Op::ShiftClick(x, y)),
        (0usize..7, 60.0f32..320.0, -10.0f32..330.0)
            .prop_map(|(row, from_x, to_x)| Op::Drag { row, from_x, to_x }),
    ];
    let input = prop_oneof![
        pointer,
        (-5.0f32..5.0).prop_map(Op::Wheel),
        (key, modifiers).prop_map(|(k, m)| Op::Key(k, m)),
        "[a-z\u{301}\u{e9}\u{65e5} ]{0,4}".prop_map(Op::Text),
        Just(Op::FocusLost),
    ];
    let mutation = prop_oneof![
        (0.0f32..400.0, 0.0f32..300.0).prop_map(|(w, h)| Op::Resize(w, h)),
        Just(Op::AddRow),
        (0usize..30).prop_map(Op::RemoveRow),
        Just(Op::ClearRows),
        (0usize..4, any::<bool>()).prop_map(|(c, asc)| Op::Sort(c, asc)),
        (0usize..60).prop_map(Op::ScrollRow),
    ];
    prop_oneof![3 => input, 1 => mutation]
}

fn grid(rows: usize) -> GridView {
    let mut grid = GridView::new().with_host(RecordingHost::default());
    grid.set_size(Size::new(320.0, 200.0));
    grid.add_column(Column::check("done").with_width(60.0));
    grid.add_column(Column::text("name").with_editable(true));
    grid.add_column(Column::text("notes").with_width(180.0).with_editable(true));
    for i in 0..rows {
        let row = Row::from_iter([
            CellValue::from(i % 3 == 0),
            CellValue::from(format!("n{}", i % 7)),
            CellValue::from(format!("row {i}")),
        ]);
        grid.add_row(row);
    }
    grid
}

fn apply(grid: &mut GridView, op: Op) {
    match op {
        Op::Click(x, y) => {
            grid.dispatch(InputEvent::click(x, y));
            grid.dispatch(InputEvent::release(x, y));
        }
        Op::ShiftClick(x, y) => {
            grid.dispatch(InputEvent::PointerDown {
                position: Point::new(x, y),
                button: MouseButton::Left,
                modifiers: KeyboardModifiers::SHIFT,
            });
            grid.dispatch(InputEvent::release(x, y));
        }
        Op::Drag { row, from_x, to_x } => {
            let y = 36.0 + 24.0 * row as f32;
            grid.dispatch(InputEvent::click(from_x, y));
            grid.dispatch(InputEvent::motion(to_x, y, MouseButton::Left.mask()));
            grid.dispatch(InputEvent::release(to_x, y));
        }
        Op::Wheel(dy) => {
            grid.dispatch(InputEvent::wheel(dy));
        }
        Op::Key(key, modifiers) => {
            grid.dispatch(InputEvent::key_with(key, modifiers));
        }
        Op::Text(text) => {
            grid.dispatch(InputEvent::text(text));
        }
        Op::Resize(w, h) => grid.set_size(Size::new(w, h)),
        Op::AddRow => {
            grid.add_row(Row::from_iter(["new"]));
        }
        Op::RemoveRow(row) => {
            grid.remove_row(row);
        }
        Op::ClearRows => grid.clear_rows(),
        Op::Sort(column, ascending) => {
            let order = if ascending {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            };
            grid.sort_by_column(column, order);
        }
        Op::ScrollRow(row) => grid.set_scroll_row(row),
        Op::FocusLost => {
            grid.dispatch(InputEvent::FocusLost);
        }
    }
}

proptest! {
    #[test]
    fn test_viewport_converges_with_consistent_flags(input in viewport_input()) {
        let viewport = Viewport::compute(&input);

        prop_assert!(viewport.converged);
        prop_assert!(viewport.rounds <= MAX_LAYOUT_ROUNDS);
        prop_assert_eq!(viewport.need_v, input.row_count > viewport.visible_rows);
        prop_assert_eq!(viewport.need_h, input.total_width > viewport.render_width);
        prop_assert!(viewport.render_width <= input.width);
        prop_assert!(viewport.render_height <= input.height);
    }

    #[test]
    fn test_scroll_clamp_is_idempotent(
        input in viewport_input(),
        row in 0usize..1000,
        x in -500.0f32..5000.0,
    ) {
        let viewport = Viewport::compute(&input);
        let mut scroll = ScrollState { row, x };
        scroll.clamp_to(&viewport);

        prop_assert!(scroll.row <= viewport.max_scroll_row);
        prop_assert!(scroll.x >= 0.0 && scroll.x <= viewport.max_scroll_x);
        let settled = scroll;
        prop_assert!(!scroll.clamp_to(&viewport));
        prop_assert_eq!(scroll, settled);
    }

    #[test]
    fn test_state_stays_in_range(
        rows in 0usize..25,
        ops in proptest::collection::vec(op(), 1..40),
    ) {
        let mut grid = grid(rows);
        for op in ops {
            apply(&mut grid, op);

            let model = grid.model();
            if let Some((column, row)) = grid.selected_cell() {
                prop_assert!(column < model.column_count());
                prop_assert!(row < model.row_count());
            }
            if let Some(edit) = grid.edit_session() {
                prop_assert!(edit.row() < model.row_count());
                let text = edit.text();
                let (anchor, caret) = edit.selection();
                prop_assert!(anchor <= text.len() && caret <= text.len());
                prop_assert!(text.is_char_boundary(anchor));
                prop_assert!(text.is_char_boundary(caret));
                prop_assert_eq!(caret, edit.caret());
                let (start, end) = edit.selection_range();
                prop_assert!(start <= end);
                prop_assert_eq!(edit.selected_text(), &text[start..end]);
            }
            let viewport = grid.viewport();
            let scroll = grid.scroll();
            prop_assert!(scroll.row <= viewport.max_scroll_row);
            prop_assert!(scroll.x <= viewport.max_scroll_x);
        }
    }
}
