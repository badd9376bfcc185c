//! Drive a grid headlessly and print what it draws.
//!
//! Run with:
//!
//! ```sh
//! RUST_LOG=trellis::grid=debug cargo run -p trellis --example headless_grid
//! ```

use trellis::prelude::*;
use trellis::render::{DrawCommand, ImageStore, RecordingRenderer};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GridConfig::from_toml_str("allow_user_add_rows = true")?;
    let mut images = ImageStore::new();
    let icon = images.insert("status", Size::new(16.0, 16.0));

    let mut grid = GridView::new().with_config(config);
    grid.set_size(Size::new(420.0, 160.0));
    grid.add_column(Column::image("").with_width(32.0));
    grid.add_column(Column::check("done").with_width(60.0));
    grid.add_column(Column::text("task").with_width(180.0).with_editable(true));
    grid.add_column(Column::button("action", "Open").with_width(80.0));
    for (done, task) in [(true, "write docs"), (false, "review"), (false, "ship")] {
        grid.add_row(Row::from_iter([
            CellValue::from(icon),
            CellValue::from(done),
            CellValue::from(task),
            CellValue::Empty,
        ]));
    }

    grid.check_changed.connect(|(column, row, checked)| {
        println!("check ({column}, {row}) -> {checked}");
    });
    grid.cell_edited.connect(|(column, row, text)| {
        println!("edit ({column}, {row}) -> {text:?}");
    });
    grid.row_added.connect(|row| println!("row {row} added"));
    grid.button_clicked.connect(|(column, row)| {
        println!("button ({column}, {row}) clicked");
    });

    // Rows start below the 24px header, 24px each
    let events = [
        InputEvent::click(60.0, 60.0),
        InputEvent::click(200.0, 36.0),
        InputEvent::text("write more docs"),
        InputEvent::key(Key::Enter),
        InputEvent::key(Key::Escape),
        InputEvent::key_with(Key::End, KeyboardModifiers::CTRL),
        InputEvent::key(Key::ArrowDown),
        InputEvent::click(150.0, 12.0),
        InputEvent::click(350.0, 60.0),
        InputEvent::wheel(-2.0),
    ];
    for event in events {
        let kind = event.kind();
        let handled = grid.dispatch(event);
        println!("{kind:<12} handled={handled}");
    }

    let mut renderer = RecordingRenderer::new();
    grid.paint(&mut renderer);

    let texts = renderer
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Text { .. }))
        .count();
    println!(
        "{} draw commands ({} text runs), {} rows, scroll row {}",
        renderer.commands().len(),
        texts,
        grid.model().row_count(),
        grid.scroll().row
    );
    Ok(())
}
