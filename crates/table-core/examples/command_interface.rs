//! Command interface example
//!
//! Demonstrates how to drive a table document through `TableStateManager`.

use table_core::{
    Delimiter, ParseConfig, SearchOptions, TableCommand, TableStateManager, find_cells,
};

fn main() {
    println!("=== Table command interface example ===\n");

    let text = "name;age;city\nAlice;30;Oslo\nBob;25;\"Bergen; Norway\"";
    let config = ParseConfig::default().with_delimiter(Delimiter::Auto);
    let mut manager = TableStateManager::new(text, config);
    manager.subscribe(|change| {
        println!(
            "  [v{} -> v{}] {:?}",
            change.old_version, change.new_version, change.change_type
        );
    });

    let state = manager.get_document_state();
    println!(
        "Loaded {} rows x {} columns, delimiter {:?}\n",
        state.row_count, state.column_count, state.delimiter
    );

    // 1. Cell edits
    println!("1. Cell edits:");
    manager
        .execute(TableCommand::SetCell {
            row: 2,
            col: 1,
            value: "26".to_string(),
        })
        .unwrap();

    // 2. Structure edits
    println!("2. Structure edits:");
    manager
        .execute(TableCommand::InsertColumn {
            index: 2,
            after: true,
        })
        .unwrap();
    manager
        .execute(TableCommand::SetCell {
            row: 0,
            col: 3,
            value: "email".to_string(),
        })
        .unwrap();
    manager.execute(TableCommand::AddRow).unwrap();

    println!("\n{}\n", manager.text_for_saving());

    // 3. Undo / redo
    println!("3. Undo / redo:");
    manager.execute(TableCommand::Undo).unwrap();
    manager.execute(TableCommand::Undo).unwrap();
    manager.execute(TableCommand::Redo).unwrap();
    let history = manager.get_undo_redo_state();
    println!(
        "  can undo: {} ({} steps), can redo: {} ({} steps)\n",
        history.can_undo, history.undo_depth, history.can_redo, history.redo_depth
    );

    // 4. Search
    println!("4. Search for \"norway\":");
    for found in find_cells(manager.grid(), "norway", SearchOptions::default()).unwrap() {
        println!("  {} = {:?}", found.address, manager.grid()[found.row][found.col]);
    }

    println!(
        "\nModified: {}",
        manager.get_document_state().is_modified
    );
}
