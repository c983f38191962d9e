//! End-to-end editing sessions through the public API.

use pretty_assertions::assert_eq;
use table_core::{
    CellMatch, Delimiter, ParseConfig, SearchOptions, TableCommand, TableStateManager,
    column_label, find_cells, parse_cell_address,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("table_core=debug")
        .try_init();
}

const SAMPLE: &str = "name,age,email,description
John Doe,25,john@example.com,Simple record
\"Jane Smith\",30,jane@test.com,\"Contains, comma\"
\"Alice \"\"Wonder\"\" Land\",28,alice@wonder.com,\"Multi
line\"";

#[test]
fn test_full_editing_session() {
    init_tracing();
    let mut manager = TableStateManager::new(SAMPLE, ParseConfig::default());
    assert_eq!(manager.get_document_state().row_count, 4);
    assert_eq!(manager.grid()[3][3], "Multi\nline");

    let commands = vec![
        TableCommand::InsertColumn {
            index: 1,
            after: true,
        },
        TableCommand::SetCell {
            row: 0,
            col: 2,
            value: "city".into(),
        },
        TableCommand::SetCell {
            row: 1,
            col: 2,
            value: "Oslo".into(),
        },
        TableCommand::DeleteRow { index: 2 },
        TableCommand::MoveRow { from: 2, to: 1 },
    ];
    for command in commands {
        manager.execute(command).unwrap();
    }

    let grid = manager.grid().clone();
    assert_eq!(grid.len(), 3);
    assert_eq!(grid[0], vec!["name", "age", "city", "email", "description"]);
    assert_eq!(grid[1][0], "Alice \"Wonder\" Land");
    assert_eq!(grid[2][2], "Oslo");
    assert!(grid.iter().all(|row| row.len() == 5));

    let saved = manager.text_for_saving();
    assert_eq!(
        saved,
        "name,age,city,email,description\n\
         \"Alice \"\"Wonder\"\" Land\",28,,alice@wonder.com,\"Multi\nline\"\n\
         John Doe,25,Oslo,john@example.com,Simple record"
    );

    // Undo everything back to the loaded grid.
    let mut steps = 0;
    while manager.get_undo_redo_state().can_undo {
        manager.execute(TableCommand::Undo).unwrap();
        steps += 1;
    }
    assert_eq!(steps, 5);
    assert!(!manager.get_document_state().is_modified);

    // And forward again.
    while manager.get_undo_redo_state().can_redo {
        manager.execute(TableCommand::Redo).unwrap();
    }
    assert_eq!(manager.grid(), &grid);
}

#[test]
fn test_search_returns_addresses() {
    let manager = TableStateManager::new(SAMPLE, ParseConfig::default());
    let found = find_cells(manager.grid(), "  EXAMPLE ", SearchOptions::default()).unwrap();
    assert_eq!(
        found,
        vec![CellMatch {
            row: 1,
            col: 2,
            address: "C2".to_string(),
        }]
    );

    let words = find_cells(
        manager.grid(),
        "line",
        SearchOptions {
            whole_word: true,
            ..Default::default()
        },
    )
    .unwrap();
    let addresses: Vec<_> = words.iter().map(|m| m.address.as_str()).collect();
    assert_eq!(addresses, vec!["D4"]);

    let regex = find_cells(
        manager.grid(),
        r"^\d+$",
        SearchOptions {
            regex: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(regex.len(), 3);
    assert!(regex.iter().all(|m| m.col == 1));

    for found in &regex {
        assert_eq!(parse_cell_address(&found.address), Some((found.row, found.col)));
    }
}

#[test]
fn test_column_labels_for_wide_tables() {
    let labels: Vec<_> = [0, 25, 26, 27, 51, 52, 701, 702]
        .into_iter()
        .map(column_label)
        .collect();
    assert_eq!(labels, vec!["A", "Z", "AA", "AB", "AZ", "BA", "ZZ", "AAA"]);
}

#[test]
fn test_settings_round_trip_through_json() {
    init_tracing();
    let config = ParseConfig::from_json(r#"{"delimiter":"\\t","quoteChar":"'"}"#).unwrap();
    assert_eq!(config.delimiter, Delimiter::Char('\t'));
    assert_eq!(config.quote_char, '\'');
    assert_eq!(config.escape_char, '\'');

    let mut manager = TableStateManager::new("a\t'b\tc'\n1\t2", config);
    assert_eq!(manager.grid()[0][1], "b\tc");

    manager
        .execute(TableCommand::SetCell {
            row: 1,
            col: 0,
            value: "it's".into(),
        })
        .unwrap();
    assert_eq!(manager.text_for_saving(), "a\t'b\tc'\n'it''s'\t2");

    let json = config.to_json().unwrap();
    assert_eq!(ParseConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_editing_raw_text_then_reloading() {
    let config = ParseConfig::default().with_delimiter(Delimiter::Auto);
    let mut manager = TableStateManager::new("a,b\n1,2", config);
    manager.execute(TableCommand::AddRow).unwrap();

    manager.load("x|y|z\n1|2|3\n4|5|6");
    assert_eq!(manager.delimiter(), '|');
    assert_eq!(manager.get_document_state().column_count, 3);
    assert!(!manager.get_undo_redo_state().can_undo);
    assert_eq!(manager.text_for_saving(), "x|y|z\n1|2|3\n4|5|6");
}
