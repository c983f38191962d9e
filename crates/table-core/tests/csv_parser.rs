//! Parsing, normalization and serialization tests.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use table_core::{
    Delimiter, Grid, ParseConfig, normalize_table_data, parse_csv, parse_table, unparse_csv,
};

fn grid(rows: &[&[&str]]) -> Grid {
    rows.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

fn parse(text: &str) -> Grid {
    parse_csv(text, &ParseConfig::default()).grid
}

#[test]
fn test_simple_comma_separated_values() {
    let result = parse("name,age,email\nJohn,25,john@example.com\nJane,30,jane@example.com");
    assert_eq!(
        result,
        grid(&[
            &["name", "age", "email"],
            &["John", "25", "john@example.com"],
            &["Jane", "30", "jane@example.com"],
        ])
    );
}

#[test]
fn test_quoted_fields_with_commas() {
    let result =
        parse("name,description\n\"John Doe\",\"A person, with comma\"\n\"Jane\",\"Normal description\"");
    assert_eq!(
        result,
        grid(&[
            &["name", "description"],
            &["John Doe", "A person, with comma"],
            &["Jane", "Normal description"],
        ])
    );
}

#[test]
fn test_escaped_quotes_inside_quoted_fields() {
    let result =
        parse("name,description\n\"Alice \"\"Wonder\"\" Land\",\"Contains \"\"quotes\"\" inside\"");
    assert_eq!(
        result,
        grid(&[
            &["name", "description"],
            &["Alice \"Wonder\" Land", "Contains \"quotes\" inside"],
        ])
    );
}

#[test]
fn test_custom_delimiters() {
    let semicolon = ParseConfig::default().with_delimiter(';');
    assert_eq!(
        parse_csv("name;age;email\nJohn;25;john@example.com", &semicolon).grid,
        grid(&[&["name", "age", "email"], &["John", "25", "john@example.com"]])
    );

    let tab = ParseConfig::default().with_delimiter(Delimiter::from_setting("\\t"));
    assert_eq!(
        parse_csv("name\tage\temail\nJohn\t25\tjohn@example.com", &tab).grid,
        grid(&[&["name", "age", "email"], &["John", "25", "john@example.com"]])
    );
}

#[test]
fn test_auto_delimiter_is_resolved() {
    let config = ParseConfig::default().with_delimiter(Delimiter::Auto);
    let output = parse_csv("a|b|c\n1|2|3", &config);
    assert_eq!(output.delimiter, '|');
    assert_eq!(output.grid, grid(&[&["a", "b", "c"], &["1", "2", "3"]]));
}

#[test]
fn test_multiline_content_within_quotes() {
    let result = parse(
        "name,description\n\"Charlie\nMulti-line\",\"This description\nspans multiple lines\"",
    );
    assert_eq!(
        result,
        grid(&[
            &["name", "description"],
            &["Charlie\nMulti-line", "This description\nspans multiple lines"],
        ])
    );
}

#[test]
fn test_empty_fields() {
    let result = parse("name,age,email\nBob,,bob@mail.com\n,40,empty@name.com");
    assert_eq!(
        result,
        grid(&[
            &["name", "age", "email"],
            &["Bob", "", "bob@mail.com"],
            &["", "40", "empty@name.com"],
        ])
    );
}

#[test]
fn test_complex_sample() {
    let text = "name,age,email,description,notes
John Doe,25,john@example.com,Simple record,No special characters
\"Jane Smith\",30,\"jane@test.com\",\"Contains, comma\",\"Normal quoted field\"
\"Alice \"\"Wonder\"\" Land\",28,alice@wonder.com,\"Contains \"\"quotes\"\" inside\",\"Escaped quotes test\"";

    let output = parse_csv(text, &ParseConfig::default());
    assert!(output.warnings.is_empty());
    assert_eq!(
        output.grid,
        grid(&[
            &["name", "age", "email", "description", "notes"],
            &["John Doe", "25", "john@example.com", "Simple record", "No special characters"],
            &["Jane Smith", "30", "jane@test.com", "Contains, comma", "Normal quoted field"],
            &[
                "Alice \"Wonder\" Land",
                "28",
                "alice@wonder.com",
                "Contains \"quotes\" inside",
                "Escaped quotes test",
            ],
        ])
    );
}

#[test]
fn test_header_and_dynamic_typing_do_not_change_output() {
    let text = "id,value\n1,2.5\n2,true";
    let plain = parse_csv(text, &ParseConfig::default());
    let flagged = parse_csv(
        text,
        &ParseConfig {
            header: true,
            dynamic_typing: true,
            ..ParseConfig::default()
        },
    );
    assert_eq!(plain, flagged);
}

#[test]
fn test_normalize_irregular_table_data() {
    let data = grid(&[
        &["name", "age", "email"],
        &["John", "25"],
        &["Jane", "30", "jane@example.com", "extra"],
    ]);
    assert_eq!(
        normalize_table_data(&data),
        grid(&[
            &["name", "age", "email", ""],
            &["John", "25", "", ""],
            &["Jane", "30", "jane@example.com", "extra"],
        ])
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(normalize_table_data(&[]), grid(&[&[""]]));

    let output = parse_table("", &ParseConfig::default());
    assert_eq!(output.grid, grid(&[&[""]]));
    assert!(!output.failed);
}

#[test]
fn test_unparse_simple_grid() {
    let data = grid(&[
        &["name", "age", "email"],
        &["John", "25", "john@example.com"],
        &["Jane", "30", "jane@example.com"],
    ]);
    assert_eq!(
        unparse_csv(&data, &ParseConfig::default()),
        "name,age,email\nJohn,25,john@example.com\nJane,30,jane@example.com"
    );
}

#[test]
fn test_unparse_auto_delimiter_writes_commas() {
    let data = grid(&[&["a", "b"]]);
    let config = ParseConfig::default().with_delimiter(Delimiter::Auto);
    assert_eq!(unparse_csv(&data, &config), "a,b");
}

#[test]
fn test_unparse_with_other_dialect() {
    let data = grid(&[&["it's", "a;b", "plain"]]);
    let config = ParseConfig::default().with_delimiter(';').with_quote_char('\'');
    assert_eq!(unparse_csv(&data, &config), "'it''s';'a;b';plain");
}

const ALPHABET: &[char] = &[
    'a', 'b', 'Z', '0', ' ', ',', ';', '\t', '|', '"', '\'', '\\', '\n', '\r', 'é', '表',
];

fn random_grid(rng: &mut StdRng) -> Grid {
    let rows = rng.gen_range(0..6);
    let raw: Grid = (0..rows)
        .map(|_| {
            let cols = rng.gen_range(0..5);
            (0..cols)
                .map(|_| {
                    let len = rng.gen_range(0..6);
                    (0..len)
                        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
                        .collect()
                })
                .collect()
        })
        .collect();
    normalize_table_data(&raw)
}

#[test]
fn test_round_trip_random_grids() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let dialects = [
        ParseConfig::default(),
        ParseConfig::default().with_delimiter(';'),
        ParseConfig::default().with_delimiter('\t'),
        ParseConfig::default().with_delimiter('|').with_quote_char('\''),
        ParseConfig::default().with_escape_char('\\'),
    ];

    for _ in 0..500 {
        let original = random_grid(&mut rng);
        for config in &dialects {
            let text = unparse_csv(&original, config);
            let output = parse_csv(&text, config);
            assert!(output.warnings.is_empty(), "warnings for {text:?}: {:?}", output.warnings);
            assert_eq!(normalize_table_data(&output.grid), original, "text: {text:?}");
        }
    }
}

#[test]
fn test_rectangularity_random_grids() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let rows = rng.gen_range(1..8);
        let raw: Grid = (0..rows)
            .map(|_| vec![String::from("x"); rng.gen_range(0..6)])
            .collect();
        let max = raw.iter().map(Vec::len).max().unwrap_or(0).max(1);

        let normalized = normalize_table_data(&raw);
        assert_eq!(normalized.len(), raw.len());
        assert!(normalized.iter().all(|row| row.len() == max));
    }
}
