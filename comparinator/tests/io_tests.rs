use comparinator::engine::{Engine, InputLists};
use comparinator::input::{read_lists, read_lists_from};
use comparinator::{Error, Session};
use mtg_common::Card;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn cards(names: &[&str]) -> Vec<Card> {
    names.iter().map(|name| Card::named(*name)).collect()
}

// Tests for reading the input lists

#[test]
fn test_read_lists_with_uneven_columns() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(
        temp_file,
        "considering,current\nBeast Whisperer,Mystic Forge\nBranch of Vitu-Ghazi,Nervous Gardener\n,Rampant Growth\n"
    )
    .unwrap();

    let lists = read_lists(temp_file.path()).unwrap();
    assert_eq!(lists.considering, vec!["Beast Whisperer", "Branch of Vitu-Ghazi"]);
    assert_eq!(lists.current, vec!["Mystic Forge", "Nervous Gardener", "Rampant Growth"]);
}

#[test]
fn test_read_lists_ignores_extra_columns_and_header_case() {
    let csv = "Notes, Current ,Considering\nfoo,Sol Ring,Mox Pearl\nbar,,  Time Walk  \n";
    let lists = read_lists_from(csv.as_bytes()).unwrap();
    assert_eq!(lists.considering, vec!["Mox Pearl", "Time Walk"]);
    assert_eq!(lists.current, vec!["Sol Ring"]);
}

#[test]
fn test_read_lists_handles_short_rows() {
    // Trailing empty cells are often dropped by spreadsheet exports
    let csv = "considering,current\nMox Pearl\nTime Walk,Sol Ring\n";
    let lists = read_lists_from(csv.as_bytes()).unwrap();
    assert_eq!(lists.considering, vec!["Mox Pearl", "Time Walk"]);
    assert_eq!(lists.current, vec!["Sol Ring"]);
}

#[test]
fn test_read_lists_quoted_names_with_commas() {
    let csv = "considering,current\n\"Borborygmos, Enraged\",\"Jace, the Mind Sculptor\"\n";
    let lists = read_lists_from(csv.as_bytes()).unwrap();
    assert_eq!(lists.considering, vec!["Borborygmos, Enraged"]);
    assert_eq!(lists.current, vec!["Jace, the Mind Sculptor"]);
}

#[test]
fn test_read_lists_missing_column() {
    let csv = "considering,kept\nMox Pearl,Sol Ring\n";
    match read_lists_from(csv.as_bytes()) {
        Err(Error::InvalidInput(msg)) => assert!(msg.contains("current")),
        other => panic!("Expected Error::InvalidInput, got: {other:?}"),
    }
}

#[test]
fn test_read_lists_empty_file() {
    let temp_file = NamedTempFile::new().unwrap();
    assert!(matches!(read_lists(temp_file.path()), Err(Error::InvalidInput(_))));
}

#[test]
fn test_read_lists_nonexistent_file() {
    let result = read_lists("/this/file/does/not/exist.csv");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_read_lists_only_headers() {
    let lists = read_lists_from("considering,current\n".as_bytes()).unwrap();
    assert!(lists.is_empty());
}

// Tests for session persistence

#[test]
fn test_session_save_and_load_mid_comparison() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("session.json");

    let engine = Engine::new(
        cards(&["Z", "W"]),
        cards(&["X", "Y"]),
        InputLists::new(["Z", "W"], ["X", "Y"]),
    )
    .unwrap();
    let mut session = Session::new(engine);
    session.engine.reject().unwrap();
    session.save(&path).unwrap();

    let loaded = Session::load(&path).unwrap();
    assert_eq!(loaded.engine, session.engine);
    assert_eq!(loaded.engine.cursor(), 1);
    assert_eq!(loaded.engine.loss_count(), 1);
    assert_eq!(loaded.engine.inputs().considering, vec!["Z", "W"]);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_session_save_overwrites_previous_state() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("session.json");

    let engine = Engine::new(cards(&["Z"]), cards(&["X"]), InputLists::default()).unwrap();
    let mut session = Session::new(engine);
    session.save(&path).unwrap();

    session.engine.force_cut().unwrap();
    session.save(&path).unwrap();

    let loaded = Session::load(&path).unwrap();
    assert!(loaded.engine.is_terminal());
    assert_eq!(loaded.engine.cut()[0].name, "Z");
    assert!(loaded.updated_at >= loaded.created_at);
}

#[test]
fn test_session_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = Session::load(&temp_dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::Session(_))));
}

#[test]
fn test_session_load_corrupt_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{{ not json").unwrap();
    assert!(matches!(Session::load(temp_file.path()), Err(Error::Json(_))));
}

#[test]
fn test_session_load_rejects_inconsistent_state() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let json = serde_json::json!({
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "engine": {
            "considering": [{ "name": "Z" }],
            "current": [{ "name": "X" }],
            "cut": [],
            "current_card_index": 5,
            "loss_count": 0
        }
    });
    write!(temp_file, "{}", json).unwrap();

    assert!(matches!(Session::load(temp_file.path()), Err(Error::Engine(_))));
}
