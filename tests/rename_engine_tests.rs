// Integration tests for the rename engine module

use batch_rename::models::{ErrorKind, FileId, FileItem};
use batch_rename::rename_engine::{ConfigBuilder, RenameEngine, sanitize_filename};

fn items(names: &[&str]) -> Vec<FileItem> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| FileItem::new(FileId(i as u64 + 1), format!("/photos/{name}")))
        .collect()
}

fn engine(pattern: &str) -> RenameEngine {
    let config = ConfigBuilder::new().pattern(pattern).build().unwrap();
    RenameEngine::new(config).unwrap()
}

#[test]
fn test_sanitize_filename() {
    assert_eq!(sanitize_filename("a<b>c"), "a_b_c");
    assert_eq!(sanitize_filename("plain.txt"), "plain.txt");
}

#[test]
fn test_empty_pattern_keeps_names() {
    let mut files = items(&["one.jpg", "two.jpg"]);
    engine("").preview(&mut files);

    assert!(files.iter().all(|f| !f.has_changed()));
    assert!(files.iter().all(|f| f.is_valid()));
}

#[test]
fn test_numbering_follows_order() {
    let mut files = items(&["b.JPG", "a.jpg"]);
    engine("holiday_{n}").preview(&mut files);

    assert_eq!(files[0].new_name, "holiday_01.JPG");
    assert_eq!(files[1].new_name, "holiday_02.jpg");

    files.swap(0, 1);
    engine("holiday_{n}").preview(&mut files);
    assert_eq!(files[0].original_name, "a.jpg");
    assert_eq!(files[0].new_name, "holiday_01.jpg");
}

#[test]
fn test_name_and_ext_tokens() {
    let mut files = items(&["report.PDF"]);
    engine("{n}-{name}.{ext}").preview(&mut files);
    assert_eq!(files[0].new_name, "01-report.PDF");
}

#[test]
fn test_start_number_and_padding() {
    let config = ConfigBuilder::new()
        .pattern("img{n}")
        .start_number(98)
        .build()
        .unwrap();
    let mut files = items(&["a.png", "b.png", "c.png"]);
    RenameEngine::new(config).unwrap().preview(&mut files);

    let names: Vec<_> = files.iter().map(|f| f.new_name.as_str()).collect();
    assert_eq!(names, ["img098.png", "img099.png", "img100.png"]);
}

#[test]
fn test_duplicates_flag_every_collision() {
    let mut files = items(&["a.txt", "b.txt", "c.md"]);
    engine("same").preview(&mut files);

    let kinds: Vec<_> = files.iter().map(|f| f.error.as_ref().map(|e| e.kind)).collect();
    assert_eq!(
        kinds,
        [Some(ErrorKind::Duplicate), Some(ErrorKind::Duplicate), None]
    );
    assert_eq!(
        files[0].error.as_ref().unwrap().detail,
        "Duplicate name: same.txt"
    );
}

#[test]
fn test_duplicates_ignore_case() {
    let mut files = items(&["A.txt", "a.TXT"]);
    engine("{name}").preview(&mut files);
    assert!(files.iter().all(|f| f.is_duplicate()));
}

#[test]
fn test_invalid_characters_flagged() {
    let mut files = items(&["a.txt"]);
    engine("what?").preview(&mut files);

    let error = files[0].error.as_ref().unwrap();
    assert_eq!(error.kind, ErrorKind::InvalidChars);
    assert_eq!(error.detail, "Name contains invalid characters");
}

#[test]
fn test_sanitize_replaces_instead_of_flagging() {
    let config = ConfigBuilder::new()
        .pattern("what?")
        .sanitize(true)
        .build()
        .unwrap();
    let mut files = items(&["a.txt"]);
    RenameEngine::new(config).unwrap().preview(&mut files);

    assert_eq!(files[0].new_name, "what_.txt");
    assert!(files[0].is_valid());
}

#[test]
fn test_blank_and_trailing_dot_names() {
    let mut files = items(&["a.txt"]);
    engine("   ").preview(&mut files);
    assert_eq!(files[0].error.as_ref().unwrap().kind, ErrorKind::Other);

    let mut files = items(&["README"]);
    engine("notes.").preview(&mut files);
    let error = files[0].error.as_ref().unwrap();
    assert_eq!(error.kind, ErrorKind::Other);
    assert_eq!(error.detail, "Name cannot end with a dot or space");
}

#[test]
fn test_invalid_items_not_counted_as_duplicates() {
    let mut files = items(&["a.txt", "b.txt"]);
    engine("x|y").preview(&mut files);
    assert!(files.iter().all(|f| f.error.as_ref().unwrap().kind == ErrorKind::InvalidChars));
}

#[test]
fn test_name_token_with_non_ascii_extension() {
    let mut files = items(&["ab.\u{130}"]);
    engine("{name}_x").preview(&mut files);
    assert_eq!(files[0].new_name, "ab_x.\u{130}");
}

#[test]
fn test_duplicates_fold_non_ascii_case() {
    let mut files = items(&["\u{C9}t\u{E9}.txt", "\u{E9}t\u{C9}.TXT"]);
    engine("{name}").preview(&mut files);
    assert!(files.iter().all(|f| f.is_duplicate()));
}
