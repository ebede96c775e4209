use super::*;

#[test]
fn empty_book_has_no_roles() {
    let book = FontBook::empty();
    assert!(book.is_empty());
    assert!(book.get(FontRole::Body).is_none());
}

#[test]
fn with_face_registers_role() {
    let book = FontBook::empty().with_face(FontRole::Mono, vec![1, 2, 3]);
    assert_eq!(book.roles().collect::<Vec<_>>(), vec![FontRole::Mono]);
    assert_eq!(book.get(FontRole::Mono).unwrap().bytes.len(), 3);
}

#[test]
fn from_files_reuses_serif_for_missing_styles() {
    let dir = std::path::PathBuf::from("target").join("fonts_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let serif = dir.join("serif.ttf");
    std::fs::write(&serif, b"not-a-real-font").unwrap();

    let files = FontFiles {
        serif: Some(serif),
        ..FontFiles::default()
    };
    let book = FontBook::from_files(&files).unwrap();
    assert!(book.get(FontRole::Body).is_some());
    assert!(book.get(FontRole::Title).is_some());
    assert!(book.get(FontRole::Credit).is_some());
    assert!(book.get(FontRole::Mono).is_none());
}

#[test]
fn from_files_reports_missing_file() {
    let files = FontFiles {
        mono: Some(std::path::PathBuf::from("target/definitely/missing.ttf")),
        ..FontFiles::default()
    };
    let err = FontBook::from_files(&files).unwrap_err();
    assert!(err.to_string().contains("missing.ttf"));
}

#[test]
fn empty_database_leaves_every_role_unset() {
    let book = FontBook::from_database(&Database::new());
    assert!(book.is_empty());
}

#[test]
fn any_installed_face_covers_every_role() {
    let mut db = Database::new();
    db.load_system_fonts();
    if db.is_empty() {
        eprintln!("skipping: no installed font face");
        return;
    }
    let book = FontBook::from_database(&db);
    assert_eq!(book.roles().collect::<Vec<_>>(), FontRole::ALL.to_vec());
}
