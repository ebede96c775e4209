use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("sink_unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn directory_sink_writes_whole_file_and_no_temp() {
    let dir = scratch("writes");
    let mut sink = DirectorySink::new(&dir);
    let a = sink.deliver("poem.png", PNG_MEDIA_TYPE, b"abc").unwrap();
    assert_eq!(a.byte_len, 3);
    assert_eq!(a.location.as_deref(), Some(dir.join("poem.png").as_path()));
    assert_eq!(std::fs::read(dir.join("poem.png")).unwrap(), b"abc");

    let names: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["poem.png".to_string()]);
}

#[test]
fn directory_sink_overwrites_previous_export() {
    let dir = scratch("overwrite");
    let mut sink = DirectorySink::new(&dir);
    sink.deliver("a.pdf", PDF_MEDIA_TYPE, b"first").unwrap();
    sink.deliver("a.pdf", PDF_MEDIA_TYPE, b"2").unwrap();
    assert_eq!(std::fs::read(dir.join("a.pdf")).unwrap(), b"2");
}

#[test]
fn directory_sink_rejects_nested_names() {
    let mut sink = DirectorySink::new(scratch("nested"));
    let err = sink.deliver("../x.png", PNG_MEDIA_TYPE, b"x").unwrap_err();
    assert!(matches!(err, PhotoverseError::Export(_)));
}

#[test]
fn unwritable_directory_is_an_export_error() {
    let dir = scratch("blocked");
    std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
    std::fs::write(&dir, b"a file, not a directory").unwrap();
    let err = DirectorySink::new(&dir)
        .deliver("p.png", PNG_MEDIA_TYPE, b"x")
        .unwrap_err();
    assert!(err.is_retryable());
    let _ = std::fs::remove_file(&dir);
}

#[test]
fn in_memory_sink_keeps_order() {
    let mut sink = InMemorySink::new();
    sink.deliver("a", PNG_MEDIA_TYPE, b"1").unwrap();
    sink.deliver("b", PDF_MEDIA_TYPE, b"22").unwrap();
    let names: Vec<&str> = sink
        .artifacts()
        .iter()
        .map(|(a, _)| a.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(sink.last().unwrap().1, b"22");
}

#[test]
fn partial_names_are_unique_per_delivery() {
    assert_ne!(partial_name("poem.png"), partial_name("poem.png"));
}

#[test]
fn concurrent_sinks_with_one_name_never_mix_bytes() {
    let dir = scratch("concurrent");
    let payloads: Vec<Vec<u8>> = (0..8u8).map(|i| vec![i; 64 * 1024]).collect();
    std::thread::scope(|s| {
        for bytes in &payloads {
            let dir = dir.clone();
            s.spawn(move || {
                DirectorySink::new(dir)
                    .deliver("same.png", PNG_MEDIA_TYPE, bytes)
                    .unwrap();
            });
        }
    });
    let out = std::fs::read(dir.join("same.png")).unwrap();
    assert!(payloads.contains(&out));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
}
