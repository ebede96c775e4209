use super::*;

#[test]
fn second_begin_is_rejected_while_held() {
    let gate = ExportGate::new();
    let guard = gate.try_begin().unwrap();
    assert!(gate.is_busy());
    assert!(matches!(gate.try_begin(), Err(PhotoverseError::Busy)));
    drop(guard);
    assert!(!gate.is_busy());
    assert!(gate.try_begin().is_ok());
}

#[test]
fn guard_releases_on_error_path() {
    let gate = ExportGate::new();
    let run = || -> PhotoverseResult<()> {
        let _guard = gate.try_begin()?;
        Err(PhotoverseError::export("boom"))
    };
    assert!(run().is_err());
    assert!(!gate.is_busy());
}

#[test]
fn guard_releases_on_panic() {
    let gate = ExportGate::new();
    let g2 = gate.clone();
    let r = std::thread::spawn(move || {
        let _guard = g2.try_begin().unwrap();
        panic!("export crashed");
    })
    .join();
    assert!(r.is_err());
    assert!(!gate.is_busy());
}

#[test]
fn only_one_thread_wins() {
    let gate = ExportGate::new();
    let barrier = Arc::new(std::sync::Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let gate = gate.clone();
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                gate.try_begin().ok()
            })
        })
        .collect();
    let guards: Vec<_> = handles
        .into_iter()
        .filter_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(guards.len(), 1);
}
