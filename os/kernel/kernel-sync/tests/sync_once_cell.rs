use kernel_sync::SyncOnceCell;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn set_once_then_reject() {
    let cell = SyncOnceCell::new();
    assert!(cell.get().is_none());
    assert_eq!(cell.set(7u32), Ok(&7));
    assert_eq!(cell.set(8), Err(8));
    assert_eq!(cell.get(), Some(&7));
}

#[test]
fn exactly_one_racing_set_wins() {
    let cell = Arc::new(SyncOnceCell::new());
    let start = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8usize)
        .map(|i| {
            let cell = Arc::clone(&cell);
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                cell.set(i).is_ok()
            })
        })
        .collect();

    let winners = handles.into_iter().map(|h| h.join().unwrap());
    assert_eq!(winners.filter(|won| *won).count(), 1);
    assert!(cell.get().is_some_and(|v| *v < 8));
}

#[test]
fn drops_stored_value() {
    let marker = Arc::new(());
    {
        let cell = SyncOnceCell::new();
        assert!(cell.set(Arc::clone(&marker)).is_ok());
        assert_eq!(Arc::strong_count(&marker), 2);
    }
    assert_eq!(Arc::strong_count(&marker), 1);
}
