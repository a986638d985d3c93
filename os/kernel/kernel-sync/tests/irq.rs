use kernel_sync::{Hart, PushOff, SpinLock, current_hart_id};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A single simulated hart that records every interrupt transition.
#[derive(Default)]
struct RecordingHart {
    depth: AtomicUsize,
    interrupts_on: AtomicBool,
    events: Mutex<Vec<&'static str>>,
}

impl RecordingHart {
    fn with_interrupts_on() -> Self {
        let h = Self::default();
        h.interrupts_on.store(true, Ordering::SeqCst);
        h
    }

    fn log(&self, e: &'static str) {
        self.events.lock().unwrap().push(e);
    }

    fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl Hart for RecordingHart {
    fn id(&self) -> usize {
        assert!(
            self.depth.load(Ordering::SeqCst) > 0,
            "hart id read with interrupts enabled"
        );
        3
    }

    fn push_off(&self) {
        self.interrupts_on.store(false, Ordering::SeqCst);
        self.depth.fetch_add(1, Ordering::SeqCst);
        self.log("push_off");
    }

    fn pop_off(&self) {
        let prev = self.depth.fetch_sub(1, Ordering::SeqCst);
        assert!(prev >= 1, "pop_off without push_off");
        if prev == 1 {
            self.interrupts_on.store(true, Ordering::SeqCst);
        }
        self.log("pop_off");
    }
}

#[test]
fn push_off_nests_and_restores() {
    let hart = RecordingHart::with_interrupts_on();
    {
        let outer = PushOff::new(&hart);
        assert!(!hart.interrupts_on.load(Ordering::SeqCst));
        {
            let _inner = PushOff::new(&hart);
            assert_eq!(hart.depth.load(Ordering::SeqCst), 2);
        }
        assert!(!hart.interrupts_on.load(Ordering::SeqCst));
        assert_eq!(outer.hart_id(), 3);
    }
    assert!(hart.interrupts_on.load(Ordering::SeqCst));
    assert_eq!(hart.depth.load(Ordering::SeqCst), 0);
}

#[test]
fn current_hart_id_brackets_the_read() {
    let hart = RecordingHart::with_interrupts_on();
    assert_eq!(current_hart_id(&hart), 3);
    assert_eq!(hart.events(), ["push_off", "pop_off"]);
}

#[test]
fn hart_through_trait_object() {
    let hart = RecordingHart::default();
    let dynamic: &dyn Hart = &hart;
    assert_eq!(current_hart_id(&dynamic), 3);
    assert_eq!(current_hart_id(dynamic), 3);
}

#[test]
fn lock_irq_masks_for_the_whole_critical_section() {
    let hart = RecordingHart::with_interrupts_on();
    let lock = SpinLock::named("test", 10u32);
    {
        let mut g = lock.lock_irq(&hart);
        assert!(lock.is_locked());
        assert!(!hart.interrupts_on.load(Ordering::SeqCst));
        *g += 1;
    }
    assert!(!lock.is_locked());
    assert!(hart.interrupts_on.load(Ordering::SeqCst));
    assert_eq!(*lock.lock(), 11);
}

#[test]
fn lock_irq_releases_lock_before_pop_off() {
    struct ProbeHart<'a> {
        inner: RecordingHart,
        lock: &'a SpinLock<()>,
        lock_held_at_pop: AtomicBool,
    }

    impl Hart for ProbeHart<'_> {
        fn id(&self) -> usize {
            self.inner.id()
        }
        fn push_off(&self) {
            self.inner.push_off();
        }
        fn pop_off(&self) {
            self.lock_held_at_pop
                .store(self.lock.is_locked(), Ordering::SeqCst);
            self.inner.pop_off();
        }
    }

    let lock = SpinLock::named("free list", ());
    let hart = ProbeHart {
        inner: RecordingHart::with_interrupts_on(),
        lock: &lock,
        lock_held_at_pop: AtomicBool::new(true),
    };
    drop(lock.lock_irq(&hart));
    assert!(!hart.lock_held_at_pop.load(Ordering::SeqCst));
}
