mod common;

use common::{Arena, TestHart};
use kernel_alloc::kmem;
use kernel_sync::Hart;
use std::panic::AssertUnwindSafe;

static HART: TestHart = TestHart;

#[test]
fn global_allocator_lifecycle() {
    assert!(kmem::allocator().is_none());
    let early = std::panic::catch_unwind(kmem::kalloc);
    assert!(early.is_err());

    let arena: &'static Arena = Box::leak(Box::new(Arena::pages(8)));
    TestHart::on_cpu(0);
    let hart: &'static dyn Hart = &HART;
    let fa = unsafe { kmem::init(hart, arena.start(), arena.end()) };
    assert_eq!(fa.total_free(), 8);
    assert!(kmem::allocator().is_some());

    let a = kmem::kalloc().unwrap();
    let b = kmem::kalloc_zeroed().unwrap();
    assert_ne!(a, b);
    assert!(arena.bytes_at(b.base()).iter().all(|x| *x == 0));
    assert_eq!(fa.total_free(), 6);

    unsafe {
        kmem::kfree(a.base());
        kmem::kfree(b.base());
    }
    assert_eq!(fa.total_free(), 8);

    let again = std::panic::catch_unwind(AssertUnwindSafe(|| unsafe {
        kmem::init(hart, arena.start(), arena.end())
    }));
    assert!(again.is_err());
    assert_eq!(fa.total_free(), 8);
}
