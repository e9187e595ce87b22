//! Implementation of the Platform trait, for Unix.

use core::{
    alloc::Layout,
    mem,
    ptr::{self, NonNull},
};

use blockdeque_core::Platform;

/// Implementation of the Platform trait, over the C allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemPlatform;

impl SystemPlatform {
    /// Creates an instance.
    pub const fn new() -> Self { Self }
}

impl Platform for SystemPlatform {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() > 0, "Zero-sized allocations should not reach the platform");

        //  `posix_memalign` requires the alignment to be a power of 2 multiple of the size of a pointer.
        let alignment = layout.align().max(mem::size_of::<*mut libc::c_void>());

        let mut pointer: *mut libc::c_void = ptr::null_mut();

        //  Safety:
        //  -   `alignment` is a power of 2, and a multiple of the size of a pointer.
        let result = libc::posix_memalign(&mut pointer as *mut _, alignment, layout.size());

        if result != 0 {
            log::warn!("posix_memalign({}, {}) failed: {}", alignment, layout.size(), result);
            return None;
        }

        NonNull::new(pointer as *mut u8)
    }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, _layout: Layout) {
        //  Safety:
        //  -   `pointer` was allocated by `posix_memalign`, as per pre-conditions.
        libc::free(pointer.as_ptr() as *mut libc::c_void);
    }
}
