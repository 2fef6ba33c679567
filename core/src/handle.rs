//! Owning pointers as opaque handles.
//!
//! The bridge never clones, drops, or reference-counts what a handle owns. It
//! only asks whether the handle is empty and where the pointee lives.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;

/// Embedder-facing view of an owning pointer handed across the boundary.
///
/// No conversion goes through this trait. Binding code uses it to pass a
/// pointee's address along while the handle keeps ownership.
pub trait UniqueHandle {
    type Target: ?Sized;

    /// `true` when the handle owns nothing.
    fn is_null(&self) -> bool;

    /// The pointee, or `None` for a null handle.
    fn get(&self) -> Option<&Self::Target>;
}

macro_rules! impl_unique_handle {
    ($($owner:ident),+) => {$(
        impl<T: ?Sized> UniqueHandle for $owner<T> {
            type Target = T;

            fn is_null(&self) -> bool {
                false
            }

            fn get(&self) -> Option<&T> {
                Some(&**self)
            }
        }

        impl<T: ?Sized> UniqueHandle for Option<$owner<T>> {
            type Target = T;

            fn is_null(&self) -> bool {
                self.is_none()
            }

            fn get(&self) -> Option<&T> {
                self.as_deref()
            }
        }
    )+};
}

impl_unique_handle!(Box, Rc, Arc);
