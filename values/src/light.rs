#![allow(unsafe_code)]

use core::any::TypeId;
use core::fmt;
use core::ptr::NonNull;

/// A non-owning pointer to host data with `'static` lifetime.
///
/// The runtime stores it as an opaque light userdata. The pointee's `TypeId`
/// travels with the address so reading it back is checked: a pointer to some
/// other host type never downcasts.
#[derive(Clone, Copy)]
pub struct LightPtr {
    addr: NonNull<()>,
    type_id: TypeId,
}

impl LightPtr {
    pub fn new<T: 'static>(target: &'static T) -> Self {
        Self {
            addr: NonNull::from(target).cast(),
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn addr(&self) -> *const () {
        self.addr.as_ptr()
    }

    /// Recover the pointee if it was created from a `&'static T`.
    pub fn downcast<T: 'static>(&self) -> Option<&'static T> {
        if self.type_id != TypeId::of::<T>() {
            return None;
        }
        // SAFETY: `addr` came from a `&'static T` with this exact `TypeId`.
        Some(unsafe { &*self.addr.as_ptr().cast::<T>() })
    }
}

impl PartialEq for LightPtr {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr && self.type_id == other.type_id
    }
}

impl Eq for LightPtr {}

impl fmt::Debug for LightPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LightPtr({:p})", self.addr)
    }
}
