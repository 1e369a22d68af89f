use alloc::boxed::Box;

use retag_ptr::{Ptr, PtrMut};

use crate::impls::GenericDescriptorCell;
use crate::info::{Described, PointerInfo, TypeDescriptor};

unsafe fn box_deref<'a, T: ?Sized + 'static>(ptr: Ptr<'a>) -> Option<Ptr<'a>> {
    // SAFETY: the descriptor of `Box<T>` is only used with `Box<T>` values.
    let boxed = unsafe { ptr.as_ref::<Box<T>>() };
    Some(Ptr::from_ref(&**boxed))
}

unsafe fn box_deref_mut<'a, T: ?Sized + 'static>(ptr: PtrMut<'a>) -> Option<PtrMut<'a>> {
    // SAFETY: see `box_deref`.
    let boxed = unsafe { ptr.consume::<Box<T>>() };
    Some(PtrMut::from_mut(&mut **boxed))
}

// SAFETY: a pointer descriptor whose access functions take a `Box<T>`.
unsafe impl<T: Described + ?Sized> Described for Box<T> {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            // SAFETY: the access functions dereference a `Box<T>`.
            TypeDescriptor::Pointer(unsafe {
                PointerInfo::new::<Self>(
                    T::descriptor(),
                    false,
                    box_deref::<T>,
                    box_deref_mut::<T>,
                )
            })
        })
    }
}

unsafe fn option_deref<'a, T: 'static>(ptr: Ptr<'a>) -> Option<Ptr<'a>> {
    // SAFETY: the descriptor of `Option<T>` is only used with `Option<T>` values.
    unsafe { ptr.as_ref::<Option<T>>() }
        .as_ref()
        .map(Ptr::from_ref)
}

unsafe fn option_deref_mut<'a, T: 'static>(ptr: PtrMut<'a>) -> Option<PtrMut<'a>> {
    // SAFETY: see `option_deref`.
    unsafe { ptr.consume::<Option<T>>() }
        .as_mut()
        .map(PtrMut::from_mut)
}

// SAFETY: a pointer descriptor whose access functions take an `Option<T>`.
unsafe impl<T: Described> Described for Option<T> {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| {
            // SAFETY: the access functions unwrap an `Option<T>`.
            TypeDescriptor::Pointer(unsafe {
                PointerInfo::new::<Self>(
                    T::descriptor(),
                    true,
                    option_deref::<T>,
                    option_deref_mut::<T>,
                )
            })
        })
    }
}
