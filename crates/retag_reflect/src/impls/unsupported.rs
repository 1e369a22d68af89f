use core::any::Any;
use std::sync::mpsc::{Receiver, Sender, SyncSender};

use crate::impls::{GenericDescriptorCell, NonGenericDescriptorCell};
use crate::info::{Described, TypeDescriptor, TypeKind, UnsupportedInfo};

macro_rules! impl_unsupported {
    ($kind:ident => $(impl<$($param:ident $(: ?$sized:ident)?),*> for $ty:ty;)*) => {$(
        // SAFETY: unsupported descriptors have no access functions.
        unsafe impl<$($param: $(?$sized +)? 'static),*> Described for $ty {
            fn descriptor() -> &'static TypeDescriptor {
                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeDescriptor::Unsupported(UnsupportedInfo::new::<Self>(TypeKind::$kind))
                })
            }
        }
    )*};
}

impl_unsupported!(RawPointer =>
    impl<T: ?Sized> for *const T;
    impl<T: ?Sized> for *mut T;
);

impl_unsupported!(Channel =>
    impl<T> for Sender<T>;
    impl<T> for SyncSender<T>;
    impl<T> for Receiver<T>;
);

impl_unsupported!(Function =>
    impl<R> for fn() -> R;
    impl<A, R> for fn(A) -> R;
    impl<A, B, R> for fn(A, B) -> R;
    impl<A, B, C, R> for fn(A, B, C) -> R;
);

macro_rules! impl_dynamic {
    ($($ty:ty),*) => {$(
        // SAFETY: see above.
        unsafe impl Described for $ty {
            fn descriptor() -> &'static TypeDescriptor {
                static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
                CELL.get_or_init(|| {
                    TypeDescriptor::Unsupported(UnsupportedInfo::new_unsized::<$ty>(TypeKind::Dynamic))
                })
            }
        }
    )*};
}

impl_dynamic!(dyn Any, dyn Any + Send, dyn Any + Send + Sync);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use core::any::Any;
    use std::sync::mpsc::Sender;

    use crate::info::{Described, TypeKind};

    #[test]
    fn kinds() {
        assert_eq!(<*const u8>::descriptor().kind(), TypeKind::RawPointer);
        assert_eq!(<Sender<u8>>::descriptor().kind(), TypeKind::Channel);
        assert_eq!(<fn(u8) -> bool>::descriptor().kind(), TypeKind::Function);
        assert_eq!(<dyn Any>::descriptor().kind(), TypeKind::Dynamic);
        assert!(!TypeKind::Dynamic.is_supported());
    }

    #[test]
    fn boxed_dyn_is_a_pointer_to_dynamic() {
        let info = <Box<dyn Any + Send>>::descriptor().as_pointer().unwrap();
        assert_eq!(info.pointee().kind(), TypeKind::Dynamic);
    }
}
