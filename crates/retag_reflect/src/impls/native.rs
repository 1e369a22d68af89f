use alloc::string::String;

use crate::impls::NonGenericDescriptorCell;
use crate::info::{Described, OpaqueInfo, TypeDescriptor};

macro_rules! impl_opaque {
    ($($ty:ty),* $(,)?) => {$(
        // SAFETY: an opaque descriptor of `$ty` with hooks for `$ty`.
        unsafe impl Described for $ty {
            fn descriptor() -> &'static TypeDescriptor {
                static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
                CELL.get_or_init(|| {
                    TypeDescriptor::Opaque(
                        OpaqueInfo::new::<$ty>()
                            .with_serialize::<$ty>()
                            .with_is_default::<$ty>(),
                    )
                })
            }
        }
    )*};
}

impl_opaque!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
);

#[cfg(test)]
mod tests {
    use retag_ptr::Ptr;

    use crate::info::{Described, TypeKind};

    #[test]
    fn primitives_are_opaque() {
        assert_eq!(u8::descriptor().kind(), TypeKind::Opaque);
        assert_eq!(<&'static str>::descriptor().type_path(), "&str");
        assert!(core::ptr::eq(String::descriptor(), String::descriptor()));
    }

    #[test]
    fn default_hook() {
        let info = i32::descriptor().as_opaque().unwrap();
        let is_default = info.is_default_fn().unwrap();
        assert!(unsafe { is_default(Ptr::from_ref(&0_i32)) });
        assert!(!unsafe { is_default(Ptr::from_ref(&3_i32)) });
    }
}
