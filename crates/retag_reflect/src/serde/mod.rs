//! Serialization of derived views.
//!
//! [`SerializeDriver`] walks a [`DerivedRef`](crate::derived::DerivedRef)
//! through its descriptor and reads field names and `omitempty` from the
//! tags under a chosen key, the way encoders read struct tags.
//!
//! Enable the `debug` feature to append the chain of visited types to
//! serialization errors in debug builds.

mod driver;
mod error_utils;
mod map_serializer;
mod seq_serializer;
mod struct_serializer;

pub use driver::SerializeDriver;

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use retag_ptr::Ptr;

    use super::SerializeDriver;
    use crate::derived::DerivedRef;
    use crate::info::Described;

    fn to_json<T: Described>(value: &T) -> Result<String, serde_json::Error> {
        // SAFETY: the descriptor describes `T`.
        let view = unsafe { DerivedRef::new(Ptr::from_ref(value), T::descriptor()) };
        serde_json::to_string(&SerializeDriver::new(view, "json"))
    }

    #[test]
    fn containers() {
        let list: Vec<Option<i32>> = vec![Some(1), None, Some(3)];
        assert_eq!(to_json(&list).unwrap(), "[1,null,3]");

        let array = [Box::new(1.5_f64), Box::new(-2.0)];
        assert_eq!(to_json(&array).unwrap(), "[1.5,-2.0]");

        let mut map = BTreeMap::new();
        map.insert(String::from("b"), vec![2_u8]);
        map.insert(String::from("a"), vec![]);
        assert_eq!(to_json(&map).unwrap(), r#"{"a":[],"b":[2]}"#);
    }

    #[test]
    fn unsupported_kinds_fail() {
        let func: fn() = || {};
        let err = to_json(&func).unwrap_err();
        assert!(err.to_string().contains("cannot serialize Function type"));

        let raw: *const u8 = core::ptr::null();
        let err = to_json(&Some(raw)).unwrap_err();
        assert!(err.to_string().contains("RawPointer"));
    }
}
