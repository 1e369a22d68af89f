use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use std::collections::HashMap;

use retag_ptr::Ptr;
use retag_utils::hash::hashbrown::HashMap as HashbrownMap;

use crate::impls::GenericDescriptorCell;
use crate::info::{Described, MapInfo, MapIter, TypeDescriptor};

macro_rules! impl_map {
    ($map:ident < K, V $(, $state:ident)? >) => {
        // SAFETY: a map descriptor whose access functions take this map type.
        unsafe impl<K: Described, V: Described $(, $state: 'static)?> Described for $map<K, V $(, $state)?> {
            fn descriptor() -> &'static TypeDescriptor {
                unsafe fn len<K2: 'static, V2: 'static $(, $state: 'static)?>(ptr: Ptr<'_>) -> usize {
                    // SAFETY: the descriptor is only used with values of this map type.
                    unsafe { ptr.as_ref::<$map<K2, V2 $(, $state)?>>() }.len()
                }

                unsafe fn entries<'a, K2: 'static, V2: 'static $(, $state: 'static)?>(
                    ptr: Ptr<'a>,
                ) -> MapIter<'a> {
                    // SAFETY: see `len`.
                    let map = unsafe { ptr.as_ref::<$map<K2, V2 $(, $state)?>>() };
                    Box::new(map.iter().map(|(k, v)| (Ptr::from_ref(k), Ptr::from_ref(v))))
                }

                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self>(|| {
                    // SAFETY: the access functions walk a map of `K` to `V`.
                    TypeDescriptor::Map(unsafe {
                        MapInfo::new::<Self>(
                            K::descriptor(),
                            V::descriptor(),
                            len::<K, V $(, $state)?>,
                            entries::<K, V $(, $state)?>,
                        )
                    })
                })
            }
        }
    };
}

impl_map!(BTreeMap<K, V>);
impl_map!(HashMap<K, V, S>);
impl_map!(HashbrownMap<K, V, S>);

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;

    use retag_ptr::Ptr;
    use retag_utils::hash::HashMap;

    use crate::info::Described;

    #[test]
    fn btree_entries_in_order() {
        let info = <BTreeMap<u8, u16>>::descriptor().as_map().unwrap();
        let map = BTreeMap::from([(2_u8, 20_u16), (1, 10)]);

        let ptr = Ptr::from_ref(&map);
        let entries = unsafe { (info.entries_fn())(ptr) }
            .map(|(k, v)| unsafe { (*k.as_ref::<u8>(), *v.as_ref::<u16>()) })
            .collect::<Vec<_>>();
        assert_eq!(entries, [(1, 10), (2, 20)]);
        assert_eq!(unsafe { (info.len_fn())(ptr) }, 2);
    }

    #[test]
    fn hash_maps_are_distinct() {
        let fixed = <HashMap<u8, u8>>::descriptor();
        let std = <std::collections::HashMap<u8, u8>>::descriptor();
        assert!(!core::ptr::eq(fixed, std));
        assert!(fixed.as_map().unwrap().value().type_is::<u8>());
    }
}
