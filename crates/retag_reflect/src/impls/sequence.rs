use alloc::collections::VecDeque;
use alloc::vec::Vec;

use retag_ptr::{Ptr, PtrMut};

use crate::impls::GenericDescriptorCell;
use crate::info::{ArrayInfo, Described, ListInfo, TypeDescriptor};

// SAFETY: an array descriptor of `[T; N]` with the item descriptor of `T`.
unsafe impl<T: Described, const N: usize> Described for [T; N] {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| TypeDescriptor::Array(ArrayInfo::new::<T, N>(T::descriptor())))
    }
}

macro_rules! impl_list {
    ($list:ident) => {
        // SAFETY: a list descriptor whose access functions take a `$list<T>`.
        unsafe impl<T: Described> Described for $list<T> {
            fn descriptor() -> &'static TypeDescriptor {
                unsafe fn len<U: 'static>(ptr: Ptr<'_>) -> usize {
                    // SAFETY: the descriptor is only used with values of this list type.
                    unsafe { ptr.as_ref::<$list<U>>() }.len()
                }

                unsafe fn get<'a, U: 'static>(ptr: Ptr<'a>, index: usize) -> Option<Ptr<'a>> {
                    // SAFETY: see `len`.
                    unsafe { ptr.as_ref::<$list<U>>() }
                        .get(index)
                        .map(Ptr::from_ref)
                }

                unsafe fn get_mut<'a, U: 'static>(
                    ptr: PtrMut<'a>,
                    index: usize,
                ) -> Option<PtrMut<'a>> {
                    // SAFETY: see `len`.
                    unsafe { ptr.consume::<$list<U>>() }
                        .get_mut(index)
                        .map(PtrMut::from_mut)
                }

                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self>(|| {
                    // SAFETY: the access functions index a list of `T`.
                    TypeDescriptor::List(unsafe {
                        ListInfo::new::<Self>(T::descriptor(), len::<T>, get::<T>, get_mut::<T>)
                    })
                })
            }
        }
    };
}

impl_list!(Vec);
impl_list!(VecDeque);

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;
    use alloc::vec;

    use retag_ptr::Ptr;

    use crate::info::Described;

    #[test]
    fn array_stride() {
        let info = <[u32; 4]>::descriptor().as_array().unwrap();
        assert_eq!(info.capacity(), 4);
        assert_eq!(info.stride(), 4);
        assert_eq!(info.ty().size(), 16);
    }

    #[test]
    fn deque_items() {
        let info = <VecDeque<u8>>::descriptor().as_list().unwrap();
        let mut deque = VecDeque::from(vec![2_u8, 3]);
        deque.push_front(1);

        let ptr = Ptr::from_ref(&deque);
        unsafe {
            assert_eq!((info.len_fn())(ptr), 3);
            assert_eq!(*(info.get_fn())(ptr, 0).unwrap().as_ref::<u8>(), 1);
            assert!((info.get_fn())(ptr, 3).is_none());
        }
    }
}
