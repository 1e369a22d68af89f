use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

// -----------------------------------------------------------------------------
// Shared

macro_rules! impl_ptr {
    ($ptr:ident) => {
        impl $ptr<'_> {
            /// Returns the address of the pointee.
            ///
            /// Two pointers with the same address alias the same memory,
            /// whatever type descriptor they are read through.
            #[inline(always)]
            pub fn addr(&self) -> usize {
                self.0.as_ptr().addr()
            }

            #[inline(always)]
            fn debug_check<T>(&self) {
                debug_assert!(
                    self.0.as_ptr().cast::<T>().is_aligned(),
                    "{:p} is not aligned for `{}`",
                    self.0,
                    core::any::type_name::<T>(),
                );
            }
        }

        impl fmt::Pointer for $ptr<'_> {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Pointer::fmt(&self.0, f)
            }
        }

        impl fmt::Debug for $ptr<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:p})", stringify!($ptr), self.0)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Ptr

/// A shared borrow of a value whose type is known only at runtime.
///
/// It behaves like `&'a T` with `T` erased: it is `Copy`, it never dangles
/// while `'a` lasts, and the pointee must not change while it is alive. The
/// pointee's type lives in a separate descriptor, so every typed read is
/// `unsafe` and relies on that descriptor being right.
///
/// # Examples
///
/// ```
/// # use retag_ptr::Ptr;
/// let x = 8i32;
/// let ptr = Ptr::from_ref(&x);
///
/// assert_eq!(ptr.addr(), &x as *const i32 as usize);
/// assert_eq!(unsafe { *ptr.as_ref::<i32>() }, 8);
/// ```
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Ptr<'a>(NonNull<u8>, PhantomData<&'a u8>);

impl_ptr!(Ptr);

impl<'a> Ptr<'a> {
    /// Erases the type of `val`, keeping its lifetime.
    #[inline(always)]
    pub const fn from_ref<T: ?Sized>(val: &'a T) -> Ptr<'a> {
        Ptr(NonNull::from_ref(val).cast(), PhantomData)
    }

    /// Returns the raw pointer, without the lifetime.
    #[inline(always)]
    pub const fn as_ptr(self) -> *const u8 {
        self.0.as_ptr()
    }

    /// Offsets the pointer by `count` bytes, keeping the lifetime.
    ///
    /// Fields and array items are reached this way from the start of the
    /// value that contains them.
    ///
    /// # Safety
    ///
    /// The result must point to a valid value inside the same allocation,
    /// alive for `'a`.
    #[inline]
    pub const unsafe fn byte_add(self, count: usize) -> Self {
        // SAFETY: the caller keeps the result inside the allocation.
        Self(unsafe { self.0.add(count) }, PhantomData)
    }

    /// Reads the pointee as a `&'a T`.
    ///
    /// # Safety
    ///
    /// The pointee must be a valid `T`. Misalignment is caught by a debug
    /// assertion only.
    #[inline(always)]
    pub unsafe fn as_ref<T>(self) -> &'a T {
        self.debug_check::<T>();
        // SAFETY: the caller guarantees the pointee is a `T`.
        unsafe { self.0.cast::<T>().as_ref() }
    }
}

impl<'a, T: ?Sized> From<&'a T> for Ptr<'a> {
    #[inline]
    fn from(val: &'a T) -> Self {
        Self::from_ref(val)
    }
}

// -----------------------------------------------------------------------------
// PtrMut

/// An exclusive borrow of a value whose type is known only at runtime.
///
/// The erased counterpart of `&'a mut T`: it is not `Copy`, and shorter
/// borrows come from [`borrow`](Self::borrow) and [`reborrow`](Self::reborrow),
/// which keep this pointer unusable while they are alive.
///
/// # Examples
///
/// ```
/// # use retag_ptr::PtrMut;
/// let mut x = 8i32;
/// let mut ptr = PtrMut::from_mut(&mut x);
///
/// unsafe { *ptr.as_mut::<i32>() += 2 };
/// assert_eq!(unsafe { *ptr.as_ref::<i32>() }, 10);
/// ```
#[repr(transparent)]
pub struct PtrMut<'a>(NonNull<u8>, PhantomData<&'a mut u8>);

impl_ptr!(PtrMut);

impl<'a> PtrMut<'a> {
    /// Erases the type of `val`, keeping its lifetime.
    #[inline(always)]
    pub const fn from_mut<T: ?Sized>(val: &'a mut T) -> PtrMut<'a> {
        PtrMut(NonNull::from_mut(val).cast(), PhantomData)
    }

    /// Returns the raw pointer, without the lifetime.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *mut u8 {
        self.0.as_ptr()
    }

    /// Offsets the pointer by `count` bytes, keeping the lifetime.
    ///
    /// # Safety
    ///
    /// See [`Ptr::byte_add`].
    #[inline]
    pub const unsafe fn byte_add(self, count: usize) -> Self {
        // SAFETY: the caller keeps the result inside the allocation.
        Self(unsafe { self.0.add(count) }, PhantomData)
    }

    /// Reads the pointee as a `&T` borrowed from `self`.
    ///
    /// # Safety
    ///
    /// See [`Ptr::as_ref`].
    #[inline(always)]
    pub unsafe fn as_ref<T>(&self) -> &'_ T {
        self.debug_check::<T>();
        // SAFETY: the caller guarantees the pointee is a `T`.
        unsafe { self.0.cast::<T>().as_ref() }
    }

    /// Reads the pointee as a `&mut T` borrowed from `self`.
    ///
    /// # Safety
    ///
    /// See [`Ptr::as_ref`].
    #[inline(always)]
    pub unsafe fn as_mut<T>(&mut self) -> &'_ mut T {
        self.debug_check::<T>();
        // SAFETY: the caller guarantees the pointee is a `T`; `self` is exclusive.
        unsafe { self.0.cast::<T>().as_mut() }
    }

    /// Shares the pointee for a shorter lifetime.
    #[inline(always)]
    pub const fn borrow(&self) -> Ptr<'_> {
        Ptr(self.0, PhantomData)
    }

    /// Exclusively borrows the pointee for a shorter lifetime.
    #[inline(always)]
    pub const fn reborrow(&mut self) -> PtrMut<'_> {
        PtrMut(self.0, PhantomData)
    }

    /// Gives up exclusivity, keeping the lifetime.
    #[inline(always)]
    pub const fn into_ptr(self) -> Ptr<'a> {
        Ptr(self.0, PhantomData)
    }

    /// Converts into a `&'a mut T`.
    ///
    /// # Safety
    ///
    /// See [`Ptr::as_ref`].
    #[inline(always)]
    pub unsafe fn consume<T>(self) -> &'a mut T {
        self.debug_check::<T>();
        // SAFETY: the caller guarantees the pointee is a `T`; `self` is exclusive.
        unsafe { self.0.cast::<T>().as_mut() }
    }
}

impl<'a, T: ?Sized> From<&'a mut T> for PtrMut<'a> {
    #[inline]
    fn from(val: &'a mut T) -> Self {
        Self::from_mut(val)
    }
}

#[cfg(test)]
mod tests {
    use super::{Ptr, PtrMut};

    #[repr(C)]
    struct Pair {
        a: u32,
        b: u64,
    }

    #[test]
    fn field_offsets() {
        let pair = Pair { a: 1, b: 2 };
        let ptr = Ptr::from_ref(&pair);
        let b = unsafe { ptr.byte_add(core::mem::offset_of!(Pair, b)).as_ref::<u64>() };
        assert_eq!(*b, 2);
        assert_eq!(ptr.addr(), &pair as *const Pair as usize);
    }

    #[test]
    fn write_through_reborrow() {
        let mut pair = Pair { a: 1, b: 2 };
        let mut ptr = PtrMut::from_mut(&mut pair);
        {
            let field = unsafe { ptr.reborrow().byte_add(core::mem::offset_of!(Pair, a)) };
            *unsafe { field.consume::<u32>() } = 7;
        }
        assert_eq!(unsafe { ptr.as_ref::<Pair>() }.a, 7);
        assert_eq!(pair.a, 7);
        assert_eq!(pair.b, 2);
    }
}
