//! References that read a value through a derived descriptor.
//!
//! [`DerivedRef`] and [`DerivedMut`] pair a type-erased pointer with a
//! [`TypeDescriptor`]. They borrow the original value for `'a`, so they
//! can never outlive it, and a [`DerivedMut`] keeps it exclusively borrowed.
//!
//! Only public fields are reachable: private fields keep their bytes in the
//! derived layout but are skipped by every accessor.

use core::any::Any;
use core::fmt;

use retag_ptr::{Ptr, PtrMut};

use crate::info::{FieldDescriptor, TypeDescriptor, TypeKind};
use crate::serde::SerializeDriver;

// -----------------------------------------------------------------------------
// DerivedRef

/// A shared reference to a value, viewed through a derived descriptor.
///
/// Created by [`convert`](crate::retag::convert).
///
/// # Examples
///
/// ```
/// use retag_reflect::derive::Described;
/// use retag_reflect::retag::{Rule, convert};
/// use retag_reflect::rules::SnakeRule;
///
/// #[derive(Described)]
/// pub struct Point {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// let point = Point { x: 1, y: 2 };
/// let view = convert(&point, &Rule::new(SnakeRule::new("json")));
///
/// assert_eq!(view.field("y").unwrap().get::<i32>(), Some(&2));
/// assert_eq!(view.field("y").unwrap().get::<u32>(), None);
/// assert_eq!(view.addr(), &point as *const Point as usize);
/// ```
#[derive(Clone, Copy)]
pub struct DerivedRef<'a> {
    ptr: Ptr<'a>,
    descriptor: &'static TypeDescriptor,
}

impl<'a> DerivedRef<'a> {
    /// Creates a reference from a pointer and the descriptor to read it with.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a valid value of the type described by
    /// `descriptor`, for the whole lifetime `'a`.
    #[inline]
    pub unsafe fn new(ptr: Ptr<'a>, descriptor: &'static TypeDescriptor) -> Self {
        Self { ptr, descriptor }
    }

    /// Returns the descriptor this value is read through.
    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Returns the [`TypeKind`] of the descriptor.
    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.descriptor.kind()
    }

    /// Returns the underlying pointer.
    #[inline]
    pub fn as_ptr(&self) -> Ptr<'a> {
        self.ptr
    }

    /// Returns the address of the value.
    #[inline]
    pub fn addr(&self) -> usize {
        self.ptr.addr()
    }

    /// Returns the value as a `&T` if it is a `T`.
    #[inline]
    pub fn get<T: Any>(&self) -> Option<&'a T> {
        // SAFETY: the descriptor says the pointee is a `T`.
        self.descriptor
            .type_is::<T>()
            .then(|| unsafe { self.ptr.as_ref::<T>() })
    }

    // SAFETY: `field` must belong to this struct's descriptor.
    unsafe fn at(&self, field: &FieldDescriptor) -> DerivedRef<'a> {
        // SAFETY: the field lies inside the struct and is described by its descriptor.
        unsafe { DerivedRef::new(self.ptr.byte_add(field.offset()), field.descriptor()) }
    }

    /// Returns the public field named `name`.
    pub fn field(&self, name: &str) -> Option<DerivedRef<'a>> {
        let info = self.descriptor.as_struct().ok()?;
        let field = info.field(name).filter(|f| f.is_public())?;
        // SAFETY: `field` comes from this struct's descriptor.
        Some(unsafe { self.at(field) })
    }

    /// Returns the field at `index`, or `None` if it is out of bounds or private.
    pub fn field_at(&self, index: usize) -> Option<DerivedRef<'a>> {
        let info = self.descriptor.as_struct().ok()?;
        let field = info.field_at(index).filter(|f| f.is_public())?;
        // SAFETY: `field` comes from this struct's descriptor.
        Some(unsafe { self.at(field) })
    }

    /// Returns the public fields with their derived descriptors, in declaration order.
    pub fn fields(
        &self,
    ) -> impl Iterator<Item = (&'static FieldDescriptor, DerivedRef<'a>)> + use<'a> {
        let this = *self;
        self.descriptor
            .as_struct()
            .ok()
            .into_iter()
            .flat_map(|info| info.iter())
            .filter(|field| field.is_public())
            // SAFETY: `field` comes from this struct's descriptor.
            .map(move |field| (field, unsafe { this.at(field) }))
    }

    /// Returns the pointee of a pointer, `None` when null or not a pointer.
    pub fn pointee(&self) -> Option<DerivedRef<'a>> {
        let info = self.descriptor.as_pointer().ok()?;
        // SAFETY: the deref function belongs to this pointer type.
        let ptr = unsafe { (info.deref_fn())(self.ptr) }?;
        // SAFETY: the pointee is described by `info.pointee()`.
        Some(unsafe { DerivedRef::new(ptr, info.pointee()) })
    }

    /// Returns the number of items of an array, list or map.
    pub fn len(&self) -> Option<usize> {
        match self.descriptor {
            TypeDescriptor::Array(info) => Some(info.capacity()),
            // SAFETY: the len functions belong to this list or map type.
            TypeDescriptor::List(info) => Some(unsafe { (info.len_fn())(self.ptr) }),
            TypeDescriptor::Map(info) => Some(unsafe { (info.len_fn())(self.ptr) }),
            _ => None,
        }
    }

    /// Returns `true` for an empty array, list or map.
    #[inline]
    pub fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }

    /// Returns the item at `index` of an array or list.
    pub fn item(&self, index: usize) -> Option<DerivedRef<'a>> {
        match self.descriptor {
            TypeDescriptor::Array(info) => {
                if index >= info.capacity() {
                    return None;
                }
                // SAFETY: `index` is in bounds, items are `stride` bytes apart.
                let ptr = unsafe { self.ptr.byte_add(index * info.stride()) };
                // SAFETY: the item is described by `info.item()`.
                Some(unsafe { DerivedRef::new(ptr, info.item()) })
            }
            TypeDescriptor::List(info) => {
                // SAFETY: the get function belongs to this list type.
                let ptr = unsafe { (info.get_fn())(self.ptr, index) }?;
                // SAFETY: the item is described by `info.item()`.
                Some(unsafe { DerivedRef::new(ptr, info.item()) })
            }
            _ => None,
        }
    }

    /// Returns the items of an array or list, empty for other kinds.
    pub fn items(&self) -> impl Iterator<Item = DerivedRef<'a>> + use<'a> {
        let this = *self;
        let len = match self.descriptor {
            TypeDescriptor::Array(_) | TypeDescriptor::List(_) => self.len().unwrap_or(0),
            _ => 0,
        };
        (0..len).filter_map(move |index| this.item(index))
    }

    /// Returns the `(key, value)` entries of a map, empty for other kinds.
    pub fn entries(
        &self,
    ) -> impl Iterator<Item = (DerivedRef<'a>, DerivedRef<'a>)> + use<'a> {
        let this = *self;
        self.descriptor
            .as_map()
            .ok()
            .into_iter()
            .flat_map(move |info| {
                let (key, value) = (info.key(), info.value());
                // SAFETY: the entries function belongs to this map type.
                unsafe { (info.entries_fn())(this.ptr) }.map(move |(k, v)| {
                    // SAFETY: keys and values are described by the map's descriptors.
                    unsafe { (DerivedRef::new(k, key), DerivedRef::new(v, value)) }
                })
            })
    }

    /// Returns a [`Serialize`](serde_core::Serialize) adapter that honors
    /// the tag values under `key`.
    #[inline]
    pub fn serialize_with<'k>(&self, key: &'k str) -> SerializeDriver<'a, 'k> {
        SerializeDriver::new(*self, key)
    }
}

impl fmt::Debug for DerivedRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedRef")
            .field("type", &self.descriptor.type_path())
            .field("kind", &self.descriptor.kind())
            .field("ptr", &self.ptr)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// DerivedMut

/// An exclusive reference to a value, viewed through a derived descriptor.
///
/// Created by [`convert_mut`](crate::retag::convert_mut).
///
/// # Examples
///
/// ```
/// use retag_reflect::derive::Described;
/// use retag_reflect::retag::{Rule, convert_mut};
/// use retag_reflect::rules::SnakeRule;
///
/// #[derive(Described)]
/// pub struct Counter {
///     pub hits: u64,
/// }
///
/// let mut counter = Counter { hits: 1 };
/// let mut view = convert_mut(&mut counter, &Rule::new(SnakeRule::new("json")));
///
/// *view.field_mut("hits").unwrap().get_mut::<u64>().unwrap() += 1;
/// assert_eq!(counter.hits, 2);
/// ```
pub struct DerivedMut<'a> {
    ptr: PtrMut<'a>,
    descriptor: &'static TypeDescriptor,
}

impl<'a> DerivedMut<'a> {
    /// Creates a reference from a pointer and the descriptor to access it with.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a valid value of the type described by
    /// `descriptor`, exclusively borrowed for the whole lifetime `'a`.
    #[inline]
    pub unsafe fn new(ptr: PtrMut<'a>, descriptor: &'static TypeDescriptor) -> Self {
        Self { ptr, descriptor }
    }

    /// Returns the descriptor this value is accessed through.
    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// Returns the [`TypeKind`] of the descriptor.
    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.descriptor.kind()
    }

    /// Returns the address of the value.
    #[inline]
    pub fn addr(&self) -> usize {
        self.ptr.addr()
    }

    /// Borrows as a shared [`DerivedRef`].
    #[inline]
    pub fn as_ref(&self) -> DerivedRef<'_> {
        // SAFETY: same value and descriptor, shared for a shorter lifetime.
        unsafe { DerivedRef::new(self.ptr.borrow(), self.descriptor) }
    }

    /// Converts into a shared [`DerivedRef`] with the same lifetime.
    #[inline]
    pub fn into_ref(self) -> DerivedRef<'a> {
        // SAFETY: same value and descriptor, downgraded to shared.
        unsafe { DerivedRef::new(self.ptr.into_ptr(), self.descriptor) }
    }

    /// Returns a shorter-lived [`DerivedMut`] to the same value.
    #[inline]
    pub fn reborrow(&mut self) -> DerivedMut<'_> {
        DerivedMut {
            ptr: self.ptr.reborrow(),
            descriptor: self.descriptor,
        }
    }

    /// Returns the value as a `&mut T` if it is a `T`.
    #[inline]
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        if !self.descriptor.type_is::<T>() {
            return None;
        }
        // SAFETY: the descriptor says the pointee is a `T`.
        Some(unsafe { self.ptr.as_mut::<T>() })
    }

    /// Converts into a `&mut T` with the same lifetime, or returns `self`
    /// if the value is not a `T`.
    pub fn into_mut<T: Any>(self) -> Result<&'a mut T, Self> {
        if !self.descriptor.type_is::<T>() {
            return Err(self);
        }
        // SAFETY: the descriptor says the pointee is a `T`.
        Ok(unsafe { self.ptr.consume::<T>() })
    }

    fn into_field(self, field: Option<&'static FieldDescriptor>) -> Option<DerivedMut<'a>> {
        let field = field.filter(|f| f.is_public())?;
        // SAFETY: the field lies inside the struct and is described by its descriptor.
        Some(unsafe { DerivedMut::new(self.ptr.byte_add(field.offset()), field.descriptor()) })
    }

    /// Returns the public field named `name`.
    pub fn field_mut(&mut self, name: &str) -> Option<DerivedMut<'_>> {
        let field = self.descriptor.as_struct().ok()?.field(name);
        self.reborrow().into_field(field)
    }

    /// Returns the field at `index`, or `None` if it is out of bounds or private.
    pub fn field_at_mut(&mut self, index: usize) -> Option<DerivedMut<'_>> {
        let field = self.descriptor.as_struct().ok()?.field_at(index);
        self.reborrow().into_field(field)
    }

    /// Converts into the public field named `name`, with the same lifetime.
    pub fn into_field_mut(self, name: &str) -> Option<DerivedMut<'a>> {
        let field = self.descriptor.as_struct().ok()?.field(name);
        self.into_field(field)
    }

    /// Returns the pointee of a pointer, `None` when null or not a pointer.
    pub fn pointee_mut(&mut self) -> Option<DerivedMut<'_>> {
        let info = self.descriptor.as_pointer().ok()?;
        // SAFETY: the deref function belongs to this pointer type.
        let ptr = unsafe { (info.deref_mut_fn())(self.ptr.reborrow()) }?;
        // SAFETY: the pointee is described by `info.pointee()`.
        Some(unsafe { DerivedMut::new(ptr, info.pointee()) })
    }

    /// Returns the item at `index` of an array or list.
    pub fn item_mut(&mut self, index: usize) -> Option<DerivedMut<'_>> {
        match self.descriptor {
            TypeDescriptor::Array(info) => {
                if index >= info.capacity() {
                    return None;
                }
                // SAFETY: `index` is in bounds, items are `stride` bytes apart.
                let ptr = unsafe { self.ptr.reborrow().byte_add(index * info.stride()) };
                // SAFETY: the item is described by `info.item()`.
                Some(unsafe { DerivedMut::new(ptr, info.item()) })
            }
            TypeDescriptor::List(info) => {
                // SAFETY: the get function belongs to this list type.
                let ptr = unsafe { (info.get_mut_fn())(self.ptr.reborrow(), index) }?;
                // SAFETY: the item is described by `info.item()`.
                Some(unsafe { DerivedMut::new(ptr, info.item()) })
            }
            _ => None,
        }
    }

    /// Returns a [`Serialize`](serde_core::Serialize) adapter that honors
    /// the tag values under `key`.
    #[inline]
    pub fn serialize_with<'k>(&self, key: &'k str) -> SerializeDriver<'_, 'k> {
        self.as_ref().serialize_with(key)
    }
}

impl fmt::Debug for DerivedMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedMut")
            .field("type", &self.descriptor.type_path())
            .field("kind", &self.descriptor.kind())
            .field("ptr", &self.ptr)
            .finish()
    }
}
