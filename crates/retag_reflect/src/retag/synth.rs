use alloc::vec::Vec;
use core::alloc::Layout;
use core::ptr;

use crate::info::{FieldDescriptor, StructInfo, TypeDescriptor};
use crate::retag::cache::{DescriptorCache, Synthesized};
use crate::retag::{RetagError, Rule};

/// Walks a descriptor depth-first and derives it under one rule.
///
/// Every non-opaque descriptor goes through the cache, so nested types are
/// shared between the structs that contain them.
pub(crate) struct Synthesizer<'a> {
    cache: &'a DescriptorCache,
    rule: &'a Rule,
}

impl<'a> Synthesizer<'a> {
    pub(crate) const fn new(cache: &'a DescriptorCache, rule: &'a Rule) -> Self {
        Self { cache, rule }
    }

    pub(crate) fn derive(
        &self,
        original: &'static TypeDescriptor,
    ) -> Result<&'static TypeDescriptor, RetagError> {
        if let TypeDescriptor::Opaque(_) = original {
            return Ok(original);
        }
        self.cache
            .get_or_create(original, self.rule, || self.synthesize(original))
    }

    fn synthesize(&self, original: &'static TypeDescriptor) -> Result<Synthesized, RetagError> {
        let derived = match original {
            TypeDescriptor::Opaque(_) => None,
            TypeDescriptor::Unsupported(info) => {
                return Err(RetagError::UnsupportedFieldKind {
                    type_path: info.type_path(),
                    kind: info.kind(),
                });
            }
            TypeDescriptor::Struct(info) => return self.synthesize_struct(info),
            TypeDescriptor::Pointer(info) => {
                let pointee = self.derive(info.pointee())?;
                changed(pointee, info.pointee())
                    .then(|| TypeDescriptor::Pointer(info.with_pointee(pointee)))
            }
            TypeDescriptor::Array(info) => {
                let item = self.derive(info.item())?;
                changed(item, info.item()).then(|| TypeDescriptor::Array(info.with_item(item)))
            }
            TypeDescriptor::List(info) => {
                let item = self.derive(info.item())?;
                changed(item, info.item()).then(|| TypeDescriptor::List(info.with_item(item)))
            }
            TypeDescriptor::Map(info) => {
                let key = self.derive(info.key())?;
                let value = self.derive(info.value())?;
                (changed(key, info.key()) || changed(value, info.value()))
                    .then(|| TypeDescriptor::Map(info.with_entry(key, value)))
            }
        };

        Ok(match derived {
            Some(descriptor) => Synthesized::New(descriptor),
            None => Synthesized::Unchanged,
        })
    }

    fn synthesize_struct(&self, info: &'static StructInfo) -> Result<Synthesized, RetagError> {
        if info.field_len() == 0 {
            return Ok(Synthesized::Unchanged);
        }

        let mut fields = Vec::with_capacity(info.field_len());
        for (index, field) in info.iter().enumerate() {
            let tag = self.rule.make_tag(info, index);
            // Private fields are relabeled only; their types are not derived.
            let derived = if field.is_public() {
                field.retyped(self.derive(field.descriptor())?, tag)
            } else {
                field.anonymized(tag)
            };
            fields.push(derived);
        }

        let original = info.ty().layout();
        let derived = layout_of(&fields).unwrap_or(Layout::new::<()>());
        if derived != original {
            return Err(RetagError::LayoutInvariantViolation {
                type_path: info.type_path(),
                original,
                derived,
            });
        }

        log::debug!(
            "derived `{}` ({} fields) with {:?}",
            info.type_path(),
            fields.len(),
            self.rule
        );
        let ty = info.ty().with_layout(derived);
        Ok(Synthesized::New(TypeDescriptor::Struct(
            info.derived(fields.into_boxed_slice(), ty),
        )))
    }
}

#[inline]
fn changed(derived: &'static TypeDescriptor, original: &'static TypeDescriptor) -> bool {
    !ptr::eq(derived, original)
}

// The layout implied by the fields alone: the furthest field end, rounded
// up to the largest field alignment.
fn layout_of(fields: &[FieldDescriptor]) -> Option<Layout> {
    let mut size = 0;
    let mut align = 1;
    for field in fields {
        let layout = field.descriptor().ty().layout();
        size = size.max(field.offset().checked_add(layout.size())?);
        align = align.max(layout.align());
    }
    Layout::from_size_align(size, align)
        .ok()
        .map(|layout| layout.pad_to_align())
}
