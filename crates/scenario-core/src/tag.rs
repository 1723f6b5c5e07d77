use crate::element::ElementType;
use crate::style::StyleProfile;

/// A content unit with a single integer tag slot recording its element type.
///
/// The slot is inert metadata: whatever storage carries the unit (a rich text
/// block, an AST node, a plain struct) only has to preserve the integer.
pub trait TaggedUnit {
    fn type_tag(&self) -> Option<i32>;

    fn set_type_tag(&mut self, tag: i32);
}

/// Read back the element type previously attached to `unit`.
pub fn type_of<U: TaggedUnit + ?Sized>(unit: &U) -> ElementType {
    unit.type_tag()
        .map(ElementType::from_tag)
        .unwrap_or(ElementType::Undefined)
}

/// Tag `unit` with the element type `profile` was resolved for.
pub fn attach<U: TaggedUnit + ?Sized>(unit: &mut U, profile: &StyleProfile) {
    unit.set_type_tag(profile.block_type().tag());
}

impl TaggedUnit for Option<i32> {
    fn type_tag(&self) -> Option<i32> {
        *self
    }

    fn set_type_tag(&mut self, tag: i32) {
        *self = Some(tag);
    }
}
