//! Record layouts: named, typed fields at fixed byte offsets.
//!
//! A [`Layout`] is declared once per pool and never changes afterwards.
//! It maps each field name to an offset and a size inside the slot, and
//! carries the byte template a slot is reset to on allocation.

use indexmap::IndexMap;
use strand_core::{LayoutError, NO_INDEX};

/// Primitive type of a layout field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// A slot index (`i32`, [`NO_INDEX`] when absent).
    Index,
    /// Unsigned byte.
    U8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// Opaque byte run of the given length.
    Bytes(u16),
}

impl FieldKind {
    /// Size of the field in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::I16 => 2,
            Self::Index | Self::I32 | Self::F32 => 4,
            Self::I64 | Self::F64 => 8,
            Self::Bytes(n) => *n as usize,
        }
    }
}

/// One declared field: name, kind and resolved byte offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    offset: usize,
}

impl FieldSpec {
    /// Field name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Primitive kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Byte offset within the slot.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.kind.size()
    }

    /// Byte range covered by this field.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.size()
    }
}

/// Fixed byte layout of one record kind.
///
/// Fields are packed in declaration order with no padding; all accesses
/// go through little-endian byte conversion so alignment never matters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    fields: Vec<FieldSpec>,
    by_name: IndexMap<String, usize>,
    size: usize,
    template: Vec<u8>,
}

impl Layout {
    /// Start declaring a layout.
    pub fn builder() -> LayoutBuilder {
        LayoutBuilder::default()
    }

    /// A layout with no fields and zero size.
    pub fn empty() -> Self {
        Self {
            fields: Vec::new(),
            by_name: IndexMap::new(),
            size: 0,
            template: Vec::new(),
        }
    }

    /// Total record size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the layout declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The `i`-th declared field.
    pub fn field(&self, i: usize) -> Option<&FieldSpec> {
        self.fields.get(i)
    }

    /// Position of the field called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Look a field up by name.
    pub fn field_named(&self, name: &str) -> Option<&FieldSpec> {
        self.position(name).map(|i| &self.fields[i])
    }

    /// Append every field of `body` after the fields of `self`.
    ///
    /// Used to prefix user attribute layouts with the adjacency header a
    /// graph pool needs.
    pub fn concat(&self, body: &Layout) -> Result<Layout, LayoutError> {
        let mut builder = LayoutBuilder::default();
        for f in self.fields.iter().chain(body.fields.iter()) {
            builder = builder.field(f.name.clone(), f.kind);
        }
        builder.build()
    }

    /// Bytes a freshly allocated slot starts with: [`NO_INDEX`] in every
    /// index field, zero everywhere else.
    pub fn template(&self) -> &[u8] {
        &self.template
    }
}

/// Builder for [`Layout`].
///
/// ```
/// use strand_arena::{Layout, FieldKind};
///
/// let layout = Layout::builder()
///     .i32("id")
///     .f64("x")
///     .field("tag", FieldKind::Bytes(3))
///     .build()
///     .unwrap();
/// assert_eq!(layout.size(), 4 + 8 + 3);
/// assert_eq!(layout.field_named("x").unwrap().offset(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayoutBuilder {
    fields: Vec<(String, FieldKind)>,
}

impl LayoutBuilder {
    /// Declare a field of the given kind.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push((name.into(), kind));
        self
    }

    /// Declare a slot index field.
    pub fn index(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Index)
    }

    /// Declare a `u8` field.
    pub fn u8(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::U8)
    }

    /// Declare an `i16` field.
    pub fn i16(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::I16)
    }

    /// Declare an `i32` field.
    pub fn i32(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::I32)
    }

    /// Declare an `i64` field.
    pub fn i64(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::I64)
    }

    /// Declare an `f32` field.
    pub fn f32(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::F32)
    }

    /// Declare an `f64` field.
    pub fn f64(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::F64)
    }

    /// Resolve offsets and validate the declaration.
    pub fn build(self) -> Result<Layout, LayoutError> {
        if self.fields.len() > u16::MAX as usize {
            return Err(LayoutError::TooManyFields {
                count: self.fields.len(),
            });
        }

        let mut fields = Vec::with_capacity(self.fields.len());
        let mut by_name = IndexMap::with_capacity(self.fields.len());
        let mut offset = 0usize;
        for (name, kind) in self.fields {
            if kind.size() == 0 {
                return Err(LayoutError::ZeroSizedField { name });
            }
            if by_name.contains_key(&name) {
                return Err(LayoutError::DuplicateField { name });
            }
            by_name.insert(name.clone(), fields.len());
            fields.push(FieldSpec { name, kind, offset });
            offset += kind.size();
        }

        let mut template = vec![0u8; offset];
        for f in fields.iter().filter(|f| f.kind == FieldKind::Index) {
            template[f.range()].copy_from_slice(&NO_INDEX.to_le_bytes());
        }

        Ok(Layout {
            fields,
            by_name,
            size: offset,
            template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_packed_in_declaration_order() {
        let layout = Layout::builder()
            .index("a")
            .u8("b")
            .f64("c")
            .build()
            .unwrap();
        let offsets: Vec<_> = layout.fields().iter().map(|f| f.offset()).collect();
        assert_eq!(offsets, vec![0, 4, 5]);
        assert_eq!(layout.size(), 13);
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = Layout::builder().i32("x").f32("x").build().unwrap_err();
        assert_eq!(err, LayoutError::DuplicateField { name: "x".into() });
    }

    #[test]
    fn zero_sized_bytes_rejected() {
        let err = Layout::builder()
            .field("blob", FieldKind::Bytes(0))
            .build()
            .unwrap_err();
        assert!(matches!(err, LayoutError::ZeroSizedField { .. }));
    }

    #[test]
    fn template_marks_index_fields_absent() {
        let layout = Layout::builder().index("first").i32("n").build().unwrap();
        assert_eq!(&layout.template()[0..4], &NO_INDEX.to_le_bytes());
        assert_eq!(&layout.template()[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn concat_shifts_body_offsets() {
        let header = Layout::builder().index("next").build().unwrap();
        let body = Layout::builder().f32("w").build().unwrap();
        let full = header.concat(&body).unwrap();
        assert_eq!(full.field_named("w").unwrap().offset(), 4);
        assert_eq!(full.size(), 8);
    }

    #[test]
    fn concat_rejects_name_collision() {
        let header = Layout::builder().index("next").build().unwrap();
        let body = Layout::builder().i32("next").build().unwrap();
        assert!(header.concat(&body).is_err());
    }

    #[test]
    fn empty_layout_has_zero_size() {
        let layout = Layout::empty();
        assert!(layout.is_empty());
        assert_eq!(layout.size(), 0);
        assert_eq!(Layout::builder().build().unwrap(), layout);
    }
}
