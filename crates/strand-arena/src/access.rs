//! Typed field access over raw slot bytes.
//!
//! [`SlotView`] and [`SlotViewMut`] borrow one slot of a pool and read or
//! write little-endian primitives at byte offsets taken from a
//! [`Layout`](crate::Layout). Offsets are trusted: an offset past the end
//! of the slot panics on the slice bounds check.

use strand_core::PoolIndex;

macro_rules! getters {
    ($($(#[$meta:meta])* $name:ident -> $ty:ty;)*) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name(&self, offset: usize) -> $ty {
                const N: usize = std::mem::size_of::<$ty>();
                let mut buf = [0u8; N];
                buf.copy_from_slice(&self.bytes[offset..offset + N]);
                <$ty>::from_le_bytes(buf)
            }
        )*
    };
}

macro_rules! putters {
    ($($(#[$meta:meta])* $name:ident($ty:ty);)*) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name(&mut self, offset: usize, value: $ty) {
                const N: usize = std::mem::size_of::<$ty>();
                self.bytes[offset..offset + N].copy_from_slice(&value.to_le_bytes());
            }
        )*
    };
}

/// Read-only view of one slot.
#[derive(Clone, Copy, Debug)]
pub struct SlotView<'a> {
    bytes: &'a [u8],
}

impl<'a> SlotView<'a> {
    /// Wrap raw slot bytes.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    getters! {
        /// Read a `u8`.
        get_u8 -> u8;
        /// Read a little-endian `i16`.
        get_i16 -> i16;
        /// Read a little-endian `i32`.
        get_i32 -> i32;
        /// Read a little-endian `i64`.
        get_i64 -> i64;
        /// Read a little-endian `u32`.
        get_u32 -> u32;
        /// Read a little-endian `f32`.
        get_f32 -> f32;
        /// Read a little-endian `f64`.
        get_f64 -> f64;
    }

    /// Read a raw index field.
    #[inline]
    pub fn get_index(&self, offset: usize) -> i32 {
        self.get_i32(offset)
    }

    /// Read an index field as a typed index, `None` for [`NO_INDEX`](strand_core::NO_INDEX).
    #[inline]
    pub fn get_typed<I: PoolIndex>(&self, offset: usize) -> Option<I> {
        I::from_stored(self.get_index(offset))
    }

    /// Borrow `len` bytes starting at `offset`.
    #[inline]
    pub fn bytes(&self, offset: usize, len: usize) -> &'a [u8] {
        &self.bytes[offset..offset + len]
    }

    /// The whole slot.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// Mutable view of one slot.
#[derive(Debug)]
pub struct SlotViewMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> SlotViewMut<'a> {
    /// Wrap raw slot bytes.
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> SlotView<'_> {
        SlotView::new(self.bytes)
    }

    getters! {
        /// Read a `u8`.
        get_u8 -> u8;
        /// Read a little-endian `i16`.
        get_i16 -> i16;
        /// Read a little-endian `i32`.
        get_i32 -> i32;
        /// Read a little-endian `i64`.
        get_i64 -> i64;
        /// Read a little-endian `u32`.
        get_u32 -> u32;
        /// Read a little-endian `f32`.
        get_f32 -> f32;
        /// Read a little-endian `f64`.
        get_f64 -> f64;
    }

    putters! {
        /// Write a `u8`.
        put_u8(u8);
        /// Write a little-endian `i16`.
        put_i16(i16);
        /// Write a little-endian `i32`.
        put_i32(i32);
        /// Write a little-endian `i64`.
        put_i64(i64);
        /// Write a little-endian `u32`.
        put_u32(u32);
        /// Write a little-endian `f32`.
        put_f32(f32);
        /// Write a little-endian `f64`.
        put_f64(f64);
    }

    /// Read a raw index field.
    #[inline]
    pub fn get_index(&self, offset: usize) -> i32 {
        self.get_i32(offset)
    }

    /// Write a raw index field.
    #[inline]
    pub fn put_index(&mut self, offset: usize, value: i32) {
        self.put_i32(offset, value);
    }

    /// Read an index field as a typed index.
    #[inline]
    pub fn get_typed<I: PoolIndex>(&self, offset: usize) -> Option<I> {
        I::from_stored(self.get_index(offset))
    }

    /// Write a typed index field, [`NO_INDEX`](strand_core::NO_INDEX) for `None`.
    #[inline]
    pub fn put_typed<I: PoolIndex>(&mut self, offset: usize, value: Option<I>) {
        self.put_index(offset, I::to_stored(value));
    }

    /// Borrow `len` bytes starting at `offset`.
    #[inline]
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.bytes[offset..offset + len]
    }

    /// Overwrite bytes starting at `offset`.
    #[inline]
    pub fn put_bytes(&mut self, offset: usize, src: &[u8]) {
        self.bytes[offset..offset + src.len()].copy_from_slice(src);
    }
}
