//! Little-endian primitives for edit records.
//!
//! Writers append to a `Vec<u8>` scratch buffer and cannot fail. Readers
//! consume from the front of a `&[u8]` window and report truncation as
//! [`JournalError::MalformedRecord`]. No alignment padding, no
//! self-describing schema: the record type comes from the edit list.

use strand_core::JournalError;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
#[inline]
pub fn write_u8(w: &mut Vec<u8>, v: u8) {
    w.push(v);
}

/// Write a little-endian u16.
#[inline]
pub fn write_u16_le(w: &mut Vec<u8>, v: u16) {
    w.extend_from_slice(&v.to_le_bytes());
}

/// Write a little-endian u32.
#[inline]
pub fn write_u32_le(w: &mut Vec<u8>, v: u32) {
    w.extend_from_slice(&v.to_le_bytes());
}

/// Write raw bytes with no length prefix.
#[inline]
pub fn write_bytes(w: &mut Vec<u8>, b: &[u8]) {
    w.extend_from_slice(b);
}

/// Length prefix for a run of `len` bytes.
///
/// # Panics
///
/// If `len` does not fit in a `u32`. Property values are capped at
/// that size when they are set, so a journaled run never reaches it.
pub fn length_prefix(len: usize) -> u32 {
    u32::try_from(len).expect("length-prefixed runs are capped at u32::MAX bytes")
}

/// Write a length-prefixed byte array (u32 length + bytes).
pub fn write_length_prefixed_bytes(w: &mut Vec<u8>, b: &[u8]) {
    write_u32_le(w, length_prefix(b.len()));
    w.extend_from_slice(b);
}

// ── Primitive readers ───────────────────────────────────────────

/// Split `n` bytes off the front of `r`.
pub fn read_bytes<'a>(r: &mut &'a [u8], n: usize) -> Result<&'a [u8], JournalError> {
    if r.len() < n {
        return Err(JournalError::MalformedRecord {
            detail: format!("wanted {n} bytes, {} left", r.len()),
        });
    }
    let (head, tail) = r.split_at(n);
    *r = tail;
    Ok(head)
}

/// Read a single byte.
pub fn read_u8(r: &mut &[u8]) -> Result<u8, JournalError> {
    Ok(read_bytes(r, 1)?[0])
}

/// Read a little-endian u16.
pub fn read_u16_le(r: &mut &[u8]) -> Result<u16, JournalError> {
    let mut buf = [0u8; 2];
    buf.copy_from_slice(read_bytes(r, 2)?);
    Ok(u16::from_le_bytes(buf))
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut &[u8]) -> Result<u32, JournalError> {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(read_bytes(r, 4)?);
    Ok(u32::from_le_bytes(buf))
}

/// Read a length-prefixed byte array.
pub fn read_length_prefixed_bytes<'a>(r: &mut &'a [u8]) -> Result<&'a [u8], JournalError> {
    let len = read_u32_le(r)? as usize;
    read_bytes(r, len)
}

/// Fail unless `r` has been fully consumed.
pub fn expect_end(r: &[u8]) -> Result<(), JournalError> {
    if r.is_empty() {
        Ok(())
    } else {
        Err(JournalError::MalformedRecord {
            detail: format!("{} trailing bytes", r.len()),
        })
    }
}
