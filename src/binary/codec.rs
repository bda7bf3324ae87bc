//! Low-level decoding primitives shared by the IP and MAC readers.

/// Reassemble up to 4 bytes into an unsigned integer.
///
/// With `most_significant_first` the first byte ends up in the highest
/// position, otherwise the last one does.
pub fn bytes_to_uint(bytes: &[u8], most_significant_first: bool) -> u32 {
    let push = |acc: u32, b: &u8| (acc << 8) | u32::from(*b);
    if most_significant_first {
        bytes.iter().fold(0, push)
    } else {
        bytes.iter().rev().fold(0, push)
    }
}

/// Reinterpret 4 little-endian bytes as an IEEE-754 single-precision float.
pub fn decode_f32_le(bytes: [u8; 4]) -> f32 {
    f32::from_bits(bytes_to_uint(&bytes, false))
}

/// Read a NUL-terminated string starting at `start`.
///
/// Stops at the first zero byte, after `max_len` bytes, or at the end of the
/// buffer, whichever comes first. Each byte maps to one character.
/// Returns `None` when `start` lies beyond the buffer.
pub fn read_cstring(buffer: &[u8], start: usize, max_len: usize) -> Option<String> {
    let tail = buffer.get(start..)?;
    Some(
        tail.iter()
            .take(max_len)
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect(),
    )
}
