//! Packed bit-field helpers.
//!
//! Array-valued signals (one field per bus or per port) are often carried as a
//! single flattened bit vector. A vector is stored as a slice of 32-bit words,
//! least significant word first, so that bit `n` lives in word `n / 32` at
//! position `n % 32`. Lane `i` of a vector with `width`-bit lanes occupies bits
//! `[i * width, (i + 1) * width)`.
//!
//! Accesses beyond the end of the slice read as zero and writes there are
//! dropped, mirroring wires that are simply not connected.

use super::constants::WORD_BITS;

/// Number of 32-bit storage words needed for a vector of `bits` bits.
#[inline(always)]
pub const fn words_for_bits(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS as usize)
}

/// Reads bit `bit` of the vector.
pub fn get_bit(words: &[u32], bit: usize) -> bool {
    let word = bit / WORD_BITS as usize;
    words
        .get(word)
        .is_some_and(|w| (w >> (bit % WORD_BITS as usize)) & 1 != 0)
}

/// Sets bit `bit` of the vector.
pub fn set_bit(words: &mut [u32], bit: usize) {
    if let Some(w) = words.get_mut(bit / WORD_BITS as usize) {
        *w |= 1 << (bit % WORD_BITS as usize);
    }
}

/// Clears bit `bit` of the vector.
pub fn unset_bit(words: &mut [u32], bit: usize) {
    if let Some(w) = words.get_mut(bit / WORD_BITS as usize) {
        *w &= !(1 << (bit % WORD_BITS as usize));
    }
}

/// Writes the low `width` bits of `value` at bit offset `offset`.
///
/// The field may straddle a storage-word boundary. `width` is clamped to 32.
pub fn set_sub_bits(words: &mut [u32], offset: usize, width: usize, value: u32) {
    for i in 0..width.min(WORD_BITS as usize) {
        if (value >> i) & 1 != 0 {
            set_bit(words, offset + i);
        } else {
            unset_bit(words, offset + i);
        }
    }
}

/// Reads a `width`-bit field starting at bit offset `offset`.
pub fn get_sub_bits(words: &[u32], offset: usize, width: usize) -> u32 {
    (0..width.min(WORD_BITS as usize))
        .filter(|&i| get_bit(words, offset + i))
        .fold(0, |acc, i| acc | (1 << i))
}

/// Packs `values` into a vector of `width`-bit lanes.
pub fn flatten_lanes(values: &[u32], width: usize) -> Vec<u32> {
    let mut words = vec![0; words_for_bits(values.len() * width)];
    for (lane, &value) in values.iter().enumerate() {
        set_sub_bits(&mut words, lane * width, width, value);
    }
    words
}

/// Unpacks `count` lanes of `width` bits each.
pub fn unflatten_lanes(words: &[u32], width: usize, count: usize) -> Vec<u32> {
    (0..count)
        .map(|lane| get_sub_bits(words, lane * width, width))
        .collect()
}
