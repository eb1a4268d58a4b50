//! # NORX variant abstraction
//!
//! NORX32-4-1 and NORX64-4-1 are the same algorithm instantiated at two word
//! widths. [`Word`] captures what the permutation and the mode need from a
//! width (rotations, the little-endian wire format), and [`NorxVariant`] ties
//! a word type to the key, nonce and tag sizes it implies.

use aead::consts::{U16, U32};
use aead::generic_array::ArrayLength;
use core::ops::{BitAnd, BitXor, BitXorAssign, Shl};
use zeroize::Zeroize;

/// A NORX word: the machine integer the 4x4 state is built from.
///
/// Implemented for `u32` (NORX32) and `u64` (NORX64).
pub trait Word:
    Copy
    + Default
    + From<u32>
    + BitXor<Output = Self>
    + BitXorAssign
    + BitAnd<Output = Self>
    + Shl<u32, Output = Self>
    + Zeroize
{
    /// Word width in bits.
    const BITS: u32;

    /// Word width in bytes.
    const BYTES: usize;

    /// Rotation offsets used by the `G` quarter-round.
    const ROT: [u32; 4];

    /// Rotate right by `n` bits.
    fn rotate_right(self, n: u32) -> Self;

    /// Read a word from little-endian bytes (`bytes` must be [`BYTES`](Self::BYTES) long).
    fn load_le(bytes: &[u8]) -> Self;

    /// Write the word as little-endian bytes (`out` must be [`BYTES`](Self::BYTES) long).
    fn store_le(self, out: &mut [u8]);
}

impl Word for u32 {
    const BITS: u32 = 32;
    const BYTES: usize = 4;
    const ROT: [u32; 4] = [8, 11, 16, 31];

    #[inline(always)]
    fn rotate_right(self, n: u32) -> Self {
        u32::rotate_right(self, n)
    }

    #[inline(always)]
    fn load_le(bytes: &[u8]) -> Self {
        let mut word = [0u8; 4];
        word.copy_from_slice(bytes);
        u32::from_le_bytes(word)
    }

    #[inline(always)]
    fn store_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }
}

impl Word for u64 {
    const BITS: u32 = 64;
    const BYTES: usize = 8;
    const ROT: [u32; 4] = [8, 19, 40, 63];

    #[inline(always)]
    fn rotate_right(self, n: u32) -> Self {
        u64::rotate_right(self, n)
    }

    #[inline(always)]
    fn load_le(bytes: &[u8]) -> Self {
        let mut word = [0u8; 8];
        word.copy_from_slice(bytes);
        u64::from_le_bytes(word)
    }

    #[inline(always)]
    fn store_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }
}

/// A NORX parameterization.
///
/// Both members of the family use 4 permutation rounds, a serial layout
/// (parallelism degree 1) and key, nonce and tag that are four words wide;
/// only the word width differs between [`Norx32`] and [`Norx64`].
pub trait NorxVariant: Clone {
    /// Word type of the state.
    type Word: Word;

    /// Key size type and const.
    type KeySize: ArrayLength<u8>;
    const KEY_SIZE: usize;

    /// Nonce size type and const.
    type NonceSize: ArrayLength<u8>;
    const NONCE_SIZE: usize;

    /// Tag size type and const.
    type TagSize: ArrayLength<u8>;
    const TAG_SIZE: usize;

    /// Bytes absorbed or squeezed per block (the 12 rate words).
    const RATE_BYTES: usize;
}

/// NORX32-4-1: 32-bit words with a 128-bit key, nonce and tag.
#[derive(Clone)]
pub struct Norx32;

impl NorxVariant for Norx32 {
    type Word = u32;

    type KeySize = U16;
    const KEY_SIZE: usize = 16;

    type NonceSize = U16;
    const NONCE_SIZE: usize = 16;

    type TagSize = U16;
    const TAG_SIZE: usize = 16;

    const RATE_BYTES: usize = 48;
}

/// NORX64-4-1: 64-bit words with a 256-bit key, nonce and tag.
#[derive(Clone)]
pub struct Norx64;

impl NorxVariant for Norx64 {
    type Word = u64;

    type KeySize = U32;
    const KEY_SIZE: usize = 32;

    type NonceSize = U32;
    const NONCE_SIZE: usize = 32;

    type TagSize = U32;
    const TAG_SIZE: usize = 32;

    const RATE_BYTES: usize = 96;
}
