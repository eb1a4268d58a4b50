//! # NORX permutation implementation
//!
//! The NORX permutation operates on a 4x4 matrix of words: 16 `u32` words
//! (512 bits) for NORX32 or 16 `u64` words (1024 bits) for NORX64. One round
//! `F` applies the `G` quarter-round to the four columns and then to the four
//! diagonals, like ChaCha but with the nonlinear `H` mix in place of addition.

use crate::STATE_WORDS;
use crate::variant::Word;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of rounds in the NORX-4-1 permutation.
pub(crate) const ROUNDS: usize = 4;

/// NORX state: 16 words, rows first. Words 0..11 are the rate, 12..15 the
/// capacity.
#[derive(Clone, Zeroize)]
pub(crate) struct State<W: Word>(pub(crate) [W; STATE_WORDS]);

impl<W: Word> Drop for State<W> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<W: Word> ZeroizeOnDrop for State<W> {}

/// Nonlinear mixing function `H(a, b) = (a ^ b) ^ ((a & b) << 1)`.
#[inline(always)]
fn h<W: Word>(a: W, b: W) -> W {
    (a ^ b) ^ ((a & b) << 1)
}

/// The `G` quarter-round over four state words.
#[inline(always)]
fn quarter_round<W: Word>(s: &mut [W; STATE_WORDS], a: usize, b: usize, c: usize, d: usize) {
    s[a] = h(s[a], s[b]);
    s[d] = (s[d] ^ s[a]).rotate_right(W::ROT[0]);
    s[c] = h(s[c], s[d]);
    s[b] = (s[b] ^ s[c]).rotate_right(W::ROT[1]);
    s[a] = h(s[a], s[b]);
    s[d] = (s[d] ^ s[a]).rotate_right(W::ROT[2]);
    s[c] = h(s[c], s[d]);
    s[b] = (s[b] ^ s[c]).rotate_right(W::ROT[3]);
}

/// One round `F`: `G` down the four columns, then along the four diagonals.
pub(crate) fn round<W: Word>(state: &mut State<W>) {
    let s = &mut state.0;

    // Column step.
    quarter_round(s, 0, 4, 8, 12);
    quarter_round(s, 1, 5, 9, 13);
    quarter_round(s, 2, 6, 10, 14);
    quarter_round(s, 3, 7, 11, 15);

    // Diagonal step.
    quarter_round(s, 0, 5, 10, 15);
    quarter_round(s, 1, 6, 11, 12);
    quarter_round(s, 2, 7, 8, 13);
    quarter_round(s, 3, 4, 9, 14);
}

/// Apply the full NORX permutation (4 rounds of `F`) to the state.
#[inline(always)]
pub(crate) fn permute<W: Word>(state: &mut State<W>) {
    for _ in 0..ROUNDS {
        round(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded<W: Word>() -> State<W> {
        let mut words = [W::default(); STATE_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = W::from(i as u32);
        }
        State(words)
    }

    #[test]
    fn norx32_round() {
        let mut state = seeded::<u32>();

        round(&mut state);

        let expected: [u32; 16] = [
            0x59191001, 0x49b78abc, 0xabbc3c0b, 0xf7052ea4, 0xeee61ad7, 0xb53a2d4c, 0xf5ef0b45,
            0x8e5d0048, 0x1616a71e, 0x11eef6fb, 0xd00f59af, 0x37c15601, 0x0e4ad52b, 0xbe183b86,
            0xa51862d5, 0x9dd8c06f,
        ];
        assert_eq!(state.0, expected);
    }

    #[test]
    fn norx32_two_rounds() {
        // Initialisation constants u0..u15 from the NORX v3.0 specification
        // (defined there as F^2 over the state 0, 1, .., 15).
        let mut state = seeded::<u32>();

        round(&mut state);
        round(&mut state);

        let expected: [u32; 16] = [
            0x0454edab, 0xac6851cc, 0xb707322f, 0xa0c7c90d, 0x99ab09ac, 0xa643466d, 0x21c22362,
            0x1230c950, 0xa3d8d930, 0x3fa8b72c, 0xed84eb49, 0xedca4787, 0x335463eb, 0xf994220b,
            0xbe0bf5c9, 0xd7c49104,
        ];
        assert_eq!(state.0, expected);
    }

    #[test]
    fn norx32_permutation() {
        let mut state = seeded::<u32>();

        permute(&mut state);

        let expected: [u32; 16] = [
            0x99a0283a, 0x16c4b42e, 0x6e7fa00b, 0x7d075c66, 0x65c1af81, 0xee254c00, 0x126631b6,
            0xf8915260, 0x083181d5, 0x85dc0152, 0x1a44a1f3, 0x7ba61b1a, 0x37dde5df, 0x078203d3,
            0x9b3c0701, 0x9ce6be37,
        ];
        assert_eq!(state.0, expected);
    }

    #[test]
    fn norx64_round() {
        let mut state = seeded::<u64>();

        round(&mut state);

        let expected: [u64; 16] = [
            0x1173b5eeac5e7899, 0x3ed23713e07c1f5c, 0x5c33d84724520313, 0x73925d3a686074d4,
            0xae176aec39425812, 0xc742c593f798cb67, 0x349f9c71b1869ff4, 0xbada11aa6b5c3482,
            0x5f5e509215d61a43, 0x349868ec7cf159c9, 0xa0d250e75b841c32, 0xb89c788b38a353b9,
            0x9300780b5ea24e37, 0xc724501211cc09d8, 0xb9c8686ad6e6425d, 0x6d6c50639b8805b5,
        ];
        assert_eq!(state.0, expected);
    }

    #[test]
    fn norx64_two_rounds() {
        // Initialisation constants u0..u15 from the NORX v3.0 specification.
        let mut state = seeded::<u64>();

        round(&mut state);
        round(&mut state);

        let expected: [u64; 16] = [
            0xe4d324772b91df79, 0x3aec9abaaeb02ccb, 0x9dfba13db4289311, 0xef9eb4bf5a97f2c8,
            0x3f466e92c1532034, 0xe6e986626cc405c1, 0xace40f3b549184e1, 0xd9cfd35762614477,
            0xb15e641748de5e6b, 0xaa95e955e10f8410, 0x28d1034441a9dd40, 0x7f31bbf964e93bf5,
            0xb5e9e22493dffb96, 0xb980c852479fafbd, 0xda24516bf55eafd4, 0x86026ae8536f1501,
        ];
        assert_eq!(state.0, expected);
    }

    #[test]
    fn norx64_permutation() {
        let mut state = seeded::<u64>();

        permute(&mut state);

        let expected: [u64; 16] = [
            0xf4350dfaf9a8e660, 0x5f9069c1dd313fb4, 0xfc9549cb4754a32b, 0x1b9e70c5e0a3834d,
            0x86afd2c9d99c3c84, 0x91f791bd6053687b, 0x34c25a26e240206a, 0xee1cf3f197bf65e1,
            0x42dd183757afd115, 0xf4df785f7fdfd2b8, 0xa504161908c66ca3, 0xf9ff4266b14b6d27,
            0x51c2049570087c45, 0xe7a9030f1879fb71, 0xb0c781485a47a757, 0x0dfe7dbf8cc878d3,
        ];
        assert_eq!(state.0, expected);
    }
}
