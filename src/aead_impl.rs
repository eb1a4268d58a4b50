//! # NORX AEAD implementation
//!
//! This module implements the NORX-4-1 authenticated encryption with associated data
//! (AEAD) cipher family as a duplexed sponge over the NORX permutation. NORX
//! authenticates two optional cleartext streams, a header ahead of the payload and a
//! trailer after it, each separated from the payload by a domain tag.
//!
//! # Usage
//!
//! This module provides `no_std`-compatible in-place encryption/decryption:
//!
//! ```
//! use norx_crypto::{Key, Nonce, Norx32, decrypt_in_place, encrypt_in_place};
//!
//! let key = Key::<Norx32>::from([0u8; 16]);
//! let nonce = Nonce::<Norx32>::from([1u8; 16]);
//! let mut data = *b"Secret message";
//!
//! // Encrypt in-place, authenticating the header and trailer alongside.
//! let tag = encrypt_in_place::<Norx32>(&key, &nonce, b"header", &mut data, b"trailer");
//!
//! // Decrypt in-place with authentication.
//! decrypt_in_place::<Norx32>(&key, &nonce, b"header", &mut data, b"trailer", &tag)
//!     .expect("authentication failed");
//!
//! assert_eq!(&data, b"Secret message");
//! ```
//!
//! For the RustCrypto traits and the attached `seal`/`open` interface, use
//! [`NorxAead`](crate::NorxAead).

use crate::norx::{ROUNDS, State, permute, round};
use crate::variant::{NorxVariant, Word};
use crate::{RATE_WORDS, STATE_WORDS};
use aead::generic_array::GenericArray;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

/// Key sized for the NORX variant (four words: 16 bytes for NORX32, 32 bytes
/// for NORX64).
pub type Key<V> = GenericArray<u8, <V as NorxVariant>::KeySize>;

/// Nonce sized for the NORX variant (four words).
pub type Nonce<V> = GenericArray<u8, <V as NorxVariant>::NonceSize>;

/// Authentication tag sized for the NORX variant (four words).
pub type Tag<V> = GenericArray<u8, <V as NorxVariant>::TagSize>;

/// Authentication tag verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticationFailed;

/// Degree of parallelism of the mode; this implementation is the serial,
/// single-lane NORX.
const PARALLELISM: u32 = 1;

/// Largest rate across the variants (NORX64: 12 words of 8 bytes). Scratch
/// blocks are sized to this and sliced down to the active variant's rate.
const MAX_RATE_BYTES: usize = 96;

/// Domain separation tags, folded into the last capacity word before the
/// permutation of each processed block.
#[derive(Clone, Copy)]
#[repr(u32)]
enum Domain {
    /// Associated data ahead of the payload.
    Header = 0x01,
    /// The encrypted payload itself.
    Payload = 0x02,
    /// Associated data after the payload.
    Trailer = 0x04,
    /// Tag extraction.
    Final = 0x08,
}

/// Parse the key into words; the copy is wiped when dropped.
fn load_key<V: NorxVariant>(key: &Key<V>) -> Zeroizing<[V::Word; 4]> {
    let mut words = Zeroizing::new([V::Word::default(); 4]);
    for (word, piece) in words.iter_mut().zip(key.chunks_exact(V::Word::BYTES)) {
        *word = V::Word::load_le(piece);
    }
    words
}

/// Initialize the NORX state from the key words and the nonce.
fn initialize<V: NorxVariant>(key: &[V::Word; 4], nonce: &Nonce<V>) -> State<V::Word> {
    let mut words = [V::Word::default(); STATE_WORDS];
    for (i, word) in words.iter_mut().enumerate() {
        *word = V::Word::from(i as u32);
    }
    let mut state = State(words);

    // Two rounds over the 0..15 seed yield the initialisation constants.
    round(&mut state);
    round(&mut state);

    for (word, piece) in state.0[..4]
        .iter_mut()
        .zip(nonce.chunks_exact(V::Word::BYTES))
    {
        *word = V::Word::load_le(piece);
    }
    state.0[4..8].copy_from_slice(key);

    // Inject the instance parameters: word width, round count, parallelism
    // degree and tag bits.
    state.0[12] ^= V::Word::from(V::Word::BITS);
    state.0[13] ^= V::Word::from(ROUNDS as u32);
    state.0[14] ^= V::Word::from(PARALLELISM);
    state.0[15] ^= V::Word::from((V::TAG_SIZE * 8) as u32);

    permute(&mut state);

    for (word, k) in state.0[12..].iter_mut().zip(key.iter()) {
        *word ^= *k;
    }

    state
}

/// Multi-rate padding: `data || 0x01 || 0x00..` with `0x80` folded into the
/// final byte of the block.
fn pad(block: &mut [u8], data: &[u8]) {
    block[..data.len()].copy_from_slice(data);
    block[data.len()] = 0x01;
    let last = block.len() - 1;
    block[last] |= 0x80;
}

/// XOR one whole rate block into the state under the given domain tag.
fn absorb_block<V: NorxVariant>(state: &mut State<V::Word>, block: &[u8], domain: Domain) {
    state.0[15] ^= V::Word::from(domain as u32);
    permute(state);

    for (word, piece) in state.0[..RATE_WORDS]
        .iter_mut()
        .zip(block.chunks_exact(V::Word::BYTES))
    {
        *word ^= V::Word::load_le(piece);
    }
}

/// Absorb an authenticated-only stream (header or trailer).
fn absorb<V: NorxVariant>(state: &mut State<V::Word>, data: &[u8], domain: Domain) {
    // An empty stream is absorbed as nothing at all, not as a padded block.
    if data.is_empty() {
        return;
    }

    let mut iter = data.chunks_exact(V::RATE_BYTES);
    for chunk in iter.by_ref() {
        absorb_block::<V>(state, chunk, domain);
    }

    // The last block is always padded, even when the data is a whole number
    // of blocks.
    let mut block = Zeroizing::new([0u8; MAX_RATE_BYTES]);
    let block = &mut block[..V::RATE_BYTES];
    pad(block, iter.remainder());
    absorb_block::<V>(state, block, domain);
}

/// Encrypt one whole rate block in-place, feeding the ciphertext back into
/// the state.
fn encrypt_block<V: NorxVariant>(state: &mut State<V::Word>, chunk: &mut [u8]) {
    state.0[15] ^= V::Word::from(Domain::Payload as u32);
    permute(state);

    for (word, piece) in state.0[..RATE_WORDS]
        .iter_mut()
        .zip(chunk.chunks_exact_mut(V::Word::BYTES))
    {
        *word ^= V::Word::load_le(piece);
        word.store_le(piece);
    }
}

/// Encrypt the payload in-place.
fn encrypt_data<V: NorxVariant>(state: &mut State<V::Word>, buffer: &mut [u8]) {
    if buffer.is_empty() {
        return;
    }

    let mut iter = buffer.chunks_exact_mut(V::RATE_BYTES);
    for chunk in &mut iter {
        encrypt_block::<V>(state, chunk);
    }

    // Pad the final partial block, encrypt it whole, and emit only the bytes
    // that carry plaintext.
    let remainder = iter.into_remainder();
    let mut block = Zeroizing::new([0u8; MAX_RATE_BYTES]);
    let block = &mut block[..V::RATE_BYTES];
    pad(block, remainder);
    encrypt_block::<V>(state, block);
    remainder.copy_from_slice(&block[..remainder.len()]);
}

/// Decrypt one whole rate block in-place, feeding the ciphertext back into
/// the state.
fn decrypt_block<V: NorxVariant>(state: &mut State<V::Word>, chunk: &mut [u8]) {
    state.0[15] ^= V::Word::from(Domain::Payload as u32);
    permute(state);

    for (word, piece) in state.0[..RATE_WORDS]
        .iter_mut()
        .zip(chunk.chunks_exact_mut(V::Word::BYTES))
    {
        let ciphertext = V::Word::load_le(piece);
        (*word ^ ciphertext).store_le(piece);
        *word = ciphertext;
    }
}

/// Decrypt the final, partial block.
///
/// Encryption pads the final plaintext block to a whole rate block but only
/// transmits the prefix that carries plaintext. The rest of that block is
/// reconstructed here from the keystream, with the padding XORed back in, so
/// that the state absorbs the exact block encryption produced.
fn decrypt_lastblock<V: NorxVariant>(state: &mut State<V::Word>, chunk: &mut [u8]) {
    state.0[15] ^= V::Word::from(Domain::Payload as u32);
    permute(state);

    let mut block = Zeroizing::new([0u8; MAX_RATE_BYTES]);
    let block = &mut block[..V::RATE_BYTES];
    for (word, piece) in state.0[..RATE_WORDS]
        .iter()
        .zip(block.chunks_exact_mut(V::Word::BYTES))
    {
        word.store_le(piece);
    }

    block[..chunk.len()].copy_from_slice(chunk);
    block[chunk.len()] ^= 0x01;
    block[V::RATE_BYTES - 1] ^= 0x80;

    for (word, piece) in state.0[..RATE_WORDS]
        .iter_mut()
        .zip(block.chunks_exact_mut(V::Word::BYTES))
    {
        let ciphertext = V::Word::load_le(piece);
        (*word ^ ciphertext).store_le(piece);
        *word = ciphertext;
    }

    chunk.copy_from_slice(&block[..chunk.len()]);
}

/// Decrypt the payload in-place.
fn decrypt_data<V: NorxVariant>(state: &mut State<V::Word>, buffer: &mut [u8]) {
    if buffer.is_empty() {
        return;
    }

    let mut iter = buffer.chunks_exact_mut(V::RATE_BYTES);
    for chunk in &mut iter {
        decrypt_block::<V>(state, chunk);
    }
    decrypt_lastblock::<V>(state, iter.into_remainder());
}

/// Finalize the state and squeeze the tag from the capacity words.
fn finalize<V: NorxVariant>(state: &mut State<V::Word>, key: &[V::Word; 4]) -> Tag<V> {
    state.0[15] ^= V::Word::from(Domain::Final as u32);
    permute(state);

    // The key is injected into the capacity twice more, with a permutation
    // in between.
    for (word, k) in state.0[12..].iter_mut().zip(key.iter()) {
        *word ^= *k;
    }
    permute(state);
    for (word, k) in state.0[12..].iter_mut().zip(key.iter()) {
        *word ^= *k;
    }

    let mut tag = Tag::<V>::default();
    for (word, piece) in state.0[12..]
        .iter()
        .zip(tag.chunks_exact_mut(V::Word::BYTES))
    {
        word.store_le(piece);
    }
    tag
}

/// Encrypt plaintext using NORX (in-place)
///
/// Encrypts the data in `buffer` in-place, authenticating `header` and
/// `trailer` alongside it, and returns the authentication tag. The buffer
/// contains plaintext on input and ciphertext of the same length on output.
#[must_use]
pub fn encrypt_in_place<V: NorxVariant>(
    key: &Key<V>,
    nonce: &Nonce<V>,
    header: &[u8],
    buffer: &mut [u8],
    trailer: &[u8],
) -> Tag<V> {
    let key_words = load_key::<V>(key);
    let mut state = initialize::<V>(&key_words, nonce);

    absorb::<V>(&mut state, header, Domain::Header);
    encrypt_data::<V>(&mut state, buffer);
    absorb::<V>(&mut state, trailer, Domain::Trailer);

    finalize::<V>(&mut state, &key_words)
}

/// Decrypt ciphertext using NORX (in-place)
///
/// Decrypts the data in `buffer` in-place if authentication succeeds. The
/// buffer contains ciphertext on input and plaintext on output. On
/// authentication failure the buffer is zeroed instead, so no unverified
/// plaintext is ever released.
pub fn decrypt_in_place<V: NorxVariant>(
    key: &Key<V>,
    nonce: &Nonce<V>,
    header: &[u8],
    buffer: &mut [u8],
    trailer: &[u8],
    tag: &Tag<V>,
) -> Result<(), AuthenticationFailed> {
    let key_words = load_key::<V>(key);
    let mut state = initialize::<V>(&key_words, nonce);

    absorb::<V>(&mut state, header, Domain::Header);
    decrypt_data::<V>(&mut state, buffer);
    absorb::<V>(&mut state, trailer, Domain::Trailer);

    let mut computed = finalize::<V>(&mut state, &key_words);

    // Verify the tag using constant-time comparison.
    let verdict = computed.ct_eq(tag);
    computed.as_mut_slice().zeroize();

    if verdict.into() {
        Ok(())
    } else {
        buffer.zeroize();
        Err(AuthenticationFailed)
    }
}
