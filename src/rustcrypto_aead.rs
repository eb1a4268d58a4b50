//! # RustCrypto AEAD trait implementation
//!
//! This module provides implementations of the RustCrypto `aead` traits for NORX,
//! plus an attached `seal`/`open` interface when the `alloc` feature is enabled.

use crate::variant::{Norx32, Norx64, NorxVariant};
use crate::{Key, decrypt_in_place, encrypt_in_place};
use aead::generic_array::GenericArray;
use aead::{AeadCore, AeadInPlace, KeyInit, KeySizeUser};
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "alloc")]
use crate::{AuthenticationFailed, Nonce, Tag};
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// NORX cipher implementing the RustCrypto `aead` traits, generic over the
/// [`NorxVariant`].
///
/// The RustCrypto traits carry a single associated data stream, which is absorbed
/// as the header; the trailer is left empty. For trailer authentication use the
/// `seal`/`open` interface or the detached
/// [`encrypt_in_place`](crate::encrypt_in_place) /
/// [`decrypt_in_place`](crate::decrypt_in_place) functions.
pub struct NorxAead<V: NorxVariant> {
    key: Key<V>,
}

impl<V: NorxVariant> Drop for NorxAead<V> {
    fn drop(&mut self) {
        self.key.as_mut_slice().zeroize();
    }
}

impl<V: NorxVariant> ZeroizeOnDrop for NorxAead<V> {}

impl<V: NorxVariant> KeySizeUser for NorxAead<V> {
    type KeySize = V::KeySize;
}

impl<V: NorxVariant> KeyInit for NorxAead<V> {
    fn new(key: &GenericArray<u8, Self::KeySize>) -> Self {
        Self { key: key.clone() }
    }
}

impl<V: NorxVariant> AeadCore for NorxAead<V> {
    type NonceSize = V::NonceSize;
    type TagSize = V::TagSize;
    type CiphertextOverhead = aead::consts::U0;
}

impl<V: NorxVariant> AeadInPlace for NorxAead<V> {
    #[inline]
    fn encrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> Result<GenericArray<u8, Self::TagSize>, aead::Error> {
        Ok(encrypt_in_place::<V>(
            &self.key,
            nonce,
            associated_data,
            buffer,
            &[],
        ))
    }

    #[inline]
    fn decrypt_in_place_detached(
        &self,
        nonce: &GenericArray<u8, Self::NonceSize>,
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &GenericArray<u8, Self::TagSize>,
    ) -> Result<(), aead::Error> {
        decrypt_in_place::<V>(&self.key, nonce, associated_data, buffer, &[], tag)
            .map_err(|_| aead::Error)
    }
}

/// Error type of the attached `seal`/`open` interface.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The ciphertext is shorter than the authentication tag.
    TruncatedCiphertext,
    /// The authentication tag does not match the received data.
    AuthenticationFailed,
}

#[cfg(feature = "alloc")]
impl From<AuthenticationFailed> for Error {
    fn from(_: AuthenticationFailed) -> Self {
        Error::AuthenticationFailed
    }
}

#[cfg(feature = "alloc")]
impl<V: NorxVariant> NorxAead<V> {
    /// Encrypt `plaintext`, returning the ciphertext with the authentication tag
    /// appended.
    pub fn seal(
        &self,
        nonce: &Nonce<V>,
        header: &[u8],
        plaintext: &[u8],
        trailer: &[u8],
    ) -> Vec<u8> {
        let mut output = Vec::with_capacity(plaintext.len() + V::TAG_SIZE);
        output.extend_from_slice(plaintext);

        let tag = encrypt_in_place::<V>(&self.key, nonce, header, &mut output, trailer);
        output.extend_from_slice(&tag);

        output
    }

    /// Verify and decrypt a ciphertext produced by [`seal`](Self::seal).
    ///
    /// Returns [`Error::TruncatedCiphertext`] if the input is too short to hold a
    /// tag, and [`Error::AuthenticationFailed`] if verification fails.
    pub fn open(
        &self,
        nonce: &Nonce<V>,
        header: &[u8],
        ciphertext: &[u8],
        trailer: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let split = ciphertext
            .len()
            .checked_sub(V::TAG_SIZE)
            .ok_or(Error::TruncatedCiphertext)?;
        let (data, tag) = ciphertext.split_at(split);

        let mut output = Vec::from(data);
        decrypt_in_place::<V>(
            &self.key,
            nonce,
            header,
            &mut output,
            trailer,
            Tag::<V>::from_slice(tag),
        )?;

        Ok(output)
    }
}

/// `NORX32-4-1` cipher implementing RustCrypto traits.
pub type Norx3241 = NorxAead<Norx32>;

/// `NORX64-4-1` cipher implementing RustCrypto traits.
pub type Norx6441 = NorxAead<Norx64>;
