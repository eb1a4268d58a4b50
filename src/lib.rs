#![no_std]
#![doc = include_str!("../README.md")]

#[cfg(feature = "alloc")]
extern crate alloc;

mod aead_impl;
mod norx;
mod variant;

mod rustcrypto_aead;

pub use aead_impl::{AuthenticationFailed, Key, Nonce, Tag, decrypt_in_place, encrypt_in_place};
#[cfg(feature = "alloc")]
pub use rustcrypto_aead::Error;
pub use rustcrypto_aead::{Norx3241, Norx6441, NorxAead};
pub use variant::{Norx32, Norx64, NorxVariant, Word};

pub use aead::{self, AeadInPlace, KeyInit}; // For `NorxAead` users

/// NORX state size in words (a 4x4 matrix of `W`-bit words).
const STATE_WORDS: usize = 16;

/// NORX rate in words; the remaining four words form the capacity.
const RATE_WORDS: usize = 12;
