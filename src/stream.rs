//======================================================================
// src/stream.rs
// The keyed Spritz handle: stream encryption through the `cipher`
// traits, plus the raw keystream surface (random bytes, bias-free
// bounded draws, mid-stream entropy folding) that makes the same state
// usable as a deterministic CSPRNG.
//======================================================================

use cipher::inout::InOutBuf;
use cipher::{StreamCipher, StreamCipherError};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::consts::KEYSTREAM_CHUNK;
use crate::state::State;

/// A Spritz state keyed for keystream output.
///
/// Construct with [`Spritz::new`] or [`Spritz::new_with_iv`], then either
/// XOR data through [`StreamCipher::apply_keystream`] or pull keystream
/// directly with the `random_*` methods. Encryption and decryption are the
/// same operation; two identically-seeded handles produce identical
/// keystreams.
///
/// Key and IV lengths are free-form; 32 bytes of key is plenty.
/// Zero-length keys are accepted and produce the construction's unkeyed
/// stream.
#[derive(Clone, Zeroize)]
#[cfg_attr(feature = "wipe-on-drop", derive(zeroize::ZeroizeOnDrop))]
pub struct Spritz {
    state: State,
}

impl Spritz {
    /// Keyed setup.
    pub fn new(key: &[u8]) -> Self {
        let mut state = State::new();
        state.absorb(key);
        if state.a != 0 {
            state.shuffle();
        }
        Self { state }
    }

    /// Keyed setup with a nonce/salt/IV, separated from the key by a stop
    /// marker. Reusing a key with a fresh IV yields an unrelated keystream.
    pub fn new_with_iv(key: &[u8], iv: &[u8]) -> Self {
        let mut state = State::new();
        state.absorb(key);
        state.absorb_stop();
        state.absorb(iv);
        if state.a != 0 {
            state.shuffle();
        }
        Self { state }
    }

    /// One byte of keystream.
    pub fn random_byte(&mut self) -> u8 {
        self.state.drip()
    }

    /// Four bytes of keystream packed little-endian: the first byte drawn
    /// is the least significant.
    pub fn random_u32(&mut self) -> u32 {
        u32::from_le_bytes([
            self.state.drip(),
            self.state.drip(),
            self.state.drip(),
            self.state.drip(),
        ])
    }

    /// A uniformly distributed draw below `upper_bound`, 0 if
    /// `upper_bound < 2`.
    ///
    /// Draws are rejected while they fall in the low region
    /// `[0, 2^32 mod upper_bound)`, which removes the modulo bias; each
    /// attempt succeeds with probability above one half, so the loop ends
    /// after fewer than two draws in expectation. Derives from OpenBSD's
    /// `arc4random_uniform()`.
    pub fn random_uniform(&mut self, upper_bound: u32) -> u32 {
        if upper_bound < 2 {
            return 0;
        }

        // 2^32 mod x == (2^32 - x) mod x
        let min = upper_bound.wrapping_neg() % upper_bound;

        loop {
            let r = self.random_u32();
            if r >= min {
                return r % upper_bound;
            }
        }
    }

    /// Folds extra seed material into the running state without resetting
    /// the cursors. The next extraction shuffles it in.
    pub fn add_entropy(&mut self, entropy: &[u8]) {
        self.state.absorb(entropy);
    }

    /// Overwrites the table and every cursor with zeros. The handle is
    /// unusable afterwards; create a new one to continue.
    pub fn wipe(&mut self) {
        self.state.zeroize();
    }
}

impl StreamCipher for Spritz {
    fn try_apply_keystream_inout(
        &mut self,
        mut buf: InOutBuf<'_, '_, u8>,
    ) -> Result<(), StreamCipherError> {
        let mut ks = [0u8; KEYSTREAM_CHUNK];

        while !buf.is_empty() {
            let n = buf.len().min(KEYSTREAM_CHUNK);
            let (mut head, rest) = buf.split_at(n);
            self.state.squeeze(&mut ks[..n]);
            head.xor_in2out(&ks[..n]);
            buf = rest;
        }

        #[cfg(feature = "wipe-temporaries")]
        ks.zeroize();

        Ok(())
    }
}

impl RngCore for Spritz {
    fn next_u32(&mut self) -> u32 {
        self.random_u32()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.random_u32());
        let hi = u64::from(self.random_u32());
        lo | (hi << 32)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.state.squeeze(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for Spritz {}
