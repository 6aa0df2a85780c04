//======================================================================
// src/sponge.rs
// Hash and MAC on top of the absorb/squeeze protocol. A MAC is the same
// construction with the key absorbed first behind a stop marker; the
// finalization tail is shared. The requested digest length is absorbed
// before squeezing, so every output length is its own function family.
//======================================================================

use digest::consts::U32;
use digest::{
    FixedOutput, FixedOutputReset, HashMarker, MacMarker, Output, OutputSizeUser, Reset, Update,
};
use zeroize::Zeroize;

use crate::state::State;

/// Shared hash/MAC tail: bind the requested length, then squeeze.
/// The stop-then-length order is fixed; changing it changes every digest.
fn finalize_digest(state: &mut State, digest: &mut [u8]) {
    debug_assert!(
        digest.len() <= usize::from(u8::MAX),
        "digest length exceeds the 8-bit length field"
    );
    state.absorb_stop();
    state.absorb_byte(digest.len() as u8);
    state.squeeze(digest);
}

/// Incremental Spritz hash with caller-chosen digest length.
///
/// Digest lengths up to 255 bytes are supported and bound into the
/// output: a 20-byte digest is not a prefix of the 32-byte one. 32 bytes
/// or more is the recommended security margin. For a drop-in
/// [`digest::Digest`] see [`SpritzHash256`].
#[derive(Clone, Zeroize)]
#[cfg_attr(feature = "wipe-on-drop", derive(zeroize::ZeroizeOnDrop))]
pub struct SpritzHash {
    state: State,
}

impl SpritzHash {
    pub fn new() -> Self {
        Self {
            state: State::new(),
        }
    }

    /// Absorbs a message chunk. Chunk boundaries do not affect the digest.
    pub fn update(&mut self, data: &[u8]) {
        self.state.absorb(data);
    }

    /// Writes the digest; the output length selects the function family.
    pub fn finalize_into(mut self, digest: &mut [u8]) {
        finalize_digest(&mut self.state, digest);
    }
}

impl Default for SpritzHash {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental Spritz MAC with caller-chosen tag length.
///
/// Structurally a [`SpritzHash`] whose key is absorbed first, separated
/// from the message by a stop marker. For a [`digest::Mac`] with
/// constant-time verification see [`SpritzMac256`].
#[derive(Clone, Zeroize)]
#[cfg_attr(feature = "wipe-on-drop", derive(zeroize::ZeroizeOnDrop))]
pub struct SpritzMac {
    inner: SpritzHash,
}

impl SpritzMac {
    pub fn new(key: &[u8]) -> Self {
        let mut inner = SpritzHash::new();
        inner.update(key);
        inner.state.absorb_stop();
        Self { inner }
    }

    pub fn update(&mut self, msg: &[u8]) {
        self.inner.update(msg);
    }

    pub fn finalize_into(mut self, tag: &mut [u8]) {
        finalize_digest(&mut self.inner.state, tag);
    }
}

/// One-shot hash.
pub fn hash(digest: &mut [u8], data: &[u8]) {
    let mut ctx = SpritzHash::new();
    ctx.update(data);
    ctx.finalize_into(digest);
}

/// One-shot MAC.
pub fn mac(tag: &mut [u8], msg: &[u8], key: &[u8]) {
    let mut ctx = SpritzMac::new(key);
    ctx.update(msg);
    ctx.finalize_into(tag);
}

//======================================================================
// Fixed 32-byte adapters for the `digest` traits.
//======================================================================

/// Spritz as a fixed 32-byte hash, usable through [`digest::Digest`].
#[derive(Clone, Zeroize)]
#[cfg_attr(feature = "wipe-on-drop", derive(zeroize::ZeroizeOnDrop))]
pub struct SpritzHash256 {
    state: State,
}

impl Default for SpritzHash256 {
    fn default() -> Self {
        Self {
            state: State::new(),
        }
    }
}

impl HashMarker for SpritzHash256 {}

impl Update for SpritzHash256 {
    fn update(&mut self, data: &[u8]) {
        self.state.absorb(data);
    }
}

impl OutputSizeUser for SpritzHash256 {
    type OutputSize = U32;
}

impl FixedOutput for SpritzHash256 {
    fn finalize_into(mut self, out: &mut Output<Self>) {
        finalize_digest(&mut self.state, out.as_mut_slice());
    }
}

impl Reset for SpritzHash256 {
    fn reset(&mut self) {
        self.state.reset();
    }
}

impl FixedOutputReset for SpritzHash256 {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        let mut state = core::mem::replace(&mut self.state, State::new());
        finalize_digest(&mut state, out.as_mut_slice());
    }
}

/// Spritz as a fixed 32-byte MAC, usable through [`digest::Mac`] for
/// constant-time tag verification. Accepts keys of any length.
#[derive(Clone, Zeroize)]
#[cfg_attr(feature = "wipe-on-drop", derive(zeroize::ZeroizeOnDrop))]
pub struct SpritzMac256 {
    state: State,
}

impl SpritzMac256 {
    pub fn new(key: &[u8]) -> Self {
        let mut state = State::new();
        state.absorb(key);
        state.absorb_stop();
        Self { state }
    }
}

impl MacMarker for SpritzMac256 {}

impl Update for SpritzMac256 {
    fn update(&mut self, msg: &[u8]) {
        self.state.absorb(msg);
    }
}

impl OutputSizeUser for SpritzMac256 {
    type OutputSize = U32;
}

impl FixedOutput for SpritzMac256 {
    fn finalize_into(mut self, out: &mut Output<Self>) {
        finalize_digest(&mut self.state, out.as_mut_slice());
    }
}
