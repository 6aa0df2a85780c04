#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//======================================================================
// src/lib.rs
// Crate entry point: module layout and the public surface.
//======================================================================

// --- Module declarations ---
mod consts;
mod state;

pub mod sponge;
pub mod stream;
pub mod util;

// --- Public surface ---
pub use crate::sponge::{hash, mac, SpritzHash, SpritzHash256, SpritzMac, SpritzMac256};
pub use crate::stream::Spritz;
pub use crate::util::{constant_time_eq, wipe};

// Re-export the trait crates so downstream code can name the exact
// versions this crate was built against.
pub use cipher;
pub use digest;
pub use rand_core;
pub use subtle;
pub use zeroize;
