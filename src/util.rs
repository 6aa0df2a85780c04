//======================================================================
// src/util.rs
// Hygiene helpers: timing-safe comparison and guaranteed wiping. These
// stand alone from the cipher and are safe on any secret bytes, not
// just Spritz output.
//======================================================================

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Timing-safe equality for two byte slices.
///
/// The comparison OR-accumulates the XOR of every byte pair with no early
/// exit, so its duration is independent of where the slices differ. Two
/// empty slices are equal. Slices of different lengths compare unequal
/// without per-byte work; lengths are public here.
///
/// Use this to compare digests, tags, or password hashes.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Overwrites a value with zeros through writes the compiler is not
/// allowed to elide, even when the value is dead afterwards.
///
/// Works on byte buffers and on this crate's state handles alike:
///
/// ```
/// use spritz_cipher::{wipe, Spritz};
///
/// let mut key = *b"secret key";
/// let mut cipher = Spritz::new(&key);
/// wipe(&mut key);
/// // ... use `cipher`, then:
/// wipe(&mut cipher);
/// ```
pub fn wipe<Z: Zeroize + ?Sized>(value: &mut Z) {
    value.zeroize();
}
