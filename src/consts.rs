//======================================================================
// src/consts.rs
// Parameters of the Spritz permutation.
//======================================================================

/// Size of the permutation table. Fixed by the construction; the nibble
/// absorption path and the wrapping `u8` cursor arithmetic both assume it.
pub(crate) const N: usize = 256;

/// Half the table: the absorption capacity and the crush pair count.
pub(crate) const N_HALF: usize = N / 2;

/// `update` calls per whip: two full table-widths of mixing.
pub(crate) const WHIP_ROUNDS: usize = 2 * N;

/// Keystream scratch size for the chunked XOR path in `stream.rs`.
pub(crate) const KEYSTREAM_CHUNK: usize = 64;
