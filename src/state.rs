//======================================================================
// src/state.rs
// The Spritz permutation engine: a 256-entry byte permutation plus six
// cursors, mutated only by swaps so the table stays a bijection. The
// absorb/squeeze protocol on top of it is what stream.rs and sponge.rs
// build their public surfaces from.
//======================================================================

use cfg_if::cfg_if;
use zeroize::Zeroize;

use crate::consts::{N, N_HALF, WHIP_ROUNDS};

/// Low-level Spritz state. Not exposed: the public handles in `stream`
/// and `sponge` own one of these and enforce the setup protocol around it.
#[derive(Clone, Zeroize)]
#[cfg_attr(feature = "wipe-on-drop", derive(zeroize::ZeroizeOnDrop))]
pub(crate) struct State {
    /// The permutation table, a bijection on 0..=255 at all times.
    pub(crate) s: [u8; N],
    pub(crate) i: u8,
    pub(crate) j: u8,
    pub(crate) k: u8,
    /// Last output byte, fed back into the next output computation.
    pub(crate) z: u8,
    /// Absorption counter, in 0..=128. Nonzero means unflushed input.
    pub(crate) a: u8,
    /// Whip stride. Starts at 1 and grows by 2, so it stays odd and `i`
    /// visits every slot.
    pub(crate) w: u8,
}

#[inline(always)]
fn idx(b: u8) -> usize {
    usize::from(b)
}

cfg_if! {
    if #[cfg(feature = "timing-safe-crush")] {
        /// Half-sorts the table by conditionally swapping the pairs
        /// `(n, 255 - n)`. Both branches perform the same reads and
        /// writes: subtle's selection keeps the access pattern and timing
        /// independent of the permutation's order, and its optimizer
        /// barrier keeps the compiler from re-introducing the branch.
        fn crush_pairs(s: &mut [u8; N]) {
            use subtle::{ConditionallySelectable, ConstantTimeGreater};

            for n in 0..N_HALF {
                let m = N - 1 - n;
                let lo = s[n];
                let hi = s[m];
                let swap = lo.ct_gt(&hi);
                s[n] = u8::conditional_select(&lo, &hi, swap);
                s[m] = u8::conditional_select(&hi, &lo, swap);
            }
        }
    } else {
        /// Half-sorts the table by swapping the pairs `(n, 255 - n)`.
        /// Branchy variant: timing depends on the permutation.
        fn crush_pairs(s: &mut [u8; N]) {
            for n in 0..N_HALF {
                let m = N - 1 - n;
                if s[n] > s[m] {
                    s.swap(n, m);
                }
            }
        }
    }
}

impl State {
    pub(crate) fn new() -> Self {
        let mut state = Self {
            s: [0; N],
            i: 0,
            j: 0,
            k: 0,
            z: 0,
            a: 0,
            w: 1,
        };
        for (n, slot) in state.s.iter_mut().enumerate() {
            *slot = n as u8;
        }
        state
    }

    /// Back to the identity permutation with zeroed cursors and `w = 1`.
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }

    /// One step of the basic mixing walk. All arithmetic wraps mod 256.
    fn update(&mut self) {
        self.i = self.i.wrapping_add(self.w);
        self.j = self.s[idx(self.s[idx(self.i)].wrapping_add(self.j))].wrapping_add(self.k);
        self.k = self.s[idx(self.j)].wrapping_add(self.k).wrapping_add(self.i);
        self.s.swap(idx(self.i), idx(self.j));
    }

    fn whip(&mut self) {
        for _ in 0..WHIP_ROUNDS {
            self.update();
        }
        self.w = self.w.wrapping_add(2);
    }

    /// Flushes pending absorption into the whole state and rearms the
    /// absorption counter.
    pub(crate) fn shuffle(&mut self) {
        self.whip();
        crush_pairs(&mut self.s);
        self.whip();
        crush_pairs(&mut self.s);
        self.whip();
        self.a = 0;
    }

    fn absorb_nibble(&mut self, nibble: u8) {
        if self.a == N_HALF as u8 {
            self.shuffle();
        }
        self.s.swap(idx(self.a), N_HALF + idx(nibble));
        self.a += 1;
    }

    /// Low nibble first, then high. The order is part of the function
    /// family; do not flip it.
    pub(crate) fn absorb_byte(&mut self, byte: u8) {
        self.absorb_nibble(byte & 0x0F);
        self.absorb_nibble(byte >> 4);
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) {
        for &byte in data {
            self.absorb_byte(byte);
        }
    }

    /// Domain separator between absorbed fields (key vs. nonce, message
    /// vs. digest length): advances the counter without touching the table.
    pub(crate) fn absorb_stop(&mut self) {
        if self.a == N_HALF as u8 {
            self.shuffle();
        }
        self.a += 1;
    }

    fn output(&mut self) -> u8 {
        let t = self.s[idx(self.z.wrapping_add(self.k))];
        let u = self.s[idx(t.wrapping_add(self.i))];
        self.z = self.s[idx(u.wrapping_add(self.j))];
        self.z
    }

    /// Produces one byte. Any unflushed absorption is shuffled in first,
    /// so extraction never observes a half-absorbed state.
    pub(crate) fn drip(&mut self) -> u8 {
        if self.a != 0 {
            self.shuffle();
        }
        self.update();
        self.output()
    }

    pub(crate) fn squeeze(&mut self, out: &mut [u8]) {
        if self.a != 0 {
            self.shuffle();
        }
        for byte in out.iter_mut() {
            *byte = self.drip();
        }
    }
}
