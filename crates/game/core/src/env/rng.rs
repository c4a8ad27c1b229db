//! Seeded deterministic random number generation.
//!
//! Every random decision in the simulation (room placement, tunnel shape, and
//! anything reserved for later) is drawn from [`Mulberry32`]. The generator is a
//! pure function of its 32-bit state, so the same seed yields the same sequence on
//! every platform.
//!
//! # Determinism
//!
//! Only integer arithmetic with explicit wrapping is used to advance and mix the
//! state. Floating point appears only in [`Mulberry32::next_f64`], where the
//! conversion `u32 / 2^32` is exact in `f64`.

/// Mulberry32 generator with a single 32-bit word of state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Small state**: 32 bits, stored verbatim in `GameState::seed`
/// - **Resumable**: `Mulberry32::new(rng.state())` continues the exact stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Weyl sequence increment added to the state on every draw.
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// Seeds a new generator.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state; feeding it back into [`new`](Self::new) resumes the stream.
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Output permutation applied to the advanced state.
    #[inline]
    fn mix(state: u32) -> u32 {
        let mut t = (state ^ (state >> 15)).wrapping_mul(state | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Draws the next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        Self::mix(self.state)
    }

    /// Draws a float uniformly distributed in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Draws an integer in `[min, max)`. Returns `min` when the range is empty.
    ///
    /// Computed as `floor(next_f64() * (max - min)) + min` in exact integer form.
    pub fn random_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (i64::from(max) - i64::from(min)) as u64;
        let offset = (u64::from(self.next_u32()) * span) >> 32;
        (i64::from(min) + offset as i64) as i32
    }

    /// Fair coin flip (`next_f64() < 0.5`).
    pub fn coin_flip(&mut self) -> bool {
        self.next_f64() < 0.5
    }
}

/// Returns the state reached after discarding one output from `seed`.
///
/// This is how a committed state moves its seed forward once per turn.
pub fn advance_seed(seed: u32) -> u32 {
    let mut rng = Mulberry32::new(seed);
    rng.next_u32();
    rng.state()
}
