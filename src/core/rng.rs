// Copyright @yucwang 2026

use crate::math::constants::Float;

/// Seedable linear congruential generator. One instance per row stream keeps
/// renders reproducible regardless of how rows are scheduled.
#[derive(Clone, Debug)]
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Independent stream for `(seed, stream)`, decorrelated with a
    /// splitmix64 finaliser so neighbouring rows do not share low bits.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        let mut z = seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        Self::new(z ^ (z >> 31))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    /// Uniform in [0, 1).
    pub fn next_float(&mut self) -> Float {
        (self.next_u32() >> 8) as Float * (1.0 / 16_777_216.0)
    }
}
