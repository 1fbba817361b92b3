//! Seeded pseudo-random number generator
//!
//! Deterministic xorshift64* generator. The simulation core never touches
//! ambient randomness: every stochastic strategy draws from a stream derived
//! from one tournament seed, so any match replays bit-for-bit.

/// Seeded random number generator.
///
/// Deterministic: same seed + stream index = same sequence.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new generator from a 32-byte seed and a stream index.
    ///
    /// Distinct stream indices over the same seed yield independent
    /// sequences; the tournament engine assigns one stream per player.
    pub fn new(seed: &[u8; 32], stream: u64) -> Self {
        let mut state = 0u64;
        for (i, chunk) in seed.chunks(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes[..chunk.len()].copy_from_slice(chunk);
            state ^= u64::from_le_bytes(bytes).wrapping_add(i as u64);
        }
        state ^= stream.wrapping_mul(0x517cc1b727220a95);

        // Warm up so near-equal seeds decorrelate
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Generate the next u64.
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Bernoulli trial: true with probability `p`.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
