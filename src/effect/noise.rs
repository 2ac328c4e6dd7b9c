/// Deterministic pseudo-random source for flicker, sparks and pattern picks.
///
/// SplitMix64: tiny state, no floats, good enough spread for lighting.
/// Seeding is explicit so a run can be replayed exactly.
#[derive(Debug, Clone)]
pub struct Noise {
    state: u64,
}

impl Noise {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        (z ^ (z >> 31)) as u32
    }

    /// Value in `min..max`; returns `min` for an empty range.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = max.wrapping_sub(min) as u32;
        min.wrapping_add((self.next_u32() % span) as i32)
    }

    /// Value in `min..max`; returns `min` for an empty range.
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.next_u32() % (max - min)
    }

    /// True with the given probability in percent.
    pub fn chance(&mut self, percent: u8) -> bool {
        self.next_u32() % 100 < u32::from(percent)
    }
}
