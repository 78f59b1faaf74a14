use crate::core::pbrt::*;

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// PCG32 random stream.
///
/// Every random walk draws from an explicitly passed stream; give each worker
/// its own `RNG::new_sequence(index)` so no synchronization is needed.
#[derive(Debug, PartialEq, Clone)]
pub struct RNG {
    pub state: u64,
    pub inc: u64,
}

impl RNG {
    pub fn new() -> Self {
        RNG {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }

    pub fn new_sequence(initseq: u64) -> Self {
        let mut r = Self::new();
        r.set_sequence(initseq);
        return r;
    }

    pub fn set_sequence(&mut self, initseq: u64) {
        self.state = 0;
        self.inc = (initseq << 1) | 1;
        self.uniform_uint32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_uint32();
    }

    #[inline]
    pub fn uniform_uint32(&mut self) -> u32 {
        let oldstate: u64 = self.state;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        let xorshifted: u32 = ((oldstate.wrapping_shr(18) ^ oldstate).wrapping_shr(27)) as u32;
        let rot: u32 = (oldstate.wrapping_shr(59)) as u32;
        return (xorshifted.wrapping_shr(rot))
            | (xorshifted.wrapping_shl(((!rot).wrapping_add(1)) & 31));
    }

    /// Uniform value in [0, 1).
    #[inline]
    pub fn uniform_float(&mut self) -> Float {
        let f = self.uniform_uint32() as Float * 2.3283064365386963e-10;
        return Float::min(f, ONE_MINUS_EPSILON);
    }

    #[inline]
    pub fn uniform_2d(&mut self) -> Point2f {
        let u0 = self.uniform_float();
        let u1 = self.uniform_float();
        return Point2f::new(u0, u1);
    }
}

impl Default for RNG {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_001() {
        let mut rng = RNG::new();
        let a = rng.uniform_float();
        let astate = rng.state;
        let b = rng.uniform_float();
        let bstate = rng.state;
        assert_ne!(a, b);
        assert_ne!(astate, bstate);
    }

    #[test]
    fn test_002() {
        let mut r0 = RNG::new_sequence(0);
        let mut r1 = RNG::new_sequence(1);
        let s0: Vec<u32> = (0..8).map(|_| r0.uniform_uint32()).collect();
        let s1: Vec<u32> = (0..8).map(|_| r1.uniform_uint32()).collect();
        assert_ne!(s0, s1);

        let mut r0_again = RNG::new_sequence(0);
        let s0_again: Vec<u32> = (0..8).map(|_| r0_again.uniform_uint32()).collect();
        assert_eq!(s0, s0_again);
    }

    #[test]
    fn test_003() {
        let mut rng = RNG::new_sequence(7);
        let n = 100000;
        let mut sum = 0.0;
        for _ in 0..n {
            let u = rng.uniform_float();
            assert!((0.0..1.0).contains(&u));
            sum += u as f64;
        }
        assert!((sum / n as f64 - 0.5).abs() < 0.01);
    }
}
