/// 64-bit FNV-1a hasher; stable across platforms and runs.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Hash of a string's UTF-8 bytes.
pub(crate) fn fnv1a64_str(s: &str) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(s.as_bytes());
    h.finish()
}

/// Offset that places `content` inside `available` according to a 0/0.5/1 alignment factor.
pub(crate) fn align_offset(available: f64, content: f64, factor: f64) -> f64 {
    ((available - content) * factor).max(0.0)
}
