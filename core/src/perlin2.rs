use crate::NoiseGenerator;

// Seed used to shuffle the shared lattice. The terrain seed never reaches
// the table, it only shifts sample coordinates.
pub const LATTICE_SEED: u64 = 0;

// Single-octave 2D Perlin noise over a fixed permutation lattice.
// Stateless once built: the same (x, y) always gives the same value.
pub struct Perlin2D {
    perm: [u8; 512], // permutation table (256 duplicated)
}

impl Default for Perlin2D {
    fn default() -> Self {
        Self::new(LATTICE_SEED)
    }
}

impl Perlin2D {
    pub fn new(table_seed: u64) -> Self {
        // build a pseudorandom permutation table of size 256, duplicated into 512
        let mut p: Vec<u8> = (0..=255).collect();
        // Simple xorshift-based (with a large constant) RNG for shuffling
        let mut x = table_seed ^ 0xDEADBEEFCAFEBABE_u64;
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            // Bitmasking the lowest 8 bits
            (x & 0xFF) as u8
        };
        // Fisher–Yates shuffle p[0..256]
        for i in (1..256).rev() {
            let j = (rng() as usize) % (i + 1);
            p.swap(i, j);
        }
        // Duplicated so corner lookups can skip the modulo
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }

        Self { perm }
    }

    // Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
    // First and second derivatives are zero at t=0 and t=1
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    // Pick one of the diagonal/axis gradients from the low bits of the hash
    // and dot it with the offset (x, y)
    #[inline]
    fn grad(hash: u8, x: f64, y: f64) -> f64 {
        let h = hash & 0x7;
        let u = if h < 4 { x } else { y };
        let v = if h < 4 { y } else { x };
        let sign_u = if (h & 1) == 0 { u } else { -u };
        let sign_v = if (h & 2) == 0 { v } else { -v };
        // Halved so the corner sum stays within [-1, 1]
        (sign_u + sign_v) * 0.5
    }

    #[inline]
    fn hash(&self, xi: usize, yi: usize) -> u8 {
        self.perm[self.perm[xi] as usize + yi]
    }

    // Raw Perlin noise at (x, y), roughly in [−1, 1], exactly 0 on lattice points
    fn noise(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        // i64 keeps seed-shifted coordinates from saturating
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;
        let xf = x - x0;
        let yf = y - y0;
        let u = Self::fade(xf);
        let v = Self::fade(yf);

        let aa = self.hash(xi, yi);
        let ab = self.hash(xi, yi + 1);
        let ba = self.hash(xi + 1, yi);
        let bb = self.hash(xi + 1, yi + 1);

        let x1 = Self::lerp(Self::grad(aa, xf, yf), Self::grad(ba, xf - 1.0, yf), u);
        let x2 = Self::lerp(
            Self::grad(ab, xf, yf - 1.0),
            Self::grad(bb, xf - 1.0, yf - 1.0),
            u,
        );
        Self::lerp(x1, x2, v)
    }
}

impl NoiseGenerator for Perlin2D {
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.noise(x, y)
    }
}
