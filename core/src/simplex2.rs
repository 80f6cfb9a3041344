use crate::NoiseGenerator;
use crate::perlin2::LATTICE_SEED;

// Single-octave 2D Simplex noise over a fixed permutation lattice
// Based on Ken Perlin's Simplex algorithm
pub struct Simplex2D {
    perm: [u8; 512],
    // Simplex divides space into triangles, rather than squares
    // This results in better isotropy (uniformity in all directions)
    grad3: [(i8, i8); 12],
}

impl Default for Simplex2D {
    fn default() -> Self {
        Self::new(LATTICE_SEED)
    }
}

impl Simplex2D {
    pub fn new(table_seed: u64) -> Self {
        // Same permutation‐table construction as Perlin2D:
        let mut p: Vec<u8> = (0..=255).collect();
        let mut x = table_seed ^ 0x1234_5678_9ABC_DEF0_u64;
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x & 0xFF) as u8
        };
        for i in (1..256).rev() {
            let j = (rng() as usize) % (i + 1);
            p.swap(i, j);
        }
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }

        let grad3 = [
            (1, 1),
            (-1, 1),
            (1, -1),
            (-1, -1),
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (-1, 1),
            (1, -1),
            (-1, -1),
        ];

        Self { perm, grad3 }
    }

    #[inline]
    fn dot(g: (i8, i8), x: f64, y: f64) -> f64 {
        (g.0 as f64) * x + (g.1 as f64) * y
    }

    #[inline]
    fn corner(&self, gi: usize, x: f64, y: f64) -> f64 {
        // Circular radius of influence
        let t = 0.5 - x * x - y * y;
        if t > 0.0 {
            let t_sq = t * t;
            t_sq * t_sq * Self::dot(self.grad3[gi], x, y)
        } else {
            0.0
        }
    }

    // Raw 2D Simplex noise at (xin, yin)
    // Returns in range [−1.0, +1.0], roughly
    fn raw_noise(&self, xin: f64, yin: f64) -> f64 {
        const SQRT_3: f64 = 1.732_050_807_568_877_2;
        // Skew into the rhombus lattice and back
        const F2: f64 = 0.5 * (SQRT_3 - 1.0);
        const G2: f64 = (3.0 - SQRT_3) / 6.0;

        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i64;
        let j = (yin + s).floor() as i64;

        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // Lower or upper triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let gi0 = (self.perm[ii + self.perm[jj] as usize] as usize) % 12;
        let gi1 = (self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize) % 12;
        let gi2 = (self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize) % 12;

        let n = self.corner(gi0, x0, y0) + self.corner(gi1, x1, y1) + self.corner(gi2, x2, y2);
        // Scaled to land roughly in [-1, 1]
        70.0 * n
    }
}

impl NoiseGenerator for Simplex2D {
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.raw_noise(x, y)
    }
}
