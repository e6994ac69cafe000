use sketch_random::UniformSource;

use crate::permutation::{PermutationTable, TABLE_SIZE};

// (sqrt(3) - 1) / 2 and (3 - sqrt(3)) / 6
const F2: f64 = 0.3660254037844386;
const G2: f64 = 0.21132486540518713;
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;
// (sqrt(5) - 1) / 4 and (5 - sqrt(5)) / 20
const F4: f64 = 0.30901699437494745;
const G4: f64 = 0.1381966011250105;

/// Edge midpoints of a cube; the 2D set uses the x and y components.
const GRADIENT_3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

const GRADIENT_4: [[f64; 4]; 32] = [
    [0.0, 1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, -1.0],
    [0.0, 1.0, -1.0, 1.0],
    [0.0, 1.0, -1.0, -1.0],
    [0.0, -1.0, 1.0, 1.0],
    [0.0, -1.0, 1.0, -1.0],
    [0.0, -1.0, -1.0, 1.0],
    [0.0, -1.0, -1.0, -1.0],
    [1.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0, -1.0],
    [1.0, 0.0, -1.0, 1.0],
    [1.0, 0.0, -1.0, -1.0],
    [-1.0, 0.0, 1.0, 1.0],
    [-1.0, 0.0, 1.0, -1.0],
    [-1.0, 0.0, -1.0, 1.0],
    [-1.0, 0.0, -1.0, -1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0, -1.0],
    [1.0, -1.0, 0.0, 1.0],
    [1.0, -1.0, 0.0, -1.0],
    [-1.0, 1.0, 0.0, 1.0],
    [-1.0, 1.0, 0.0, -1.0],
    [-1.0, -1.0, 0.0, 1.0],
    [-1.0, -1.0, 0.0, -1.0],
    [1.0, 1.0, 1.0, 0.0],
    [1.0, 1.0, -1.0, 0.0],
    [1.0, -1.0, 1.0, 0.0],
    [1.0, -1.0, -1.0, 0.0],
    [-1.0, 1.0, 1.0, 0.0],
    [-1.0, 1.0, -1.0, 0.0],
    [-1.0, -1.0, 1.0, 0.0],
    [-1.0, -1.0, -1.0, 0.0],
];

type GradientTable = Box<[f64; TABLE_SIZE]>;

/// `as i32` saturates where a 32-bit wrap would not; past `±2^31` every
/// corner lies outside the kernel radius either way, so both yield 0.
#[inline(always)]
fn fast_floor(value: f64) -> i32 {
    value.floor() as i32
}

/// `t^4 * (g . d)` for a corner with squared falloff `t`, zero outside the
/// kernel radius.
#[inline(always)]
fn falloff(t: f64, dot: impl FnOnce() -> f64) -> f64 {
    if t < 0.0 {
        0.0
    } else {
        let t = t * t;
        t * t * dot()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimplexNoise2 {
    permutation: PermutationTable,
    grad_x: GradientTable,
    grad_y: GradientTable,
}

impl SimplexNoise2 {
    pub fn from_random<T>(random: &mut T) -> Self
    where
        T: UniformSource + ?Sized,
    {
        let permutation = PermutationTable::from_random(random);
        let grad_x = permutation.gradient_component(&GRADIENT_3, 0);
        let grad_y = permutation.gradient_component(&GRADIENT_3, 1);
        Self {
            permutation,
            grad_x,
            grad_y,
        }
    }

    pub fn permutation(&self) -> &PermutationTable {
        &self.permutation
    }

    /// Single-octave 2D simplex noise in `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let perm = &self.permutation;

        // Skew into lattice space and find the cell origin
        let s = (x + y) * F2;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let t = (i as f64 + j as f64) * G2;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);

        // Lower (x > y) or upper triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;

        let n0 = falloff(0.5 - x0 * x0 - y0 * y0, || {
            let gi = ii + perm.get(jj);
            self.grad_x[gi] * x0 + self.grad_y[gi] * y0
        });
        let n1 = falloff(0.5 - x1 * x1 - y1 * y1, || {
            let gi = ii + i1 + perm.get(jj + j1);
            self.grad_x[gi] * x1 + self.grad_y[gi] * y1
        });
        let n2 = falloff(0.5 - x2 * x2 - y2 * y2, || {
            let gi = ii + 1 + perm.get(jj + 1);
            self.grad_x[gi] * x2 + self.grad_y[gi] * y2
        });

        70.0 * (n0 + n1 + n2)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimplexNoise3 {
    permutation: PermutationTable,
    grad_x: GradientTable,
    grad_y: GradientTable,
    grad_z: GradientTable,
}

impl SimplexNoise3 {
    pub fn from_random<T>(random: &mut T) -> Self
    where
        T: UniformSource + ?Sized,
    {
        let permutation = PermutationTable::from_random(random);
        let grad_x = permutation.gradient_component(&GRADIENT_3, 0);
        let grad_y = permutation.gradient_component(&GRADIENT_3, 1);
        let grad_z = permutation.gradient_component(&GRADIENT_3, 2);
        Self {
            permutation,
            grad_x,
            grad_y,
            grad_z,
        }
    }

    pub fn permutation(&self) -> &PermutationTable {
        &self.permutation
    }

    #[inline(always)]
    fn dot(&self, gi: usize, x: f64, y: f64, z: f64) -> f64 {
        self.grad_x[gi] * x + self.grad_y[gi] * y + self.grad_z[gi] * z
    }

    /// Single-octave 3D simplex noise in `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let perm = &self.permutation;

        let s = (x + y + z) * F3;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);
        let t = (i as f64 + j as f64 + k as f64) * G3;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);
        let z0 = z - (k as f64 - t);

        // Offsets of the second and third corners, by descending coordinate order
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0) // X Y Z
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1) // X Z Y
            } else {
                (0, 0, 1, 1, 0, 1) // Z X Y
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1) // Z Y X
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1) // Y Z X
        } else {
            (0, 1, 0, 1, 1, 0) // Y X Z
        };

        let x1 = x0 - i1 as f64 + G3;
        let y1 = y0 - j1 as f64 + G3;
        let z1 = z0 - k1 as f64 + G3;
        let x2 = x0 - i2 as f64 + 2.0 * G3;
        let y2 = y0 - j2 as f64 + 2.0 * G3;
        let z2 = z0 - k2 as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let kk = (k & 255) as usize;

        let n0 = falloff(0.6 - x0 * x0 - y0 * y0 - z0 * z0, || {
            let gi = ii + perm.get(jj + perm.get(kk));
            self.dot(gi, x0, y0, z0)
        });
        let n1 = falloff(0.6 - x1 * x1 - y1 * y1 - z1 * z1, || {
            let gi = ii + i1 + perm.get(jj + j1 + perm.get(kk + k1));
            self.dot(gi, x1, y1, z1)
        });
        let n2 = falloff(0.6 - x2 * x2 - y2 * y2 - z2 * z2, || {
            let gi = ii + i2 + perm.get(jj + j2 + perm.get(kk + k2));
            self.dot(gi, x2, y2, z2)
        });
        let n3 = falloff(0.6 - x3 * x3 - y3 * y3 - z3 * z3, || {
            let gi = ii + 1 + perm.get(jj + 1 + perm.get(kk + 1));
            self.dot(gi, x3, y3, z3)
        });

        32.0 * (n0 + n1 + n2 + n3)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimplexNoise4 {
    permutation: PermutationTable,
    grad_x: GradientTable,
    grad_y: GradientTable,
    grad_z: GradientTable,
    grad_w: GradientTable,
}

impl SimplexNoise4 {
    pub fn from_random<T>(random: &mut T) -> Self
    where
        T: UniformSource + ?Sized,
    {
        let permutation = PermutationTable::from_random(random);
        let grad_x = permutation.gradient_component(&GRADIENT_4, 0);
        let grad_y = permutation.gradient_component(&GRADIENT_4, 1);
        let grad_z = permutation.gradient_component(&GRADIENT_4, 2);
        let grad_w = permutation.gradient_component(&GRADIENT_4, 3);
        Self {
            permutation,
            grad_x,
            grad_y,
            grad_z,
            grad_w,
        }
    }

    pub fn permutation(&self) -> &PermutationTable {
        &self.permutation
    }

    #[inline(always)]
    fn dot(&self, gi: usize, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.grad_x[gi] * x + self.grad_y[gi] * y + self.grad_z[gi] * z + self.grad_w[gi] * w
    }

    /// Single-octave 4D simplex noise in `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let perm = &self.permutation;

        let s = (x + y + z + w) * F4;
        let i = fast_floor(x + s);
        let j = fast_floor(y + s);
        let k = fast_floor(z + s);
        let l = fast_floor(w + s);
        let t = (i as f64 + j as f64 + k as f64 + l as f64) * G4;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);
        let z0 = z - (k as f64 - t);
        let w0 = w - (l as f64 - t);

        // Rank the four coordinates with six pairwise comparisons; rank 3 is
        // the largest.
        let mut rank = [0usize; 4];
        let coords = [x0, y0, z0, w0];
        for a in 0..4 {
            for b in a + 1..4 {
                if coords[a] > coords[b] {
                    rank[a] += 1;
                } else {
                    rank[b] += 1;
                }
            }
        }
        let step = |threshold: usize| rank.map(|r| usize::from(r >= threshold));
        let [i1, j1, k1, l1] = step(3);
        let [i2, j2, k2, l2] = step(2);
        let [i3, j3, k3, l3] = step(1);

        let x1 = x0 - i1 as f64 + G4;
        let y1 = y0 - j1 as f64 + G4;
        let z1 = z0 - k1 as f64 + G4;
        let w1 = w0 - l1 as f64 + G4;
        let x2 = x0 - i2 as f64 + 2.0 * G4;
        let y2 = y0 - j2 as f64 + 2.0 * G4;
        let z2 = z0 - k2 as f64 + 2.0 * G4;
        let w2 = w0 - l2 as f64 + 2.0 * G4;
        let x3 = x0 - i3 as f64 + 3.0 * G4;
        let y3 = y0 - j3 as f64 + 3.0 * G4;
        let z3 = z0 - k3 as f64 + 3.0 * G4;
        let w3 = w0 - l3 as f64 + 3.0 * G4;
        let x4 = x0 - 1.0 + 4.0 * G4;
        let y4 = y0 - 1.0 + 4.0 * G4;
        let z4 = z0 - 1.0 + 4.0 * G4;
        let w4 = w0 - 1.0 + 4.0 * G4;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let kk = (k & 255) as usize;
        let ll = (l & 255) as usize;

        let n0 = falloff(0.6 - x0 * x0 - y0 * y0 - z0 * z0 - w0 * w0, || {
            let gi = ii + perm.get(jj + perm.get(kk + perm.get(ll)));
            self.dot(gi, x0, y0, z0, w0)
        });
        let n1 = falloff(0.6 - x1 * x1 - y1 * y1 - z1 * z1 - w1 * w1, || {
            let gi = ii + i1 + perm.get(jj + j1 + perm.get(kk + k1 + perm.get(ll + l1)));
            self.dot(gi, x1, y1, z1, w1)
        });
        let n2 = falloff(0.6 - x2 * x2 - y2 * y2 - z2 * z2 - w2 * w2, || {
            let gi = ii + i2 + perm.get(jj + j2 + perm.get(kk + k2 + perm.get(ll + l2)));
            self.dot(gi, x2, y2, z2, w2)
        });
        let n3 = falloff(0.6 - x3 * x3 - y3 * y3 - z3 * z3 - w3 * w3, || {
            let gi = ii + i3 + perm.get(jj + j3 + perm.get(kk + k3 + perm.get(ll + l3)));
            self.dot(gi, x3, y3, z3, w3)
        });
        let n4 = falloff(0.6 - x4 * x4 - y4 * y4 - z4 * z4 - w4 * w4, || {
            let gi = ii + 1 + perm.get(jj + 1 + perm.get(kk + 1 + perm.get(ll + 1)));
            self.dot(gi, x4, y4, z4, w4)
        });

        27.0 * (n0 + n1 + n2 + n3 + n4)
    }
}
