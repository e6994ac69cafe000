use sketch_random::UniformSource;

pub const TABLE_SIZE: usize = 512;
const BASE_SIZE: usize = TABLE_SIZE / 2;

/// A shuffled `0..=255` stored twice, so that `perm[a + perm[b]]` style
/// lookups with `a, b <= 255` never need a modulo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    permutation: [u8; TABLE_SIZE],
}

impl PermutationTable {
    /// Partial Fisher-Yates over the first 256 entries, one draw per swap
    /// (255 draws in total), then mirrored into the upper half.
    pub fn from_random<T>(random: &mut T) -> Self
    where
        T: UniformSource + ?Sized,
    {
        let mut permutation = [0u8; TABLE_SIZE];
        for i in 0..BASE_SIZE {
            permutation[i] = i as u8;
        }
        for i in 0..BASE_SIZE - 1 {
            let offset = (random.draw() * (BASE_SIZE - i) as f64) as usize;
            let r = (i + offset).min(BASE_SIZE - 1);
            permutation.swap(i, r);
        }
        let (low, high) = permutation.split_at_mut(BASE_SIZE);
        high.copy_from_slice(low);
        Self { permutation }
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> usize {
        self.permutation[index] as usize
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.permutation
    }

    /// Whether the lower half holds every byte exactly once and the upper half
    /// mirrors it.
    pub fn is_valid(&self) -> bool {
        let (low, high) = self.permutation.split_at(BASE_SIZE);
        let mut seen = [false; BASE_SIZE];
        for &value in low {
            if seen[value as usize] {
                return false;
            }
            seen[value as usize] = true;
        }
        low == high
    }

    /// Per-entry lookup into a gradient set, `gradients[perm[i] % len]`.
    pub(crate) fn gradient_component<const N: usize>(
        &self,
        gradients: &[[f64; N]],
        component: usize,
    ) -> Box<[f64; TABLE_SIZE]> {
        Box::new(std::array::from_fn(|i| {
            gradients[self.get(i) % gradients.len()][component]
        }))
    }
}

#[cfg(test)]
mod test {
    use crate::permutation::PermutationTable;
    use sketch_random::{Generator, UniformSource};

    struct Constant(f64);

    impl UniformSource for Constant {
        fn draw(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn create() {
        let table = PermutationTable::from_random(&mut Generator::new(42).unwrap());
        assert!(table.is_valid());
        assert_eq!(
            table.as_slice()[0..10],
            [57, 147, 39, 235, 58, 155, 124, 9, 142, 168]
        );
        assert_eq!(table.as_slice()[256..266], table.as_slice()[0..10]);
    }

    #[test]
    fn valid_for_many_seeds() {
        for seed in 1..200 {
            let table = PermutationTable::from_random(&mut Generator::new(seed).unwrap());
            assert!(table.is_valid(), "seed {seed}");
        }
    }

    #[test]
    fn zero_draws_keep_identity() {
        let table = PermutationTable::from_random(&mut Constant(0.0));
        assert!(table.is_valid());
        for i in 0..512 {
            assert_eq!(table.get(i), i % 256);
        }
    }

    #[test]
    fn out_of_range_draws_are_clamped() {
        let table = PermutationTable::from_random(&mut Constant(1.0));
        assert!(table.is_valid());
    }

    #[test]
    fn draws_255_values() {
        let mut random = Generator::new(9).unwrap();
        let mut expected = random.clone();
        PermutationTable::from_random(&mut random);
        for _ in 0..255 {
            expected.random();
        }
        assert_eq!(random, expected);
    }

    #[test]
    fn detects_broken_tables() {
        let mut table = PermutationTable::from_random(&mut Generator::new(3).unwrap());
        table.permutation[300] = table.permutation[300].wrapping_add(1);
        assert!(!table.is_valid());

        let mut table = PermutationTable::from_random(&mut Generator::new(3).unwrap());
        table.permutation[0] = table.permutation[1];
        table.permutation[256] = table.permutation[257];
        assert!(!table.is_valid());
    }
}
