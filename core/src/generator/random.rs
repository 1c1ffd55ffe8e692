use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Places mines by rejection sampling: draw a uniform `(row, col)`, keep it if
/// the cell is still free, repeat until the requested count is reached.
///
/// The generator keeps its RNG between calls, so a seeded generator yields the
/// same sequence of layouts every run.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl Default for RandomMinefieldGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        use rand::Rng;

        // a full board would never terminate
        config.validate()?;

        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut collisions: usize = 0;

        while mines_placed < config.mines {
            let row = self.rng.random_range(0..config.rows);
            let col = self.rng.random_range(0..config.cols);
            let cell = &mut mine_mask[(row, col).to_nd_index()];
            if *cell {
                collisions += 1;
                continue;
            }
            *cell = true;
            mines_placed += 1;
        }

        log::trace!(
            "Placed {} mines on {}x{} board, {} collisions",
            mines_placed,
            config.rows,
            config.cols,
            collisions
        );
        Ok(MineLayout::from_mine_mask(mine_mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        let mut generator = RandomMinefieldGenerator::new(7);
        for preset in Preset::ALL {
            let config = preset.config();
            let layout = generator.generate(config).unwrap();
            assert_eq!(layout.size(), config.size());
            assert_eq!(layout.mine_count(), config.mines);
        }
    }

    #[test]
    fn nearly_full_board_terminates() {
        let mut generator = RandomMinefieldGenerator::new(1);
        let layout = generator.generate(GameConfig::new_unchecked(4, 4, 15)).unwrap();
        assert_eq!(layout.mine_count(), 15);
    }

    #[test]
    fn same_seed_same_layouts() {
        let config = Preset::Hard.config();
        let mut a = RandomMinefieldGenerator::new(42);
        let mut b = RandomMinefieldGenerator::new(42);

        for _ in 0..3 {
            assert_eq!(a.generate(config).unwrap(), b.generate(config).unwrap());
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut generator = RandomMinefieldGenerator::new(0);
        assert!(matches!(
            generator.generate(GameConfig::new_unchecked(2, 2, 4)),
            Err(GameError::InvalidConfiguration { .. })
        ));
    }
}
