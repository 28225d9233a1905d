use rand::prelude::*;

use crate::types::Steps;

/// Number of faces on the course die.
pub const DIE_FACES: Steps = 6;

/// Uniform six-sided die. Seeded explicitly so the frontend can inject
/// browser entropy and tests can pin a sequence.
#[derive(Clone, Debug)]
pub struct Die {
    rng: SmallRng,
}

impl Die {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn roll(&mut self) -> Steps {
        self.rng.random_range(1..=DIE_FACES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_stay_in_range_and_cover_every_face() {
        let mut die = Die::from_seed(7);
        let mut seen = [0u32; DIE_FACES as usize];

        for _ in 0..10_000 {
            let steps = die.roll();
            assert!((1..=DIE_FACES).contains(&steps));
            seen[steps as usize - 1] += 1;
        }

        // each face expects ~1667 hits out of 10000
        for (face, &count) in seen.iter().enumerate() {
            assert!(count > 0, "face {} never rolled", face + 1);
            assert!(
                (1300..=2100).contains(&count),
                "face {} rolled {} times",
                face + 1,
                count
            );
        }
    }

    #[test]
    fn seeded_dice_repeat_their_sequence() {
        let mut a = Die::from_seed(42);
        let mut b = Die::from_seed(42);

        for _ in 0..100 {
            assert_eq!(a.roll(), b.roll());
        }
    }
}
