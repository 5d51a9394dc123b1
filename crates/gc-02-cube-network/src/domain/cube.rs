use rand::Rng;
use shared_types::{CubeId, Side, SideColor};

/// One simulated cube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cube {
    id: CubeId,
    side: Side,
    color: SideColor,
}

/// Result of flipping a cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    pub cube_id: CubeId,
    pub old_side: Side,
    pub new_side: Side,
    /// Color of the side now facing up.
    pub color: SideColor,
}

impl Cube {
    /// A freshly joined cube with a random side up and a random color.
    pub fn spawn<R: Rng + ?Sized>(id: CubeId, rng: &mut R) -> Self {
        Self {
            id,
            side: random_side(rng),
            color: random_color(rng),
        }
    }

    pub fn id(&self) -> CubeId {
        self.id
    }

    /// Side currently facing up.
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn color(&self) -> SideColor {
        self.color
    }

    /// Turn `side` up, or a random side if `None`, and pick a new color.
    ///
    /// The new color always differs from the old one.
    pub fn flip<R: Rng + ?Sized>(&mut self, side: Option<Side>, rng: &mut R) -> Flip {
        let old_side = self.side;
        self.side = side.unwrap_or_else(|| random_side(rng));

        let old_color = self.color;
        while self.color == old_color {
            self.color = random_color(rng);
        }

        Flip {
            cube_id: self.id,
            old_side,
            new_side: self.side,
            color: self.color,
        }
    }
}

/// Uniformly random side in 1..=6.
pub fn random_side<R: Rng + ?Sized>(rng: &mut R) -> Side {
    Side::ALL[rng.gen_range(0..Side::ALL.len())]
}

/// Uniformly random 12-bit color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> SideColor {
    SideColor::from_masked(rng.gen_range(0..=SideColor::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cube(rng: &mut StdRng) -> Cube {
        Cube::spawn(CubeId::new(0x10).unwrap(), rng)
    }

    #[test]
    fn test_flip_to_given_side() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut cube = cube(&mut rng);
        let before = cube.side();

        let flip = cube.flip(Some(Side::new(3).unwrap()), &mut rng);

        assert_eq!(flip.old_side, before);
        assert_eq!(flip.new_side.as_u8(), 3);
        assert_eq!(cube.side().as_u8(), 3);
    }

    #[test]
    fn test_flip_always_changes_color() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut cube = cube(&mut rng);
        for _ in 0..500 {
            let before = cube.color();
            let flip = cube.flip(None, &mut rng);
            assert_ne!(flip.color, before);
            assert_eq!(flip.color, cube.color());
            assert!((1..=6).contains(&cube.side().as_u8()));
            assert_eq!(cube.color().to_string().len(), 4);
        }
    }

    #[test]
    fn test_random_values_cover_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 7];
        for _ in 0..600 {
            seen[random_side(&mut rng).as_u8() as usize] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|s| *s));
    }
}
