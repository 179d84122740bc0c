//! RNG module - random piece generation
//!
//! One seedable generator lives for the whole session and every shape and color
//! draw goes through it. Two modes are supported:
//!
//! - **Uniform** (default): every draw picks one of the seven shapes independently,
//!   so the same shape can repeat any number of times in a row.
//! - **Bag7**: the seven shapes are shuffled into a bag and dealt out before the
//!   bag is refilled.
//!
//! Colors are always drawn independently of the shape.
//!
//! Also provides a scripted source for deterministic scenarios.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::types::{BlockColor, PieceKind, COLOR_COUNT, SHAPE_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of an LCG have short periods; use the high half
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where the engine gets its pieces from
pub trait PieceSource {
    /// Draw the shape and color of the next queued piece
    fn draw(&mut self) -> (PieceKind, BlockColor);
}

/// Shape selection policy for [`PieceGenerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    /// Independent uniform draw per piece
    #[default]
    Uniform,
    /// Shuffled bag of all seven shapes
    Bag7,
}

impl Randomizer {
    /// Parse from string (case-insensitive): "uniform" or "bag7"
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Some(Randomizer::Uniform),
            "bag7" | "bag" => Some(Randomizer::Bag7),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Uniform => "uniform",
            Randomizer::Bag7 => "bag7",
        }
    }
}

/// Session piece generator backed by a single [`SimpleRng`]
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    mode: Randomizer,
    /// Remaining shapes of the current bag (Bag7 only); drawn from the back
    bag: ArrayVec<PieceKind, SHAPE_COUNT>,
}

impl PieceGenerator {
    pub fn new(seed: u32, mode: Randomizer) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            mode,
            bag: ArrayVec::new(),
        }
    }

    pub fn mode(&self) -> Randomizer {
        self.mode
    }

    /// Current RNG state (for starting another generator on the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    fn draw_kind(&mut self) -> PieceKind {
        match self.mode {
            Randomizer::Uniform => {
                PieceKind::ALL[self.rng.next_range(SHAPE_COUNT as u32) as usize]
            }
            Randomizer::Bag7 => {
                if self.bag.is_empty() {
                    self.refill_bag();
                }
                self.bag.pop().unwrap_or(PieceKind::I)
            }
        }
    }

    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    fn draw_color(&mut self) -> BlockColor {
        BlockColor::ALL[self.rng.next_range(COLOR_COUNT as u32) as usize]
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1, Randomizer::Uniform)
    }
}

impl PieceSource for PieceGenerator {
    fn draw(&mut self) -> (PieceKind, BlockColor) {
        let kind = self.draw_kind();
        let color = self.draw_color();
        (kind, color)
    }
}

/// Replays a fixed list of draws, then falls back to a uniform generator
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<(PieceKind, BlockColor)>,
    fallback: PieceGenerator,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = (PieceKind, BlockColor)>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: PieceGenerator::default(),
        }
    }

    /// Scripted shapes, each paired with the first palette color
    pub fn kinds(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        Self::new(kinds.into_iter().map(|k| (k, BlockColor::Cyan)))
    }

    /// Draws left before the fallback generator takes over
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PieceSource for ScriptedSource {
    fn draw(&mut self) -> (PieceKind, BlockColor) {
        match self.script.pop_front() {
            Some(entry) => entry,
            None => self.fallback.draw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_uniform_generator_is_deterministic() {
        let mut a = PieceGenerator::new(777, Randomizer::Uniform);
        let mut b = PieceGenerator::new(777, Randomizer::Uniform);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_uniform_generator_covers_all_shapes_and_colors() {
        let mut gen = PieceGenerator::new(2024, Randomizer::Uniform);
        let mut kinds = [false; SHAPE_COUNT];
        let mut colors = [false; COLOR_COUNT];
        for _ in 0..500 {
            let (k, c) = gen.draw();
            kinds[k.index() as usize] = true;
            colors[c.index() as usize] = true;
        }
        assert!(kinds.iter().all(|&seen| seen));
        assert!(colors.iter().all(|&seen| seen));
    }

    #[test]
    fn test_uniform_generator_can_repeat_shapes() {
        let mut gen = PieceGenerator::new(5, Randomizer::Uniform);
        let mut prev = gen.draw().0;
        let mut repeated = false;
        for _ in 0..500 {
            let (k, _) = gen.draw();
            if k == prev {
                repeated = true;
                break;
            }
            prev = k;
        }
        assert!(repeated);
    }

    #[test]
    fn test_bag7_deals_each_shape_once_per_bag() {
        let mut gen = PieceGenerator::new(1, Randomizer::Bag7);
        for _ in 0..3 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| gen.draw().0).collect();
            drawn.sort_by_key(|k| k.index());
            assert_eq!(drawn, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_randomizer_parse() {
        assert_eq!(Randomizer::parse("uniform"), Some(Randomizer::Uniform));
        assert_eq!(Randomizer::parse(" BAG7 "), Some(Randomizer::Bag7));
        assert_eq!(Randomizer::parse("fair"), None);
        assert_eq!(Randomizer::default(), Randomizer::Uniform);
    }

    #[test]
    fn test_scripted_source_replays_then_falls_back() {
        let mut src = ScriptedSource::new([
            (PieceKind::O, BlockColor::Red),
            (PieceKind::I, BlockColor::Blue),
        ]);
        assert_eq!(src.remaining(), 2);
        assert_eq!(src.draw(), (PieceKind::O, BlockColor::Red));
        assert_eq!(src.draw(), (PieceKind::I, BlockColor::Blue));
        assert_eq!(src.remaining(), 0);
        // Fallback keeps producing pieces
        let _ = src.draw();
    }
}
