//! RNG module - element bag and piece generation
//!
//! Elements are drawn without replacement from a shuffled bag. The bag is rebuilt
//! when it runs dry, with a composition that depends on the level of that draw:
//! 4 Fire, 4 Water, 3 Rock and 2 Dynamite, plus one Dynamite above level 5 and one
//! Rock above level 10. Entries are taken from the end of the shuffled bag.
//!
//! All randomness comes from one seeded ChaCha8 stream, so a seed reproduces the
//! whole piece sequence.

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::piece::Piece;
use crate::types::{
    ElementKind, ShapePolicy, TetrominoKind, BAG_BASE, BAG_CAPACITY, EXTRA_DYNAMITE_LEVEL,
    EXTRA_ROCK_LEVEL,
};

/// Random source shared by every bag of a session
pub type GameRng = ChaCha8Rng;

/// Shuffled without-replacement bag of element kinds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementBag {
    items: ArrayVec<ElementKind, BAG_CAPACITY>,
}

impl ElementBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag contents for a refill at `level`, before shuffling
    pub fn composition(level: u32) -> ArrayVec<ElementKind, BAG_CAPACITY> {
        let mut items: ArrayVec<ElementKind, BAG_CAPACITY> = BAG_BASE.into_iter().collect();
        if level > EXTRA_DYNAMITE_LEVEL {
            items.push(ElementKind::Dynamite);
        }
        if level > EXTRA_ROCK_LEVEL {
            items.push(ElementKind::Rock);
        }
        items
    }

    /// Take one element, refilling first if the bag is empty
    pub fn draw(&mut self, level: u32, rng: &mut GameRng) -> ElementKind {
        if self.items.is_empty() {
            self.refill(level, rng);
        }
        // Refill never leaves the bag empty.
        self.items.pop().unwrap_or(ElementKind::Fire)
    }

    fn refill(&mut self, level: u32, rng: &mut GameRng) {
        self.items = Self::composition(level);
        self.items.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// 7-bag of tetromino outlines, used only with [`ShapePolicy::Tetromino`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeBag {
    items: ArrayVec<TetrominoKind, 7>,
}

impl ShapeBag {
    pub fn draw(&mut self, rng: &mut GameRng) -> TetrominoKind {
        if self.items.is_empty() {
            self.items = TetrominoKind::ALL.into_iter().collect();
            self.items.shuffle(rng);
        }
        self.items.pop().unwrap_or(TetrominoKind::O)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Produces the pieces of one session
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: GameRng,
    elements: ElementBag,
    shapes: ShapeBag,
    policy: ShapePolicy,
    seed: u64,
}

impl PieceGenerator {
    pub fn new(seed: u64, policy: ShapePolicy) -> Self {
        Self {
            rng: GameRng::seed_from_u64(seed),
            elements: ElementBag::new(),
            shapes: ShapeBag::default(),
            policy,
            seed,
        }
    }

    /// Next element from the bag; the level only matters when a refill happens
    pub fn next_element(&mut self, level: u32) -> ElementKind {
        self.elements.draw(level, &mut self.rng)
    }

    /// Next piece at its spawn anchor. Consumes exactly one bag element.
    pub fn create_piece(&mut self, level: u32) -> Piece {
        match self.policy {
            ShapePolicy::Monomino => Piece::single(self.next_element(level)),
            ShapePolicy::Tetromino => {
                let kind = self.shapes.draw(&mut self.rng);
                Piece::tetromino(kind, self.next_element(level))
            }
        }
    }

    /// Empty both bags. The random stream itself keeps going.
    pub fn reset_bags(&mut self) {
        self.elements.clear();
        self.shapes.clear();
    }

    pub fn elements(&self) -> &ElementBag {
        &self.elements
    }

    pub fn policy(&self) -> ShapePolicy {
        self.policy
    }

    /// Seed the generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1, ShapePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(items: &[ElementKind], kind: ElementKind) -> usize {
        items.iter().filter(|&&k| k == kind).count()
    }

    #[test]
    fn test_composition_by_level() {
        let base = ElementBag::composition(1);
        assert_eq!(base.len(), 13);
        assert_eq!(count(&base, ElementKind::Fire), 4);
        assert_eq!(count(&base, ElementKind::Water), 4);
        assert_eq!(count(&base, ElementKind::Rock), 3);
        assert_eq!(count(&base, ElementKind::Dynamite), 2);

        // Thresholds are strict.
        assert_eq!(ElementBag::composition(5).len(), 13);
        let six = ElementBag::composition(6);
        assert_eq!(six.len(), 14);
        assert_eq!(count(&six, ElementKind::Dynamite), 3);

        assert_eq!(ElementBag::composition(10).len(), 14);
        let eleven = ElementBag::composition(11);
        assert_eq!(eleven.len(), 15);
        assert_eq!(count(&eleven, ElementKind::Rock), 4);
    }

    #[test]
    fn test_bag_draws_full_composition_before_refill() {
        let mut rng = GameRng::seed_from_u64(7);
        let mut bag = ElementBag::new();
        let drawn: Vec<_> = (0..13).map(|_| bag.draw(1, &mut rng)).collect();
        assert!(bag.is_empty());
        assert_eq!(count(&drawn, ElementKind::Fire), 4);
        assert_eq!(count(&drawn, ElementKind::Water), 4);
        assert_eq!(count(&drawn, ElementKind::Rock), 3);
        assert_eq!(count(&drawn, ElementKind::Dynamite), 2);

        // The next draw refills at the level passed to that draw.
        bag.draw(11, &mut rng);
        assert_eq!(bag.len(), 14);
    }

    #[test]
    fn test_level_change_mid_bag_does_not_refill() {
        let mut rng = GameRng::seed_from_u64(3);
        let mut bag = ElementBag::new();
        bag.draw(1, &mut rng);
        bag.draw(20, &mut rng);
        assert_eq!(bag.len(), 11);
    }

    #[test]
    fn test_generator_deterministic() {
        let mut a = PieceGenerator::new(12345, ShapePolicy::Monomino);
        let mut b = PieceGenerator::new(12345, ShapePolicy::Monomino);
        for _ in 0..100 {
            assert_eq!(a.create_piece(1), b.create_piece(1));
        }
    }

    #[test]
    fn test_monomino_pieces_spawn_at_center() {
        let mut generator = PieceGenerator::default();
        for _ in 0..20 {
            let piece = generator.create_piece(1);
            assert_eq!(piece.shape.cell_count(), 1);
            assert_eq!(piece.anchor.row, 0);
            assert_eq!(piece.anchor.col, 5);
            assert!(piece.element().is_occupied());
        }
    }

    #[test]
    fn test_tetromino_policy_uses_seven_bag() {
        let mut generator = PieceGenerator::new(9, ShapePolicy::Tetromino);
        let mut widths = Vec::new();
        for _ in 0..7 {
            let piece = generator.create_piece(1);
            assert_eq!(piece.shape.cell_count(), 4);
            widths.push(piece.shape.width());
        }
        // One I (width 4) and one O (width 2) per bag.
        assert_eq!(widths.iter().filter(|&&w| w == 4).count(), 1);
        assert_eq!(widths.iter().filter(|&&w| w == 2).count(), 1);
        // One element per piece.
        assert_eq!(generator.elements().len(), 13 - 7);
    }

    #[test]
    fn test_reset_bags() {
        let mut generator = PieceGenerator::default();
        generator.create_piece(1);
        assert_eq!(generator.elements().len(), 12);
        generator.reset_bags();
        assert!(generator.elements().is_empty());
        generator.create_piece(1);
        assert_eq!(generator.elements().len(), 12);
    }
}
