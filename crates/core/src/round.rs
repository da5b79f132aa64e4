//! Round module - anti-frustration generation of the offered set
//!
//! A round is drawn from the full pool up to `max_attempts` times, keeping the
//! first draw in which at least one piece fits the current board. When every
//! attempt fails, one unchecked draw from the small pool is used instead.
//! The fallback can still be unplaceable; the session's game-over check
//! catches that case.

use rand::Rng;

use crate::board::Board;
use crate::pieces::{full_pool, random_piece_from, small_pool, OfferedSet, PieceId, Shape};
use crate::types::{ColorId, MAX_DRAW_ATTEMPTS, MAX_PIECES_PER_ROUND, PIECES_PER_ROUND};

/// Outcome of one round draw.
#[derive(Debug, Clone)]
pub struct RoundDraw {
    pub pieces: OfferedSet,
    /// Full-pool draws made, including the accepted one.
    pub attempts: u32,
    pub used_fallback: bool,
}

/// Deals offered sets from an injected random source.
#[derive(Debug, Clone)]
pub struct RoundGenerator<R> {
    rng: R,
    pieces_per_round: usize,
    max_attempts: u32,
    next_id: PieceId,
}

impl<R: Rng> RoundGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_limits(rng, PIECES_PER_ROUND, MAX_DRAW_ATTEMPTS)
    }

    /// `pieces_per_round` is clamped to `1..=MAX_PIECES_PER_ROUND`, `max_attempts` to at least 1.
    pub fn with_limits(rng: R, pieces_per_round: usize, max_attempts: u32) -> Self {
        Self {
            rng,
            pieces_per_round: pieces_per_round.clamp(1, MAX_PIECES_PER_ROUND),
            max_attempts: max_attempts.max(1),
            next_id: 0,
        }
    }

    pub fn pieces_per_round(&self) -> usize {
        self.pieces_per_round
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Deal a new offered set for `board`.
    pub fn generate(&mut self, board: &Board) -> RoundDraw {
        for attempt in 1..=self.max_attempts {
            let pieces = self.draw(full_pool());
            if board.can_place_any_piece(&pieces) {
                log::debug!("dealt round on attempt {attempt}");
                return RoundDraw {
                    pieces,
                    attempts: attempt,
                    used_fallback: false,
                };
            }
        }

        log::warn!(
            "no placeable round after {} draws; dealing from the small pool",
            self.max_attempts
        );
        RoundDraw {
            pieces: self.draw(small_pool()),
            attempts: self.max_attempts,
            used_fallback: true,
        }
    }

    fn draw(&mut self, pool: &[Shape]) -> OfferedSet {
        let mut pieces = OfferedSet::new();
        for _ in 0..self.pieces_per_round {
            let id = self.next_id;
            self.next_id = self.next_id.wrapping_add(1);
            pieces.push(random_piece_from(pool, &ColorId::ALL, id, &mut self.rng));
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::MONO;
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn full_board(size: u8) -> Board {
        let mut board = Board::new(size);
        for r in 0..size as i16 {
            for c in 0..size as i16 {
                board.set(r, c, Some(ColorId::Teal));
            }
        }
        board
    }

    #[test]
    fn empty_board_accepts_first_draw() {
        let mut generator = RoundGenerator::new(SmallRng::seed_from_u64(42));
        let draw = generator.generate(&Board::standard());
        assert_eq!(draw.attempts, 1);
        assert!(!draw.used_fallback);
        assert_eq!(draw.pieces.len(), PIECES_PER_ROUND);
        assert!(draw.pieces.iter().all(|p| !p.is_used()));
    }

    #[test]
    fn ids_are_unique_across_rounds() {
        let mut generator = RoundGenerator::new(SmallRng::seed_from_u64(7));
        let board = Board::standard();
        let first = generator.generate(&board);
        let second = generator.generate(&board);
        let ids: Vec<_> = first.pieces.iter().chain(&second.pieces).map(|p| p.id()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn full_board_falls_back_after_max_attempts() {
        let mut generator = RoundGenerator::with_limits(StepRng::new(0, 0), 3, 4);
        let draw = generator.generate(&full_board(8));
        assert!(draw.used_fallback);
        assert_eq!(draw.attempts, 4);
        assert!(draw.pieces.iter().all(|p| small_pool().contains(p.shape())));
        assert_eq!(*draw.pieces[0].shape(), MONO);
    }

    #[test]
    fn round_size_is_clamped() {
        let generator = RoundGenerator::with_limits(StepRng::new(0, 0), 0, 0);
        assert_eq!(generator.pieces_per_round(), 1);
        assert_eq!(generator.max_attempts(), 1);

        let generator = RoundGenerator::with_limits(StepRng::new(0, 0), 99, 3);
        assert_eq!(generator.pieces_per_round(), MAX_PIECES_PER_ROUND);
    }
}
