use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Picks a uniformly random cell the snake does not occupy.
///
/// Draws cells until a free one turns up. Returns `None` without sampling when
/// the snake already covers the whole board, which is the only case where the
/// loop could fail to terminate.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if snake.len() >= bounds.total_cells() {
        return None;
    }

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;

    use super::spawn_position;
    use crate::snake::{Position, Snake};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(vec![
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 2, y: 0 },
        ]);
        let bounds = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..100 {
            let food = spawn_position(&mut rng, bounds, &snake).expect("board has free cells");
            assert!(!snake.occupies(food));
            assert!(food.is_within_bounds(bounds));
        }
    }

    #[test]
    fn single_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let snake = Snake::from_segments(vec![
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 1, y: 1 },
        ]);

        assert_eq!(
            spawn_position(&mut rng, bounds, &snake),
            Some(Position { x: 0, y: 1 })
        );
    }

    #[test]
    fn full_board_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = GridSize {
            width: 2,
            height: 1,
        };
        let snake = Snake::from_segments(vec![Position { x: 0, y: 0 }, Position { x: 1, y: 0 }]);

        assert_eq!(spawn_position(&mut rng, bounds, &snake), None);
    }
}
