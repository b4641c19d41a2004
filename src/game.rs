use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GridSize;
use crate::food::spawn_position;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Outcome of a single simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepResult {
    /// The snake moved one cell without growing.
    Moved,
    /// The snake moved onto the food and grew by one segment.
    AteFood,
    /// The move would hit a wall or the body; nothing changed.
    Collided,
}

/// Read-only copy of everything the renderer needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GridSnapshot {
    pub bounds: GridSize,
    /// Snake cells from head to tail.
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub direction: Direction,
}

impl GridSnapshot {
    #[must_use]
    pub fn length(&self) -> usize {
        self.snake.len()
    }
}

/// Board state for one session: snake, heading and the active food item.
#[derive(Debug, Clone)]
pub struct GridState {
    bounds: GridSize,
    snake: Snake,
    direction: Direction,
    food: Option<Position>,
    rng: StdRng,
}

impl GridState {
    /// Creates a freshly reset board with an entropy-seeded RNG.
    ///
    /// # Panics
    ///
    /// Panics when `bounds` is smaller than 2x1, the room the starting snake needs.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic board for tests and reproducible sessions.
    ///
    /// Same size requirement as [`GridState::new`].
    #[must_use]
    pub fn with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, rng: StdRng) -> Self {
        assert!(
            bounds.width >= 2 && bounds.height >= 1,
            "grid {}x{} cannot hold the starting snake",
            bounds.width,
            bounds.height,
        );

        let mut state = Self {
            bounds,
            snake: Snake::default(),
            direction: Direction::Right,
            food: None,
            rng,
        };
        state.reset();
        state
    }

    /// Puts a two-segment snake in the middle of the board heading right.
    pub fn reset(&mut self) {
        let head = Position {
            x: i32::from(self.bounds.width / 2),
            y: i32::from(self.bounds.height / 2),
        };
        self.snake = Snake::from_segments(vec![
            head,
            Position {
                x: head.x - 1,
                y: head.y,
            },
        ]);
        self.direction = Direction::Right;
        self.food = None;
    }

    /// Advances the snake one cell in `direction`.
    ///
    /// Either the whole move is applied or, on [`StepResult::Collided`], the
    /// snake and food are left exactly as they were.
    pub fn step(&mut self, direction: Direction) -> StepResult {
        self.direction = direction;

        let Some(head) = self.snake.head() else {
            return StepResult::Collided;
        };

        let next = head.step(direction);
        if !next.is_within_bounds(self.bounds) {
            return StepResult::Collided;
        }

        let will_eat = self.food == Some(next);
        if self.snake.would_collide(next, !will_eat) {
            return StepResult::Collided;
        }

        self.snake.advance(next, will_eat);
        if will_eat {
            self.food = None;
            StepResult::AteFood
        } else {
            StepResult::Moved
        }
    }

    /// Places food on a random free cell.
    ///
    /// Returns `false` and leaves the food absent when the snake fills the board.
    pub fn place_food(&mut self) -> bool {
        self.food = spawn_position(&mut self.rng, self.bounds, &self.snake);
        self.food.is_some()
    }

    /// Overrides the food cell. Callers are responsible for keeping it off the snake.
    pub fn set_food(&mut self, food: Option<Position>) {
        self.food = food;
    }

    /// Replaces the snake body, e.g. to set up a scenario.
    pub fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            bounds: self.bounds,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            direction: self.direction,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}
