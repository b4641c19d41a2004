use std::sync::mpsc;
use std::time::Duration;

use grid_snake::config::GridSize;
use grid_snake::engine::{GameEvent, GameLoop};
use grid_snake::game::{GridState, StepResult};
use grid_snake::input::Direction;
use grid_snake::pacing::Pacing;
use grid_snake::snake::{Position, Snake};

fn cells(points: &[(i32, i32)]) -> Vec<Position> {
    points.iter().map(|&(x, y)| Position { x, y }).collect()
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = GridState::with_seed(
        GridSize {
            width: 10,
            height: 10,
        },
        42,
    );
    assert_eq!(state.snapshot().snake, cells(&[(5, 5), (4, 5)]));

    assert_eq!(state.step(Direction::Right), StepResult::Moved);
    assert_eq!(state.snapshot().snake, cells(&[(6, 5), (5, 5)]));

    state.set_food(Some(Position { x: 7, y: 5 }));
    assert_eq!(state.step(Direction::Right), StepResult::AteFood);
    assert_eq!(state.snapshot().snake, cells(&[(7, 5), (6, 5), (5, 5)]));
    assert_eq!(state.food(), None);

    assert!(state.place_food());
    let food = state.food().expect("food placed");
    assert!(!state.snake().occupies(food));

    // Two more cells to the right edge, then the wall.
    state.set_food(None);
    assert_eq!(state.step(Direction::Right), StepResult::Moved);
    assert_eq!(state.step(Direction::Right), StepResult::Moved);
    let at_edge = state.snapshot();
    assert_eq!(at_edge.snake[0], Position { x: 9, y: 5 });

    assert_eq!(state.step(Direction::Right), StepResult::Collided);
    assert_eq!(state.snapshot().snake, at_edge.snake);
}

#[test]
fn full_three_by_three_board_has_no_room_for_food() {
    let mut state = GridState::with_seed(
        GridSize {
            width: 3,
            height: 3,
        },
        7,
    );
    state.replace_snake(Snake::from_segments(cells(&[
        (1, 1),
        (0, 1),
        (0, 0),
        (1, 0),
        (2, 0),
        (2, 1),
        (2, 2),
        (1, 2),
        (0, 2),
    ])));

    assert!(!state.place_food());
    assert_eq!(state.food(), None);
}

#[test]
fn threaded_loop_steers_by_latest_direction() {
    let (tx, rx) = mpsc::channel();
    let grid = GridState::with_seed(
        GridSize {
            width: 10,
            height: 10,
        },
        5,
    );
    let pacing = Pacing {
        initial: Duration::from_millis(1),
        step: Duration::ZERO,
        floor: Duration::from_millis(1),
    };
    let mut game = GameLoop::new(grid, pacing, tx);

    // Heading up from (5,5) reaches the top wall after five moves.
    game.set_direction(Direction::Up);
    assert!(game.start().expect("start"));

    let mut frames = Vec::new();
    let length = loop {
        match rx.recv_timeout(Duration::from_secs(5)).expect("events") {
            GameEvent::Frame(snapshot) => frames.push(snapshot),
            GameEvent::GameOver { length } => break length,
            GameEvent::Status { .. } | GameEvent::SpeedUp { .. } => {}
        }
    };
    game.stop().expect("stop");

    assert_eq!(length, 2);
    assert_eq!(frames.len(), 6);
    assert_eq!(frames[4].snake, cells(&[(5, 0), (5, 1)]));
    assert!(frames.iter().all(|frame| frame.direction == Direction::Up));
}
