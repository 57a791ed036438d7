use std::collections::VecDeque;

use grid_util::point::Point;

use crate::direction::Direction;
use crate::maze::Maze;

/// A single wall-insertion request from the discovery collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallRequest {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl WallRequest {
    pub fn new(x: i32, y: i32, direction: Direction) -> WallRequest {
        WallRequest { x, y, direction }
    }
}

/// Collaborator that reveals walls between outbound steps.
///
/// The exchange is synchronous: the controller hands over the read-only maze
/// and the agent position, the collaborator answers with a batch of zero or
/// more insertion requests, and the whole batch is applied before the next
/// planning decision.
pub trait WallDiscovery {
    fn discover(&mut self, maze: &Maze, position: Point) -> Vec<WallRequest>;
}

/// Discovery source for a fully known maze: never reports anything.
#[derive(Debug, Default)]
pub struct NoDiscovery;

impl WallDiscovery for NoDiscovery {
    fn discover(&mut self, _maze: &Maze, _position: Point) -> Vec<WallRequest> {
        Vec::new()
    }
}

/// Scripted discovery source: hands out one prepared batch per outbound
/// step, then stays quiet. Used to replay wall sequences in tests and demos.
#[derive(Debug, Default)]
pub struct QueuedDiscovery {
    batches: VecDeque<Vec<WallRequest>>,
}

impl QueuedDiscovery {
    pub fn new() -> QueuedDiscovery {
        QueuedDiscovery::default()
    }

    pub fn push_batch(&mut self, batch: Vec<WallRequest>) {
        self.batches.push_back(batch);
    }
}

impl WallDiscovery for QueuedDiscovery {
    fn discover(&mut self, _maze: &Maze, _position: Point) -> Vec<WallRequest> {
        self.batches.pop_front().unwrap_or_default()
    }
}
