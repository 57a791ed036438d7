use grid_util::point::Point;
use log::{debug, info};

use crate::direction::Direction;
use crate::error::MazeError;
use crate::flood::{FloodFill, UNREACHABLE};
use crate::maze::Maze;

/// Greedy descent over the flood distance field.
///
/// Moves are only ever made toward a strictly smaller distance, so the
/// planner cannot cycle; when the local optimum disappears after a wall
/// discovery it refloods the field once before giving up.
#[derive(Debug, Default)]
pub struct GreedyPlanner;

impl GreedyPlanner {
    pub fn new() -> GreedyPlanner {
        GreedyPlanner
    }

    /// The passable neighbor with the smallest recorded distance, provided
    /// that distance strictly improves on `current`'s own. Ties go to the
    /// first direction in scan order, since the scan only replaces its
    /// candidate on a strict improvement.
    pub fn best_move(&self, maze: &Maze, current: Point) -> Option<Point> {
        let mut best = None;
        let mut min_distance = maze.distance_at(current);
        for dir in Direction::CARDINAL {
            if let Some(neighbor) = maze.passable_neighbor(current, dir) {
                let d = maze.distance_at(neighbor);
                if d < min_distance {
                    min_distance = d;
                    best = Some(neighbor);
                }
            }
        }
        best
    }

    /// True iff no passable neighbor of `current` has a finite distance,
    /// including the case of no passable neighbor at all. This is the sole
    /// basis for declaring navigation permanently failed.
    pub fn is_trapped(&self, maze: &Maze, current: Point) -> bool {
        Direction::CARDINAL.iter().all(|&dir| {
            match maze.passable_neighbor(current, dir) {
                Some(neighbor) => maze.distance_at(neighbor) == UNREACHABLE,
                None => true,
            }
        })
    }

    /// Picks the next cell to move to from `current`.
    ///
    /// A freshly discovered wall can leave the cached field stale without
    /// making the cell provably trapped, so a failed lookup triggers one
    /// full recomputation before the trap verdict is final.
    pub fn plan_step(
        &self,
        maze: &mut Maze,
        flood: &mut FloodFill,
        current: Point,
    ) -> Result<Point, MazeError> {
        flood.ensure_fresh(maze);
        if let Some(next) = self.best_move(maze, current) {
            return Ok(next);
        }
        if self.is_trapped(maze, current) {
            info!("no passable neighbor of {} can reach the target", current);
            return Err(MazeError::NavigationTrapped);
        }
        debug!("local optimum vanished at {}; reflooding", current);
        flood.recompute(maze);
        self.best_move(maze, current)
            .ok_or(MazeError::NavigationTrapped)
    }
}
