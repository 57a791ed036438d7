use grid_util::point::Point;
use log::{info, warn};

use crate::discovery::WallDiscovery;
use crate::error::MazeError;
use crate::flood::FloodFill;
use crate::maze::Maze;
use crate::planner::GreedyPlanner;

/// Lifecycle phase of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Walking from the start toward the target, replanning as walls appear.
    Outbound,
    /// The target cell has just been entered.
    GoalReached,
    /// Walking the recorded path back to the start.
    Returning,
    /// Terminal failure: no passable route to the target remains.
    Trapped,
    /// Terminal success: the agent is back on the start cell.
    Done,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Trapped)
    }
}

/// Drives the agent through the maze: asks the planner for moves, records
/// the realized path, yields to the wall-discovery collaborator between
/// outbound steps and manages the outbound/return lifecycle.
#[derive(Debug)]
pub struct Navigator {
    position: Point,
    path: Vec<Point>,
    phase: Phase,
    planner: GreedyPlanner,
}

impl Navigator {
    pub fn new(maze: &Maze) -> Navigator {
        Navigator {
            position: maze.start(),
            path: Vec::new(),
            phase: Phase::Outbound,
            planner: GreedyPlanner::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The outbound path in traversal order; includes the target once the
    /// goal has been reached. Not necessarily a shortest path, since
    /// replanning may force excursions.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Runs one full solve: outbound to the target, then back to the start.
    ///
    /// On success the final phase is [Phase::Done]. If the planner confirms
    /// a trap the phase becomes [Phase::Trapped], the agent stops moving,
    /// and the failure is reported as [MazeError::NavigationTrapped].
    pub fn solve(
        &mut self,
        maze: &mut Maze,
        flood: &mut FloodFill,
        discovery: &mut dyn WallDiscovery,
    ) -> Result<(), MazeError> {
        self.path.clear();
        self.position = maze.start();
        self.phase = Phase::Outbound;
        maze.mark_visited(self.position);
        flood.invalidate();
        info!("solve started at {}", self.position);

        while self.position != maze.target() {
            self.path.push(self.position);
            let next = match self.planner.plan_step(maze, flood, self.position) {
                Ok(next) => next,
                Err(err) => {
                    self.phase = Phase::Trapped;
                    warn!("navigation failed at {}: {}", self.position, err);
                    return Err(err);
                }
            };
            self.position = next;
            maze.mark_visited(next);
            self.discover_walls(maze, flood, discovery);
        }

        self.phase = Phase::GoalReached;
        self.path.push(self.position);
        maze.mark_visited(self.position);
        info!(
            "goal reached at {} after visiting {} cells",
            self.position,
            self.path.len()
        );

        self.phase = Phase::Returning;
        self.return_to_start(maze);
        Ok(())
    }

    /// Yields to the wall-discovery collaborator, applies its whole batch,
    /// and invalidates the flood field if anything changed, so the next
    /// planning decision sees a fully consistent wall state.
    fn discover_walls(
        &mut self,
        maze: &mut Maze,
        flood: &mut FloodFill,
        discovery: &mut dyn WallDiscovery,
    ) {
        let requests = discovery.discover(maze, self.position);
        if requests.is_empty() {
            return;
        }
        if maze.apply_wall_batch(&requests) > 0 {
            flood.invalidate();
            if !maze.reachable(self.position, maze.target()) {
                info!("discovered walls cut the target off from {}", self.position);
            }
        }
    }

    /// Walks the recorded path in reverse until the start cell is reached.
    fn return_to_start(&mut self, maze: &mut Maze) {
        info!("returning to start");
        let start = maze.start();
        for i in (0..self.path.len()).rev() {
            let cell = self.path[i];
            self.position = cell;
            maze.mark_visited(cell);
            if cell == start {
                break;
            }
        }
        self.phase = Phase::Done;
        info!("agent returned to the start cell");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::NoDiscovery;

    #[test]
    fn phases_classify_terminality() {
        assert!(Phase::Done.is_terminal());
        assert!(Phase::Trapped.is_terminal());
        assert!(!Phase::Outbound.is_terminal());
        assert!(!Phase::GoalReached.is_terminal());
        assert!(!Phase::Returning.is_terminal());
    }

    #[test]
    fn solve_clears_the_previous_path() {
        let mut maze = Maze::build(5).unwrap();
        let mut flood = FloodFill::new();
        let mut navigator = Navigator::new(&maze);
        navigator
            .solve(&mut maze, &mut flood, &mut NoDiscovery)
            .unwrap();
        let first_len = navigator.path().len();
        navigator
            .solve(&mut maze, &mut flood, &mut NoDiscovery)
            .unwrap();
        assert_eq!(navigator.path().len(), first_len);
        assert_eq!(navigator.phase(), Phase::Done);
    }
}
