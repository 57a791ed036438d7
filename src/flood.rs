use std::collections::VecDeque;

use grid_util::point::Point;
use log::debug;

use crate::direction::Direction;
use crate::maze::Maze;

/// Sentinel distance for cells with no passable route to the target.
pub const UNREACHABLE: u32 = u32::MAX;

/// Goal-rooted breadth-first distance engine.
///
/// [recompute](FloodFill::recompute) rebuilds the whole field from the
/// target outward over the currently passable edges. The engine carries a
/// dirty flag so traversal code can invalidate the field when walls appear
/// and refresh it lazily before the next planning decision; the internal
/// queue is reused across passes.
#[derive(Debug)]
pub struct FloodFill {
    queue: VecDeque<Point>,
    dirty: bool,
}

impl FloodFill {
    pub fn new() -> FloodFill {
        FloodFill {
            queue: VecDeque::new(),
            dirty: true,
        }
    }

    /// Marks the cached field as stale.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recomputes the field iff it was invalidated since the last pass.
    pub fn ensure_fresh(&mut self, maze: &mut Maze) {
        if self.dirty {
            self.recompute(maze);
        }
    }

    /// Rebuilds the distance field and backpointers from the target cell.
    ///
    /// Every distance is first reset to [UNREACHABLE], the target is seeded
    /// at 0, and neighbors are relaxed in fixed scan order, recording the
    /// predecessor on every improvement. Each edge costs one hop, so the
    /// first breadth-first assignment to a cell is already its shortest
    /// distance and later visits cannot improve it. Calling this twice with
    /// no wall changes in between yields an identical field.
    pub fn recompute(&mut self, maze: &mut Maze) {
        maze.clear_field();
        let target = maze.target();
        maze.set_distance(target, 0);
        self.queue.clear();
        self.queue.push_back(target);
        while let Some(current) = self.queue.pop_front() {
            let relaxed = maze.distance_at(current) + 1;
            for dir in Direction::CARDINAL {
                if let Some(neighbor) = maze.passable_neighbor(current, dir) {
                    if relaxed < maze.distance_at(neighbor) {
                        maze.set_distance(neighbor, relaxed);
                        maze.set_predecessor(neighbor, Some(current));
                        self.queue.push_back(neighbor);
                    }
                }
            }
        }
        self.dirty = false;
        debug!("flood field recomputed from {}", target);
    }
}

impl Default for FloodFill {
    fn default() -> FloodFill {
        FloodFill::new()
    }
}
