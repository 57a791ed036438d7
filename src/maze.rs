use core::fmt;

use grid_util::grid::{BoolGrid, Grid, SimpleGrid};
use grid_util::point::Point;
use itertools::iproduct;
use log::{debug, info, warn};
use petgraph::unionfind::UnionFind;

use crate::direction::Direction;
use crate::discovery::WallRequest;
use crate::error::MazeError;
use crate::flood::UNREACHABLE;

/// Role of a cell, derived from the maze configuration rather than stored
/// per cell, so resets trivially preserve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Ordinary,
    Start,
    Target,
}

/// Construction parameters for a [Maze]. Start and target positions are a
/// configuration choice; the defaults match the classic layout of a corner
/// start and a center goal.
#[derive(Debug, Clone, Copy)]
pub struct MazeConfig {
    pub size: usize,
    pub start: Point,
    pub target: Point,
}

impl MazeConfig {
    /// Start in the top-left corner, target at the grid center.
    pub fn with_size(size: usize) -> MazeConfig {
        MazeConfig {
            size,
            start: Point::new(0, 0),
            target: Point::new(size as i32 / 2, size as i32 / 2),
        }
    }
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig::with_size(5)
    }
}

/// [Maze] owns every cell of a square grid: per-cell wall sets as bitmasks
/// in a [SimpleGrid], the flood distance field and its backpointers,
/// exploration markers in a [BoolGrid], and a [UnionFind] over the currently
/// passable edges. Adjacency is fixed at construction; a wall only makes an
/// edge impassable, it never removes the neighbor relationship.
#[derive(Clone, Debug)]
pub struct Maze {
    size: usize,
    start: Point,
    target: Point,
    walls: SimpleGrid<u8>,
    dist: Vec<u32>,
    prev: Vec<Option<Point>>,
    visited: BoolGrid,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Maze {
    /// Allocates a `size`x`size` maze with the default corner/center layout
    /// and the perimeter walled. Fails with [MazeError::InvalidSize] if the
    /// grid cannot hold a meaningful start/target separation.
    pub fn build(size: usize) -> Result<Maze, MazeError> {
        Maze::with_config(MazeConfig::with_size(size))
    }

    pub fn with_config(config: MazeConfig) -> Result<Maze, MazeError> {
        let MazeConfig {
            size,
            start,
            target,
        } = config;
        if size < 2 {
            return Err(MazeError::InvalidSize(size));
        }
        let mut maze = Maze {
            size,
            start,
            target,
            walls: SimpleGrid::new(size, size, 0),
            dist: vec![UNREACHABLE; size * size],
            prev: vec![None; size * size],
            visited: BoolGrid::new(size, size, false),
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        for endpoint in [start, target] {
            if !maze.in_bounds(endpoint.x, endpoint.y) {
                return Err(MazeError::OutOfBounds {
                    x: endpoint.x,
                    y: endpoint.y,
                });
            }
        }
        maze.set_perimeter_walls();
        maze.generate_components();
        Ok(maze)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn role(&self, p: Point) -> Role {
        if p == self.start {
            Role::Start
        } else if p == self.target {
            Role::Target
        } else {
            Role::Ordinary
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.walls.index_in_bounds(x as usize, y as usize)
    }

    fn ix(&self, p: Point) -> usize {
        self.walls.get_ix(p.x as usize, p.y as usize)
    }

    /// The adjacent cell in `dir`, independent of wall state.
    pub fn neighbor_of(&self, p: Point, dir: Direction) -> Option<Point> {
        let (dx, dy) = dir.offset();
        let (nx, ny) = (p.x + dx, p.y + dy);
        self.in_bounds(nx, ny).then(|| Point::new(nx, ny))
    }

    /// Whether a wall is recorded on the edge leaving (x, y) in `dir`.
    /// Out-of-bounds cells read as fully walled.
    pub fn is_wall(&self, x: i32, y: i32, dir: Direction) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.walls.get(x as usize, y as usize) & dir.bit() != 0
    }

    /// A move across this edge is legal iff the neighbor exists and no wall
    /// is recorded on the shared edge: passable = adjacent AND NOT walled.
    pub fn is_passable(&self, x: i32, y: i32, dir: Direction) -> bool {
        if !self.in_bounds(x, y) || self.is_wall(x, y, dir) {
            return false;
        }
        let (dx, dy) = dir.offset();
        self.in_bounds(x + dx, y + dy)
    }

    /// The adjacent cell in `dir` if the edge toward it is currently open.
    pub fn passable_neighbor(&self, p: Point, dir: Direction) -> Option<Point> {
        if self.is_passable(p.x, p.y, dir) {
            self.neighbor_of(p, dir)
        } else {
            None
        }
    }

    /// Sets or clears the wall on the edge between (x, y) and its neighbor
    /// in `dir`, updating both sides of the edge in the same operation.
    /// Returns whether the wall state actually changed. Perimeter edges stay
    /// walled: a request to open one is ignored.
    pub fn set_wall(
        &mut self,
        x: i32,
        y: i32,
        dir: Direction,
        present: bool,
    ) -> Result<bool, MazeError> {
        if !self.in_bounds(x, y) {
            return Err(MazeError::OutOfBounds { x, y });
        }
        let p = Point::new(x, y);
        let neighbor = self.neighbor_of(p, dir);
        if !present && neighbor.is_none() {
            warn!("ignoring request to open the boundary wall at {} {:?}", p, dir);
            return Ok(false);
        }
        let changed = self.write_wall_bit(p, dir, present);
        if let Some(n) = neighbor {
            self.write_wall_bit(n, dir.opposite(), present);
            if changed {
                if present {
                    // May have split a component; regenerate lazily.
                    self.components_dirty = true;
                    debug!("wall added at {} {:?}", p, dir);
                } else {
                    let (a, b) = (self.ix(p), self.ix(n));
                    self.components.union(a, b);
                }
            }
        }
        Ok(changed)
    }

    fn write_wall_bit(&mut self, p: Point, dir: Direction, present: bool) -> bool {
        let mask = self.walls.get_point(p);
        let updated = if present {
            mask | dir.bit()
        } else {
            mask & !dir.bit()
        };
        self.walls.set_point(p, updated);
        updated != mask
    }

    fn set_perimeter_walls(&mut self) {
        let last = self.size as i32 - 1;
        for (x, y) in iproduct!(0..self.size as i32, 0..self.size as i32) {
            let p = Point::new(x, y);
            let mut mask = self.walls.get_point(p);
            if y == 0 {
                mask |= Direction::Up.bit();
            }
            if y == last {
                mask |= Direction::Down.bit();
            }
            if x == 0 {
                mask |= Direction::Left.bit();
            }
            if x == last {
                mask |= Direction::Right.bit();
            }
            self.walls.set_point(p, mask);
        }
    }

    /// Applies a batch of wall-insertion requests: every valid request is
    /// applied, invalid ones are skipped individually, and the components
    /// are refreshed once at the end so planning never observes a partially
    /// applied batch. Returns the number of edges that actually changed.
    pub fn apply_wall_batch(&mut self, requests: &[WallRequest]) -> usize {
        let mut applied = 0;
        for request in requests {
            match self.set_wall(request.x, request.y, request.direction, true) {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        "skipping wall request at ({}, {}): {}",
                        request.x, request.y, err
                    );
                }
            }
        }
        if applied > 0 {
            self.update();
            info!("applied {} discovered wall(s)", applied);
        }
        applied
    }

    /// Clears every interior wall and all per-cell navigation state while
    /// preserving the start/target roles and the perimeter walls.
    pub fn reset(&mut self) {
        self.walls = SimpleGrid::new(self.size, self.size, 0);
        self.set_perimeter_walls();
        self.visited = BoolGrid::new(self.size, self.size, false);
        self.clear_field();
        self.generate_components();
    }

    /// Resets the distance field to [UNREACHABLE] and drops all
    /// backpointers.
    pub(crate) fn clear_field(&mut self) {
        self.dist.fill(UNREACHABLE);
        self.prev.fill(None);
    }

    /// Hop distance from this cell to the target as of the last flood pass;
    /// [UNREACHABLE] for cells the flood did not reach or out-of-bounds
    /// queries.
    pub fn distance_at(&self, p: Point) -> u32 {
        if self.in_bounds(p.x, p.y) {
            self.dist[self.ix(p)]
        } else {
            UNREACHABLE
        }
    }

    pub(crate) fn set_distance(&mut self, p: Point, distance: u32) {
        let ix = self.ix(p);
        self.dist[ix] = distance;
    }

    /// The neighbor this cell would step to on the current shortest path
    /// toward the target.
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        if self.in_bounds(p.x, p.y) {
            self.prev[self.ix(p)]
        } else {
            None
        }
    }

    pub(crate) fn set_predecessor(&mut self, p: Point, predecessor: Option<Point>) {
        let ix = self.ix(p);
        self.prev[ix] = predecessor;
    }

    /// Marks a cell as explored. This flag is presentation state only; the
    /// flood fill never reads it.
    pub fn mark_visited(&mut self, p: Point) {
        if self.in_bounds(p.x, p.y) {
            self.visited.set_point(p, true);
        }
    }

    pub fn is_visited(&self, p: Point) -> bool {
        self.in_bounds(p.x, p.y) && self.visited.get_point(p)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("passability changed: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] and unions every pair of cells joined by
    /// a currently passable edge.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.size * self.size);
        self.components_dirty = false;
        for (x, y) in iproduct!(0..self.size as i32, 0..self.size as i32) {
            let p = Point::new(x, y);
            for dir in [Direction::Right, Direction::Down] {
                if let Some(n) = self.passable_neighbor(p, dir) {
                    let (a, b) = (self.ix(p), self.ix(n));
                    self.components.union(a, b);
                }
            }
        }
    }

    /// Checks whether two cells are joined by some passable route. This is
    /// an independent reachability view kept alongside the flood field; the
    /// planner's trap decision reads distances only. Stale until [update]
    /// runs after a mutation.
    ///
    /// [update]: Maze::update
    pub fn reachable(&self, a: Point, b: Point) -> bool {
        if self.in_bounds(a.x, a.y) && self.in_bounds(b.x, b.y) {
            self.components.equiv(self.ix(a), self.ix(b))
        } else {
            false
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Walls:")?;
        for y in 0..self.size as i32 {
            let values = (0..self.size as i32)
                .map(|x| self.walls.get_point(Point::new(x, y)))
                .collect::<Vec<u8>>();
            writeln!(f, "{:?}", values)?;
        }
        writeln!(f, "\nDistances:")?;
        for y in 0..self.size as i32 {
            let values = (0..self.size as i32)
                .map(|x| {
                    let d = self.distance_at(Point::new(x, y));
                    if d == UNREACHABLE {
                        "-".to_string()
                    } else {
                        d.to_string()
                    }
                })
                .collect::<Vec<String>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rejects_degenerate_sizes() {
        assert_eq!(Maze::build(0).unwrap_err(), MazeError::InvalidSize(0));
        assert_eq!(Maze::build(1).unwrap_err(), MazeError::InvalidSize(1));
        assert!(Maze::build(2).is_ok());
    }

    #[test]
    fn with_config_rejects_off_grid_endpoints() {
        let config = MazeConfig {
            size: 4,
            start: Point::new(0, 0),
            target: Point::new(4, 4),
        };
        assert_eq!(
            Maze::with_config(config).unwrap_err(),
            MazeError::OutOfBounds { x: 4, y: 4 }
        );
    }

    #[test]
    fn perimeter_is_walled_after_build() {
        let maze = Maze::build(5).unwrap();
        for i in 0..5 {
            assert!(maze.is_wall(i, 0, Direction::Up));
            assert!(maze.is_wall(i, 4, Direction::Down));
            assert!(maze.is_wall(0, i, Direction::Left));
            assert!(maze.is_wall(4, i, Direction::Right));
            assert!(!maze.is_passable(i, 0, Direction::Up));
        }
    }

    #[test]
    fn set_wall_updates_both_sides() {
        let mut maze = Maze::build(5).unwrap();
        assert!(maze.set_wall(1, 1, Direction::Right, true).unwrap());
        assert!(maze.is_wall(1, 1, Direction::Right));
        assert!(maze.is_wall(2, 1, Direction::Left));
        assert!(!maze.is_passable(1, 1, Direction::Right));
        assert!(!maze.is_passable(2, 1, Direction::Left));
        // Setting again is a no-op, clearing restores both sides.
        assert!(!maze.set_wall(1, 1, Direction::Right, true).unwrap());
        assert!(maze.set_wall(2, 1, Direction::Left, false).unwrap());
        assert!(!maze.is_wall(1, 1, Direction::Right));
        assert!(maze.is_passable(1, 1, Direction::Right));
    }

    #[test]
    fn set_wall_rejects_out_of_bounds() {
        let mut maze = Maze::build(3).unwrap();
        assert_eq!(
            maze.set_wall(3, 0, Direction::Up, true),
            Err(MazeError::OutOfBounds { x: 3, y: 0 })
        );
        assert_eq!(
            maze.set_wall(0, -1, Direction::Down, true),
            Err(MazeError::OutOfBounds { x: 0, y: -1 })
        );
    }

    #[test]
    fn boundary_walls_survive_everything() {
        let mut maze = Maze::build(4).unwrap();
        assert!(!maze.set_wall(0, 0, Direction::Up, false).unwrap());
        assert!(maze.is_wall(0, 0, Direction::Up));
        maze.set_wall(1, 1, Direction::Down, true).unwrap();
        maze.reset();
        assert!(!maze.is_wall(1, 1, Direction::Down));
        for i in 0..4 {
            assert!(maze.is_wall(i, 0, Direction::Up));
            assert!(maze.is_wall(i, 3, Direction::Down));
            assert!(maze.is_wall(0, i, Direction::Left));
            assert!(maze.is_wall(3, i, Direction::Right));
        }
    }

    #[test]
    fn reset_clears_navigation_state() {
        let mut maze = Maze::build(4).unwrap();
        maze.set_distance(Point::new(1, 1), 7);
        maze.set_predecessor(Point::new(1, 1), Some(Point::new(2, 1)));
        maze.mark_visited(Point::new(1, 1));
        maze.reset();
        assert_eq!(maze.distance_at(Point::new(1, 1)), UNREACHABLE);
        assert_eq!(maze.predecessor(Point::new(1, 1)), None);
        assert!(!maze.is_visited(Point::new(1, 1)));
        assert_eq!(maze.role(maze.start()), Role::Start);
        assert_eq!(maze.role(maze.target()), Role::Target);
    }

    #[test]
    fn components_follow_wall_changes() {
        let mut maze = Maze::build(3).unwrap();
        let start = maze.start();
        let target = maze.target();
        assert!(maze.reachable(start, target));
        // Seal the column between x = 0 and x = 1.
        for y in 0..3 {
            maze.set_wall(0, y, Direction::Right, true).unwrap();
        }
        maze.update();
        assert!(!maze.reachable(start, target));
        // Clearing one edge reconnects immediately, no regeneration needed.
        maze.set_wall(0, 1, Direction::Right, false).unwrap();
        assert!(maze.reachable(start, target));
    }

    #[test]
    fn batch_application_skips_invalid_requests() {
        let mut maze = Maze::build(5).unwrap();
        let requests = [
            WallRequest::new(9, 9, Direction::Up),
            WallRequest::new(1, 1, Direction::Right),
            WallRequest::new(1, 1, Direction::Right),
        ];
        assert_eq!(maze.apply_wall_batch(&requests), 1);
        assert!(maze.is_wall(1, 1, Direction::Right));
    }
}
