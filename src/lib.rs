//! # maze_floodfill
//!
//! Grid maze navigation with partially known walls. Implements the
//! [flood fill](https://en.wikipedia.org/wiki/Flood_fill) strategy used by
//! [micromouse](https://en.wikipedia.org/wiki/Micromouse) robots: a
//! breadth-first distance field rooted at the target cell, a greedy planner
//! that descends it, and a traversal controller that walks the agent out to
//! the target and back while newly discovered walls invalidate the field and
//! force replanning. Maintains
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! over the currently passable edges as an independent reachability view.
pub mod direction;
pub mod discovery;
pub mod error;
pub mod flood;
pub mod maze;
pub mod navigator;
pub mod planner;

pub use direction::Direction;
pub use discovery::{NoDiscovery, QueuedDiscovery, WallDiscovery, WallRequest};
pub use error::MazeError;
pub use flood::{FloodFill, UNREACHABLE};
pub use maze::{Maze, MazeConfig, Role};
pub use navigator::{Navigator, Phase};
pub use planner::GreedyPlanner;
