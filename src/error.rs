use thiserror::Error;

/// Errors raised by maze construction, topology mutation and navigation.
///
/// Topology errors (`OutOfBounds`, `InvalidDirection`) are local and
/// recoverable: a wall-discovery batch skips the offending request and
/// carries on. `NavigationTrapped` is a first-class planning outcome,
/// mirrored by [`Phase::Trapped`](crate::Phase::Trapped) on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Grid construction with a size too small to separate start and target.
    #[error("maze size {0} is too small (minimum 2)")]
    InvalidSize(usize),
    /// Coordinate outside the grid extent.
    #[error("cell ({x}, {y}) is outside the maze")]
    OutOfBounds { x: i32, y: i32 },
    /// Direction encoding outside the four cardinal directions.
    #[error("direction code {0} is not a cardinal direction")]
    InvalidDirection(u8),
    /// No improving move exists and no passable neighbor of the current
    /// cell can reach the target.
    #[error("agent is trapped: no passable route to the target")]
    NavigationTrapped,
}
