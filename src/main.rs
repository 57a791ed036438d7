//! Interactive demo: an agent solves a maze while the user reveals walls
//! between steps. The maze state is drawn after every move; navigation
//! itself lives entirely in the library.

use std::io::{self, BufRead, Write};

use grid_util::point::Point;
use log::warn;
use maze_floodfill::{
    Direction, FloodFill, Maze, MazeError, Navigator, Role, WallDiscovery, WallRequest,
    UNREACHABLE,
};

fn main() {
    env_logger::init();
    let size = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5);
    if let Err(err) = run(size) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(size: usize) -> Result<(), MazeError> {
    let mut maze = Maze::build(size)?;
    let mut flood = FloodFill::new();
    let mut navigator = Navigator::new(&maze);
    let mut discovery = StdinDiscovery;

    println!("{}", render(&maze, Some(navigator.position())));
    let outcome = navigator.solve(&mut maze, &mut flood, &mut discovery);
    println!("{}", render(&maze, Some(navigator.position())));

    match outcome {
        Ok(()) => {
            println!("final phase: {:?}", navigator.phase());
            let cells = navigator
                .path()
                .iter()
                .map(|p| format!("({}, {})", p.x, p.y))
                .collect::<Vec<String>>();
            println!("path from start to goal: {}", cells.join(" "));
            Ok(())
        }
        // A trap is a reported outcome, not a crash.
        Err(MazeError::NavigationTrapped) => {
            println!(
                "final phase: {:?} (no route to the target remains)",
                navigator.phase()
            );
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Interactive wall discovery mirroring the rendered maze: after each step
/// the user either continues or adds up to four walls as `x y <U|R|D|L>`.
struct StdinDiscovery;

impl WallDiscovery for StdinDiscovery {
    fn discover(&mut self, maze: &Maze, position: Point) -> Vec<WallRequest> {
        println!("{}", render(maze, Some(position)));
        print!("press enter to continue or type `w` to add walls: ");
        let _ = io::stdout().flush();
        let mut choice = String::new();
        if io::stdin().read_line(&mut choice).is_err() || choice.trim() != "w" {
            return Vec::new();
        }
        println!("up to 4 walls, one per line as `x y <U|R|D|L>`; blank line ends:");
        let mut requests = Vec::new();
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            if let Some(request) = parse_wall_request(line) {
                requests.push(request);
            }
            if requests.len() == 4 {
                break;
            }
        }
        requests
    }
}

/// Parses `x y <U|R|D|L>`, rejecting the single request on any bad field
/// without touching the rest of the batch.
fn parse_wall_request(line: &str) -> Option<WallRequest> {
    let mut parts = line.split_whitespace();
    let (x, y, letter) = (parts.next()?, parts.next()?, parts.next()?);
    let x: i32 = x.parse().ok()?;
    let y: i32 = y.parse().ok()?;
    match Direction::from_letter(letter.chars().next()?) {
        Ok(direction) => Some(WallRequest::new(x, y, direction)),
        Err(err) => {
            warn!("rejected wall request {:?}: {}", line, err);
            None
        }
    }
}

/// Draws the maze with its walls, flood distances and the agent position.
fn render(maze: &Maze, agent: Option<Point>) -> String {
    let n = maze.size() as i32;
    let mut out = String::new();
    for _ in 0..n {
        out.push_str("+---");
    }
    out.push_str("+\n");
    for y in 0..n {
        out.push('|');
        for x in 0..n {
            let p = Point::new(x, y);
            let label = if agent == Some(p) {
                " R ".to_string()
            } else {
                match maze.role(p) {
                    Role::Start => " S ".to_string(),
                    Role::Target => " T ".to_string(),
                    Role::Ordinary => {
                        let d = maze.distance_at(p);
                        if d == UNREACHABLE {
                            "   ".to_string()
                        } else {
                            format!("{:^3}", d)
                        }
                    }
                }
            };
            out.push_str(&label);
            if x < n - 1 && maze.is_wall(x, y, Direction::Right) {
                out.push('|');
            } else if x < n - 1 {
                out.push(' ');
            }
        }
        out.push_str("|\n");
        if y < n - 1 {
            for x in 0..n {
                out.push('+');
                if maze.is_wall(x, y, Direction::Down) {
                    out.push_str("---");
                } else {
                    out.push_str("   ");
                }
            }
            out.push_str("+\n");
        }
    }
    for _ in 0..n {
        out.push_str("+---");
    }
    out.push_str("+\n");
    out
}
