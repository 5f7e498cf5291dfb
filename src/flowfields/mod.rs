//! Flowfields steer a crowd of agents to a single target without
//! pathfinding for each of them individually.
//!
//! [Fixing Pathfinding Once and For All](https://web.archive.org/web/20150905073624/http://www.ai-blog.net/archives/000152.html)
//!
//! [leifnode](https://leifnode.com/2013/12/flow-field-pathfinding/)
//!
//! The terrain is a fixed grid of tiles centred on the world origin. When a
//! target is set three things are produced in turn:
//!
//! * Cost field - accumulated cost of reaching the target from each cell,
//! spread outward from the target as a wavefront
//! * Direction kernel - the candidate directions a cell may steer in, each
//! with weighted samples along its line. It only depends on the kernel
//! radius and is shared between calculations
//! * Vector field - for each cell the candidate direction with the lowest
//! average cost along its samples
//!
//! ```text
//!  _____________________________
//! |  ↘  |  ↘  |  ↓  |  ↙  |  ↙  |
//! |_____|_____|_____|_____|_____|
//! |  ↘  |  ↘  |  ↓  |  ↙  |  ↙  |
//! |_____|_____|_____|_____|_____|
//! |  →  |  →  |  x  |  ←  |  ←  |
//! |_____|_____|_____|_____|_____|
//! |  ↗  |  ↗  |  ↑  |  ↖  |  ↖  |
//! |_____|_____|_____|_____|_____|
//! |  ↗  |  ↗  |  ↑  |  ↖  |  ↖  |
//! |_____|_____|_____|_____|_____|
//! ```
//!
//! The vector field, the target and its generation make up a navigation
//! grid which agents read every tick.
//!

pub mod fields;
pub mod navigation_grid;
pub mod steering;
pub mod terrain;
pub mod tiles;
pub mod utilities;
