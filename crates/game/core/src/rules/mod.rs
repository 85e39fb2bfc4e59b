//! Base-running rules shared by the reducer and the tracker.
//!
//! - [`forced`]: which runners a batter who reaches base pushes ahead
//! - [`advance`]: replay of a play's runner advances over the starting bases
//! - [`credit`]: which runs count and which are batted in
pub mod advance;
pub mod credit;
pub mod forced;

pub use advance::{PlayReplay, replay_advances};
pub use credit::{derive_rbis, ends_on_force_play};
pub use forced::{compute_forced_advances, fill_forced_advances, forced_runner_floor};
