//! Launches composed `ssh` commands in a terminal window, falling back to a
//! plain shell when the preferred terminal is not installed.

mod launcher;
mod probe;
mod program;

pub use launcher::{Invocation, Launcher, Outcome, Route, Session};
pub use probe::Locator;
pub use program::{PLACEHOLDER, Program};
