//! Domain models for the Hyperlocal Intelligence Platform

mod alert;
mod location;
mod trigger;
mod weather;

pub use alert::*;
pub use location::*;
pub use trigger::*;
pub use weather::*;
