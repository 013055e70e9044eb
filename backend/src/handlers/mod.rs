//! HTTP handlers for the Hyperlocal Intelligence Platform API

pub mod alert;
pub mod forecast;
pub mod health;
pub mod location;
pub mod trigger;

pub use alert::*;
pub use forecast::*;
pub use health::*;
pub use location::*;
pub use trigger::*;
