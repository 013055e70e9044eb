//! Business logic services for the Hyperlocal Intelligence Platform

pub mod alert;
pub mod forecast;
pub mod location;
pub mod monitor;
pub mod notification;
pub mod risk_engine;
pub mod trigger;

pub use alert::AlertService;
pub use forecast::ForecastService;
pub use location::LocationService;
pub use monitor::{MonitorState, ParametricMonitor, SweepReport};
pub use notification::{AlertNotifier, NotificationService};
pub use trigger::TriggerService;
