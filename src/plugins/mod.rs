pub mod notifiers;
pub mod traits;
pub mod trackers;

pub use traits::{AlertMessage, Notifier};
