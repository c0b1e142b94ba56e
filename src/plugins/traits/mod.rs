pub mod notifier;

pub use notifier::{AlertMessage, Notifier};
