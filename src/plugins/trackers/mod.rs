pub mod price;

pub use price::{below_threshold, parse_price};
