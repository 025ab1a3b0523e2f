pub mod search;

pub use search::{App, Route};
