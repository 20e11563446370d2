pub mod api;
pub mod rows;

pub use api::*;
pub use rows::*;
