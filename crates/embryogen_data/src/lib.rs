pub mod data;

pub use data::agent::*;
pub use data::cell::*;
pub use data::stage::*;
