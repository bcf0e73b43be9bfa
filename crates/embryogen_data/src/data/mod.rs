pub mod agent;
pub mod cell;
pub mod stage;
