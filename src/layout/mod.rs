pub mod compose;
pub mod strategy;
