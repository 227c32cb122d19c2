pub mod engine;
pub mod progressive;
pub mod row;
pub mod sink;
