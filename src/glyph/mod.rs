pub mod key;
pub mod resolver;
