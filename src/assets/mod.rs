pub mod decode;
pub mod naming;
pub mod source;
pub mod store;
pub mod validate;
