pub mod loader;
pub mod source;
