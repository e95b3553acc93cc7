pub mod palette;
pub mod resolver;
