pub mod controller;
pub mod hover_state;
pub mod session;
