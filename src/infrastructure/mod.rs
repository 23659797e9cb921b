pub mod generation;
pub mod messaging;
pub mod repositories;
