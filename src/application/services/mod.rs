pub mod generator;
pub mod queue;
pub mod rotation;
pub mod scheduler;
pub mod settings;
pub mod submitter;
pub mod timer;
