pub mod dispatches;
pub mod health;
pub mod recipients;
pub mod root;
pub mod run;
pub mod settings;
