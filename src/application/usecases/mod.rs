pub mod add_recipient;
pub mod get_dashboard;
pub mod get_settings;
pub mod list_dispatches;
pub mod list_recipients;
pub mod remove_recipient;
pub mod update_run_config;
