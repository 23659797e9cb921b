pub mod message;
pub mod recipient;
pub mod settings;
pub mod theme;

pub use message::{DispatchRecord, DispatchStatus};
pub use recipient::{MAX_RECIPIENTS, RecipientHandle};
pub use settings::{RunInterval, SETTINGS_VERSION, Settings};
pub use theme::MessageTheme;
