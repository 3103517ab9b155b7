pub mod command;
pub mod request;
pub mod scene;
pub mod settings;

pub use command::{command_schema, is_valid_command, parse_command, Axis, Command};
pub use request::InterpretRequest;
pub use scene::SceneState;
pub use settings::{ProviderSettings, SettingsError};
