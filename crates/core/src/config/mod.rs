//! Gate settings for lintgate

mod settings;
pub mod validation;

// Re-export main types
pub use settings::{
    DEFAULT_RULES_FILE, DEFAULT_RULES_FLAG, DEFAULT_TARGET, DEFAULT_TOOL, GateSettings,
    SETTINGS_FILE_NAME,
};
pub use validation::validate_settings;
