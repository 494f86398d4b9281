// UI and formatting module

pub mod formatters;
pub mod prompts;

// Re-export commonly used items for cleaner imports
pub use formatters::{
    format_value, severity_colored, short_time, sparkline, status_colored, trend_label,
};
pub use prompts::{prompt_password, prompt_text};
