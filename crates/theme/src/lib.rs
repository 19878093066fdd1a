pub mod colors;
pub mod cycle;
pub mod table;

pub use colors::Color;
pub use cycle::{set_action_icon, ThemeCycle};
pub use table::{ThemeDefinition, ThemeTable, THEME_COUNT};
