pub mod design_system;
pub mod navigation;
pub mod save_prompt;

pub use navigation::NavigationBar;
pub use save_prompt::SavePrompt;
