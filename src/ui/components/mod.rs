pub mod menu;
pub mod progress_bar;
pub mod progress_view;
pub mod settings_view;
