mod app;
mod components;
mod details;
mod event_loop;
mod keymap;
mod layout;
mod overlay;
mod theme;
mod widgets;

pub use app::*;
pub use components::*;
pub use details::*;
pub use event_loop::*;
pub use keymap::*;
pub use layout::*;
pub use overlay::*;
pub use theme::*;
pub use widgets::*;
