//! TUI widgets

pub mod car_select;
pub mod control_list;
pub mod modal;
pub mod sidebar;

pub use car_select::CarSelectList;
pub use control_list::ControlList;
pub use sidebar::Sidebar;
