mod picker;
mod replay;

pub use picker::{ReplayPicker, ReplayPickerMessage};
pub use replay::{ReplayScreen, ReplayScreenMessage};
