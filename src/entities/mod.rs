mod play_style;
mod replay;
mod tag;
mod user;

pub use play_style::{PlayStyleRawResponse, PlayStyleResponse};
pub use replay::Replay;
pub use tag::{Tag, TagList};
pub use user::LoggedInUser;
