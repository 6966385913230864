pub mod playback;

pub use playback::{DayCursor, PlaybackTick, Step};

#[cfg(feature = "tokio-runtime")]
pub use playback::Autoplay;
