pub(crate) mod flash;
pub(crate) mod loading;

pub use flash::{Flash, FlashKind};
