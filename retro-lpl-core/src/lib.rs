pub mod console;
pub mod util;

pub use console::ConsoleMap;
pub use util::PLAYLIST_EXTENSION;
