pub mod booking;
pub mod directory;
pub mod time_format;

pub use time_format::DateFormat;
