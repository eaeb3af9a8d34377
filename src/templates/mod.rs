pub mod layout;
pub mod components;
pub mod pages;

pub use layout::*;
pub use components::*;
pub use pages::*;
