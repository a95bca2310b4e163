pub mod components;
pub mod forms;
pub mod layout;
pub mod pages;

pub use components::*;
pub use forms::*;
pub use layout::*;
pub use pages::*;
