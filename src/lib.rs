pub mod cheese_battle;
pub mod console;
pub mod session;
pub mod settings;
mod util;
