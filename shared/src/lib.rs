// Data models shared between the engine and any client of its status surface.
pub mod models;
pub mod utils;
