pub mod _structs;
pub mod commands;
pub mod focus;
pub mod lod;

pub use _structs::*;
pub use commands::*;
pub use focus::*;
pub use lod::*;
