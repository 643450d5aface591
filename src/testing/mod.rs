pub mod fixtures;
pub mod stubs;

pub use stubs::ScriptedDriver;
