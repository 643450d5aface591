pub mod drivers;
pub mod session;
pub mod wizard;
