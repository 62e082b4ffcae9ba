pub mod health;
pub mod phase;
pub mod room;
pub mod ws;
