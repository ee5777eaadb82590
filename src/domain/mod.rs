pub mod chat;
pub mod delivery;
pub mod message;
