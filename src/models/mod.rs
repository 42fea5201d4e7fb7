pub mod frame;
pub mod network;
pub mod profile;
pub mod token;
