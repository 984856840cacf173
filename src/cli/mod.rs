pub mod server;
pub mod submit;
pub mod verify;
