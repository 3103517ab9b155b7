pub mod client;
pub mod controller;
pub mod shorthand;

pub use client::{ClientError, InterpretClient};
pub use controller::Controller;
