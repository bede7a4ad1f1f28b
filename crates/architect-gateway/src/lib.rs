//! Architect Gateway - web endpoint and demo widget for the directive text

pub mod server;

pub use server::{start_gateway, ServeOptions};
