pub mod modules;
mod schema;
pub mod server;
pub mod shared;
