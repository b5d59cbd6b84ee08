pub mod body;
pub mod crud;
pub mod request_log;

pub use crud::crud_routes;
pub use request_log::log_requests;
