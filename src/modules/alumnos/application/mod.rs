pub mod dto;
pub mod service;

pub use service::{AlumnoService, DEFAULT_UMBRAL};
