pub mod dto;
pub mod service;

pub use dto::VistaAlumnos;
pub use service::GrupoService;
