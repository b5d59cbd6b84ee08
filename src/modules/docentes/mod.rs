/// Instructors (Docente)
pub mod application;
pub mod domain;
pub mod handlers;

pub use application::DocenteService;
pub use domain::{Docente, DocenteResumen};
