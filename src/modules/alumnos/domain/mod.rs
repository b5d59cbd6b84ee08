pub mod entities;
pub mod queries;

pub use entities::{Alumno, AlumnoResumen, MateriaCursada};
