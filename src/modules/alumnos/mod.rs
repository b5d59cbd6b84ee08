/// Students (Alumno)
///
/// CRUD plus the views joined from an alumno's academic history: completed
/// materias, grades, high grades per materia and the weekly schedule.
pub mod application;
pub mod domain;
pub mod handlers;

pub use application::AlumnoService;
pub use domain::{Alumno, AlumnoResumen, MateriaCursada};
