/// Class sections (Grupo)
///
/// A grupo ties a materia, a docente, an aula and a list of alumnos together;
/// the views here resolve those references.
pub mod application;
pub mod domain;
pub mod handlers;

pub use application::GrupoService;
pub use domain::Grupo;
