/// Subjects (Materia)
///
/// Plain CRUD; other modules resolve `{id}` references against this
/// collection.
pub mod domain;
pub mod handlers;

pub use domain::Materia;
