pub mod entities;
pub mod queries;

pub use entities::{Docente, DocenteResumen};
