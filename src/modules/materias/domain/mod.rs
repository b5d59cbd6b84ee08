pub mod entities;

pub use entities::Materia;
