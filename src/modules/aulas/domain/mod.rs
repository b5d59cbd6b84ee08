pub mod entities;

pub use entities::{Aula, AulaResumen};
