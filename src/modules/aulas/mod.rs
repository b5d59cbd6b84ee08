pub mod domain;
pub mod handlers;

pub use domain::{Aula, AulaResumen};
