use crate::shared::domain::Record;
use serde::{Deserialize, Serialize};

/// A subject offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Materia {
    pub id: String,
    pub nombre: Option<String>,
    pub carrera: Option<String>,
    pub descripcion: Option<String>,
    pub planestudios: Option<String>,
}

impl Materia {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nombre: None,
            carrera: None,
            descripcion: None,
            planestudios: None,
        }
    }

    pub fn with_nombre(mut self, nombre: impl Into<String>) -> Self {
        self.nombre = Some(nombre.into());
        self
    }
}

impl Record for Materia {
    const COLLECTION: &'static str = "materias";
    const KEY_FIELD: &'static str = "id";
    const LABEL: &'static str = "Materia";

    fn key(&self) -> &str {
        &self.id
    }
}
