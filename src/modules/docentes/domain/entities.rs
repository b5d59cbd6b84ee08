use crate::shared::domain::{EntityRef, Record};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use serde::{Deserialize, Serialize};

/// An instructor, keyed by rfc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Docente {
    pub rfc: String,
    pub nombre: Option<String>,
    pub carrera: Option<String>,
    pub tecnologico: Option<String>,
    /// Materias the docente can teach
    #[serde(default)]
    pub materias: Vec<EntityRef>,
}

impl Docente {
    pub fn new(rfc: impl Into<String>) -> Self {
        Self {
            rfc: rfc.into(),
            nombre: None,
            carrera: None,
            tecnologico: None,
            materias: Vec::new(),
        }
    }

    pub fn with_nombre(mut self, nombre: impl Into<String>) -> Self {
        self.nombre = Some(nombre.into());
        self
    }

    pub fn with_materia(mut self, materia_id: impl Into<String>) -> Self {
        self.materias.push(EntityRef::new(materia_id));
        self
    }
}

impl Record for Docente {
    const COLLECTION: &'static str = "docentes";
    const KEY_FIELD: &'static str = "rfc";
    const LABEL: &'static str = "Docente";

    fn key(&self) -> &str {
        &self.rfc
    }

    fn validate(&self) -> AppResult<()> {
        Validator::validate_key(Self::KEY_FIELD, &self.rfc)?;
        for materia in &self.materias {
            Validator::validate_reference("materias.id", &materia.id)?;
        }
        Ok(())
    }
}

/// Docente without the materia list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocenteResumen {
    pub rfc: String,
    pub nombre: Option<String>,
    pub carrera: Option<String>,
    pub tecnologico: Option<String>,
}

impl From<Docente> for DocenteResumen {
    fn from(docente: Docente) -> Self {
        Self {
            rfc: docente.rfc,
            nombre: docente.nombre,
            carrera: docente.carrera,
            tecnologico: docente.tecnologico,
        }
    }
}
