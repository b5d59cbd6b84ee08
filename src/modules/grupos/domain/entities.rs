use crate::shared::domain::{EntityRef, Record};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use serde::{Deserialize, Serialize};

/// A scheduled section of a materia
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grupo {
    pub id: String,
    pub materia: Option<EntityRef>,
    /// Reference by rfc
    pub docente: Option<EntityRef>,
    /// References by curp
    #[serde(default, alias = "estudiantes")]
    pub alumnos: Vec<EntityRef>,
    pub aula: Option<EntityRef>,
    pub horario: Option<String>,
}

impl Grupo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            materia: None,
            docente: None,
            alumnos: Vec::new(),
            aula: None,
            horario: None,
        }
    }

    pub fn with_materia(mut self, materia_id: impl Into<String>) -> Self {
        self.materia = Some(EntityRef::new(materia_id));
        self
    }

    pub fn with_docente(mut self, rfc: impl Into<String>) -> Self {
        self.docente = Some(EntityRef::new(rfc));
        self
    }

    pub fn with_aula(mut self, aula_id: impl Into<String>) -> Self {
        self.aula = Some(EntityRef::new(aula_id));
        self
    }

    pub fn with_alumno(mut self, curp: impl Into<String>) -> Self {
        self.alumnos.push(EntityRef::new(curp));
        self
    }

    pub fn with_horario(mut self, horario: impl Into<String>) -> Self {
        self.horario = Some(horario.into());
        self
    }
}

impl Record for Grupo {
    const COLLECTION: &'static str = "grupos";
    const KEY_FIELD: &'static str = "id";
    const LABEL: &'static str = "Grupo";

    fn key(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> AppResult<()> {
        Validator::validate_key(Self::KEY_FIELD, &self.id)?;
        let single = [
            ("materia.id", &self.materia),
            ("docente.id", &self.docente),
            ("aula.id", &self.aula),
        ];
        for (field, reference) in single {
            if let Some(reference) = reference {
                Validator::validate_reference(field, &reference.id)?;
            }
        }
        for alumno in &self.alumnos {
            Validator::validate_reference("alumnos.id", &alumno.id)?;
        }
        Ok(())
    }
}
