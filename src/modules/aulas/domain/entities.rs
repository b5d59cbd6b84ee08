use crate::shared::domain::{EntityRef, Record};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use serde::{Deserialize, Serialize};

/// A classroom and the grupos scheduled in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aula {
    pub id: String,
    pub edificio: Option<String>,
    pub descripcion: Option<String>,
    #[serde(default)]
    pub grupos: Vec<EntityRef>,
}

impl Aula {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            edificio: None,
            descripcion: None,
            grupos: Vec::new(),
        }
    }
}

impl Record for Aula {
    const COLLECTION: &'static str = "aulas";
    const KEY_FIELD: &'static str = "id";
    const LABEL: &'static str = "Aula";

    fn key(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> AppResult<()> {
        Validator::validate_key(Self::KEY_FIELD, &self.id)?;
        for grupo in &self.grupos {
            Validator::validate_reference("grupos.id", &grupo.id)?;
        }
        Ok(())
    }
}

/// Aula without its grupo list, as embedded in other views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AulaResumen {
    pub id: String,
    pub edificio: Option<String>,
    pub descripcion: Option<String>,
}

impl From<Aula> for AulaResumen {
    fn from(aula: Aula) -> Self {
        Self {
            id: aula.id,
            edificio: aula.edificio,
            descripcion: aula.descripcion,
        }
    }
}
