use crate::modules::alumnos::{Alumno, AlumnoResumen};
use crate::modules::aulas::AulaResumen;
use crate::modules::docentes::DocenteResumen;
use crate::modules::materias::Materia;
use crate::shared::domain::Document;
use serde::Serialize;

/// A grupo with its references resolved; dangling ones are null or absent
#[derive(Debug, Clone, Serialize)]
pub struct GrupoDetalle {
    pub id: String,
    pub horario: Option<String>,
    pub docente: Option<DocenteResumen>,
    pub aula: Option<AulaResumen>,
    pub alumnos: Vec<AlumnoResumen>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GruposDeMateria {
    #[serde(flatten)]
    pub materia: Document<Materia>,
    pub grupos: Vec<GrupoDetalle>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VistaAlumnos {
    #[default]
    Completa,
    Resumen,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AlumnosDeGrupo {
    Completa(Vec<Document<Alumno>>),
    Resumen(Vec<AlumnoResumen>),
}

#[derive(Debug, Clone, Serialize)]
pub struct AlumnosDeGrupoMateria {
    pub grupo: String,
    pub materia: String,
    pub horario: Option<String>,
    pub alumnos: AlumnosDeGrupo,
}
