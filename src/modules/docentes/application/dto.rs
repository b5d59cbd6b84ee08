use crate::modules::alumnos::AlumnoResumen;
use crate::modules::docentes::domain::DocenteResumen;
use crate::modules::materias::Materia;
use crate::shared::domain::Document;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MateriaConDocentes {
    #[serde(flatten)]
    pub materia: Document<Materia>,
    pub docentes: Vec<DocenteResumen>,
}

/// A grupo taught by the docente; `materia` is null when dangling
#[derive(Debug, Clone, Serialize)]
pub struct GrupoConAlumnos {
    pub grupo: String,
    pub materia: Option<Document<Materia>>,
    pub alumnos: Vec<AlumnoResumen>,
    pub horario: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocenteConGrupos {
    #[serde(flatten)]
    pub docente: DocenteResumen,
    pub grupos: Vec<GrupoConAlumnos>,
}
