use crate::modules::alumnos::domain::AlumnoResumen;
use crate::modules::materias::Materia;
use crate::shared::domain::Document;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MateriaConCalificacion {
    pub materia: Document<Materia>,
    pub calificacion: f64,
}

/// Alumno with every completed materia that still exists
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MateriasCursadas {
    #[serde(flatten)]
    pub alumno: AlumnoResumen,
    pub materias_cursadas: Vec<MateriaConCalificacion>,
}

/// One entry per completed materia; `materia` is null when dangling
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calificacion {
    pub materia_id: String,
    pub materia: Option<Document<Materia>>,
    pub calificacion: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalificacionesAlumno {
    #[serde(flatten)]
    pub alumno: AlumnoResumen,
    pub calificaciones: Vec<Calificacion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlumnoConCalificacion {
    #[serde(flatten)]
    pub alumno: AlumnoResumen,
    pub calificacion: f64,
}

/// A materia the alumno attends, with the grupo and its schedule
#[derive(Debug, Clone, Serialize)]
pub struct MateriaConHorario {
    #[serde(flatten)]
    pub materia: Document<Materia>,
    pub grupo: String,
    pub horario: Option<String>,
}

/// Schedule page payload: `{ alumno, materias }`
#[derive(Debug, Clone, Serialize)]
pub struct HorarioAlumno {
    pub alumno: AlumnoResumen,
    pub materias: Vec<MateriaConHorario>,
}
