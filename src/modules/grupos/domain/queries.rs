use crate::shared::domain::DocumentFilter;
use serde_json::json;

pub fn of_materia(materia_id: &str) -> DocumentFilter {
    DocumentFilter::reference("materia", materia_id)
}

pub fn taught_by(rfc: &str) -> DocumentFilter {
    DocumentFilter::reference("docente", rfc)
}

pub fn with_alumno(curp: &str) -> DocumentFilter {
    DocumentFilter::reference_in_list("alumnos", curp)
}

/// Grupo `grupo_id`, only if it is a section of `materia_id`
pub fn grupo_of_materia(grupo_id: &str, materia_id: &str) -> DocumentFilter {
    DocumentFilter::new(json!({ "id": grupo_id })).and(of_materia(materia_id))
}
