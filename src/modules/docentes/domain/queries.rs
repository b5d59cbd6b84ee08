use crate::shared::domain::DocumentFilter;

/// Docentes whose materia list references `materia_id`
pub fn teaching_materia(materia_id: &str) -> DocumentFilter {
    DocumentFilter::reference_in_list("materias", materia_id)
}
