use crate::shared::domain::DocumentFilter;

/// Alumnos with at least one completed entry for `materia_id`
pub fn completed_materia(materia_id: &str) -> DocumentFilter {
    DocumentFilter::reference_in_list("materiasC", materia_id)
}
