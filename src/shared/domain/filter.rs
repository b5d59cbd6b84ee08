/// Query-by-example filter over stored documents
///
/// A filter is a JSON fragment; a document matches when it contains the
/// fragment. Objects match when every key of the fragment is present and
/// matches, arrays match when every element of the fragment matches some
/// element of the document array, scalars match by equality. This is the same
/// containment rule PostgreSQL applies for `jsonb @> jsonb`, so both stores
/// answer a filter identically.
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFilter(Value);

impl DocumentFilter {
    pub fn new(fragment: Value) -> Self {
        Self(fragment)
    }

    /// `field` is an embedded `{id}` reference equal to `key`
    pub fn reference(field: &str, key: &str) -> Self {
        Self(json!({ field: { "id": key } }))
    }

    /// `field` is a list of `{id}` references containing `key`
    pub fn reference_in_list(field: &str, key: &str) -> Self {
        Self(json!({ field: [{ "id": key }] }))
    }

    /// Combine two filters; both must hold
    pub fn and(self, other: DocumentFilter) -> Self {
        match (self.0, other.0) {
            (Value::Object(mut left), Value::Object(right)) => {
                for (k, v) in right {
                    left.insert(k, v);
                }
                Self(Value::Object(left))
            }
            (left, _) => Self(left),
        }
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn matches(&self, document: &Value) -> bool {
        contains(document, &self.0)
    }
}

fn contains(document: &Value, fragment: &Value) -> bool {
    match (document, fragment) {
        (Value::Object(doc), Value::Object(frag)) => frag.iter().all(|(k, fv)| {
            doc.get(k)
                .map(|dv| contains(dv, fv))
                .unwrap_or(false)
        }),
        (Value::Array(doc), Value::Array(frag)) => frag
            .iter()
            .all(|fv| doc.iter().any(|dv| contains(dv, fv))),
        // A scalar fragment matches an array holding it
        (Value::Array(doc), scalar) if !scalar.is_object() => {
            doc.iter().any(|dv| dv == scalar)
        }
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (a, b) => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_filter_matches_embedded_object() {
        let grupo = json!({
            "id": "G1",
            "materia": { "id": "ISC01" },
            "docente": { "id": "RFC1" },
            "horario": "L-V 7:00"
        });

        assert!(DocumentFilter::reference("materia", "ISC01").matches(&grupo));
        assert!(!DocumentFilter::reference("materia", "ISC02").matches(&grupo));
        assert!(!DocumentFilter::reference("aula", "A1").matches(&grupo));
    }

    #[test]
    fn list_filter_matches_any_element() {
        let docente = json!({
            "rfc": "RFC1",
            "materias": [{ "id": "ISC01" }, { "id": "ISC02" }]
        });

        assert!(DocumentFilter::reference_in_list("materias", "ISC02").matches(&docente));
        assert!(!DocumentFilter::reference_in_list("materias", "ISC03").matches(&docente));
    }

    #[test]
    fn list_filter_ignores_extra_fields_on_elements() {
        let alumno = json!({
            "curp": "AAA010101AAA",
            "materiasC": [{ "id": "ISC01", "cal": 95 }]
        });

        assert!(DocumentFilter::reference_in_list("materiasC", "ISC01").matches(&alumno));
    }

    #[test]
    fn combined_filters_require_both() {
        let grupo = json!({ "id": "G1", "materia": { "id": "ISC01" } });

        let filter = DocumentFilter::new(json!({ "id": "G1" }))
            .and(DocumentFilter::reference("materia", "ISC01"));
        assert!(filter.matches(&grupo));

        let filter = DocumentFilter::new(json!({ "id": "G1" }))
            .and(DocumentFilter::reference("materia", "MAT99"));
        assert!(!filter.matches(&grupo));
    }

    #[test]
    fn null_reference_does_not_match() {
        let grupo = json!({ "id": "G1", "docente": null });
        assert!(!DocumentFilter::reference("docente", "RFC1").matches(&grupo));
    }
}
