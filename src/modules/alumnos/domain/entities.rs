use crate::shared::domain::{EntityRef, Record};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use serde::{Deserialize, Serialize};

/// Static segments under `/alumnos/` that a curp would be shadowed by
const RESERVED_CURPS: &[&str] = &["calificaciones-altas"];

/// A completed materia and the grade obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MateriaCursada {
    pub id: String,
    pub cal: f64,
}

/// A student, keyed by curp and uniquely identified by nc as well
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alumno {
    pub curp: String,
    pub nc: String,
    pub nombre: Option<String>,
    pub carrera: Option<String>,
    pub tecnologico: Option<String>,
    #[serde(rename = "materiasC", default)]
    pub materias_c: Vec<MateriaCursada>,
    #[serde(rename = "materiasA", default)]
    pub materias_a: Vec<EntityRef>,
    #[serde(rename = "materiasP", default)]
    pub materias_p: Vec<EntityRef>,
}

impl Alumno {
    pub fn new(curp: impl Into<String>, nc: impl Into<String>) -> Self {
        Self {
            curp: curp.into(),
            nc: nc.into(),
            nombre: None,
            carrera: None,
            tecnologico: None,
            materias_c: Vec::new(),
            materias_a: Vec::new(),
            materias_p: Vec::new(),
        }
    }

    pub fn with_cursada(mut self, materia_id: impl Into<String>, cal: f64) -> Self {
        self.materias_c.push(MateriaCursada {
            id: materia_id.into(),
            cal,
        });
        self
    }

    /// Highest grade recorded for `materia_id` that is strictly above
    /// `umbral`.
    pub fn calificacion_sobre(&self, materia_id: &str, umbral: f64) -> Option<f64> {
        self.materias_c
            .iter()
            .filter(|cursada| cursada.id == materia_id && cursada.cal > umbral)
            .map(|cursada| cursada.cal)
            .reduce(f64::max)
    }
}

impl Record for Alumno {
    const COLLECTION: &'static str = "alumnos";
    const KEY_FIELD: &'static str = "curp";
    const LABEL: &'static str = "Alumno";

    fn key(&self) -> &str {
        &self.curp
    }

    fn unique_fields(&self) -> Vec<(&'static str, String)> {
        vec![("nc", self.nc.clone())]
    }

    fn validate(&self) -> AppResult<()> {
        Validator::validate_key(Self::KEY_FIELD, &self.curp)?;
        if RESERVED_CURPS.contains(&self.curp.as_str()) {
            return Err(AppError::ValidationError(format!(
                "curp '{}' is reserved",
                self.curp
            )));
        }
        Validator::validate_key("nc", &self.nc)?;
        for cursada in &self.materias_c {
            Validator::validate_reference("materiasC.id", &cursada.id)?;
            Validator::validate_grade(cursada.cal)?;
        }
        for materia in &self.materias_a {
            Validator::validate_reference("materiasA.id", &materia.id)?;
        }
        for materia in &self.materias_p {
            Validator::validate_reference("materiasP.id", &materia.id)?;
        }
        Ok(())
    }
}

/// Alumno without academic history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlumnoResumen {
    pub curp: String,
    pub nc: String,
    pub nombre: Option<String>,
    pub carrera: Option<String>,
    pub tecnologico: Option<String>,
}

impl From<Alumno> for AlumnoResumen {
    fn from(alumno: Alumno) -> Self {
        Self {
            curp: alumno.curp,
            nc: alumno.nc,
            nombre: alumno.nombre,
            carrera: alumno.carrera,
            tecnologico: alumno.tecnologico,
        }
    }
}

impl From<&Alumno> for AlumnoResumen {
    fn from(alumno: &Alumno) -> Self {
        alumno.clone().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_names_use_camel_case_lists() {
        let alumno: Alumno = serde_json::from_value(json!({
            "curp": "AAA010101AAA",
            "nc": "19001",
            "materiasC": [{ "id": "ISC01", "cal": 95 }],
            "materiasA": [{ "id": "ISC02" }]
        }))
        .unwrap();

        assert_eq!(alumno.materias_c[0].cal, 95.0);
        assert_eq!(alumno.materias_a, vec![EntityRef::new("ISC02")]);
        assert!(alumno.materias_p.is_empty());

        let value = serde_json::to_value(&alumno).unwrap();
        assert!(value.get("materiasC").is_some());
        assert!(value.get("materias_c").is_none());
    }

    #[test]
    fn threshold_is_strict() {
        let alumno = Alumno::new("A", "1").with_cursada("ISC01", 90.0);
        assert_eq!(alumno.calificacion_sobre("ISC01", 90.0), None);
        assert_eq!(alumno.calificacion_sobre("ISC01", 89.5), Some(90.0));
    }

    #[test]
    fn repeated_materia_reports_highest_grade() {
        let alumno = Alumno::new("A", "1")
            .with_cursada("ISC01", 92.0)
            .with_cursada("MAT01", 100.0)
            .with_cursada("ISC01", 97.0)
            .with_cursada("ISC01", 70.0);

        assert_eq!(alumno.calificacion_sobre("ISC01", 90.0), Some(97.0));
        assert_eq!(alumno.calificacion_sobre("ISC02", 90.0), None);
    }

    #[test]
    fn validation_requires_nc_and_references() {
        assert!(Alumno::new("A", "1").validate().is_ok());
        assert!(matches!(
            Alumno::new("A", "").validate(),
            Err(AppError::ValidationError(_))
        ));

        let alumno = Alumno::new("A", "1").with_cursada("", 80.0);
        assert!(alumno.validate().is_err());
    }

    #[test]
    fn route_segments_are_not_valid_curps() {
        let err = Alumno::new("calificaciones-altas", "1").validate().unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(Alumno::new("calificaciones", "1").validate().is_ok());
    }

    #[test]
    fn missing_nc_fails_to_decode() {
        let result = serde_json::from_value::<Alumno>(json!({ "curp": "A" }));
        assert!(result.is_err());
    }

    #[test]
    fn resumen_has_no_history() {
        let alumno = Alumno::new("A", "1").with_cursada("ISC01", 80.0);
        let value = serde_json::to_value(AlumnoResumen::from(&alumno)).unwrap();
        assert_eq!(value, json!({
            "curp": "A",
            "nc": "1",
            "nombre": null,
            "carrera": null,
            "tecnologico": null
        }));
    }
}
