/// Request body factories using builder pattern
///
/// Provides convenient methods to create entity bodies with sensible defaults
use serde_json::{json, Value};

pub fn materia(id: &str, nombre: &str) -> Value {
    json!({
        "id": id,
        "nombre": nombre,
        "carrera": "ISC",
        "descripcion": format!("Materia {}", nombre),
        "planestudios": "ISIC-2010-224"
    })
}

pub fn docente(rfc: &str, materias: &[&str]) -> Value {
    json!({
        "rfc": rfc,
        "nombre": format!("Docente {}", rfc),
        "carrera": "ISC",
        "tecnologico": "TecNM Tepic",
        "materias": materias.iter().map(|id| json!({ "id": id })).collect::<Vec<_>>()
    })
}

pub fn aula(id: &str) -> Value {
    json!({ "id": id, "edificio": "K", "descripcion": "Laboratorio", "grupos": [] })
}

pub struct AlumnoFactory {
    curp: String,
    nc: String,
    nombre: String,
    cursadas: Vec<(String, f64)>,
    actuales: Vec<String>,
}

impl AlumnoFactory {
    pub fn new(curp: &str) -> Self {
        Self {
            curp: curp.to_string(),
            nc: format!("{:08}", rand::random::<u32>() % 100_000_000),
            nombre: format!("Alumno {}", curp),
            cursadas: Vec::new(),
            actuales: Vec::new(),
        }
    }

    pub fn nc(mut self, nc: &str) -> Self {
        self.nc = nc.to_string();
        self
    }

    pub fn cursada(mut self, materia_id: &str, cal: f64) -> Self {
        self.cursadas.push((materia_id.to_string(), cal));
        self
    }

    pub fn actual(mut self, materia_id: &str) -> Self {
        self.actuales.push(materia_id.to_string());
        self
    }

    pub fn build(self) -> Value {
        json!({
            "curp": self.curp,
            "nc": self.nc,
            "nombre": self.nombre,
            "carrera": "ISC",
            "tecnologico": "TecNM Tepic",
            "materiasC": self
                .cursadas
                .iter()
                .map(|(id, cal)| json!({ "id": id, "cal": cal }))
                .collect::<Vec<_>>(),
            "materiasA": self
                .actuales
                .iter()
                .map(|id| json!({ "id": id }))
                .collect::<Vec<_>>(),
            "materiasP": []
        })
    }
}

pub struct GrupoFactory {
    id: String,
    materia: Option<String>,
    docente: Option<String>,
    aula: Option<String>,
    alumnos: Vec<String>,
    horario: String,
}

impl GrupoFactory {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            materia: None,
            docente: None,
            aula: None,
            alumnos: Vec::new(),
            horario: "L-V 07:00-08:00".to_string(),
        }
    }

    pub fn materia(mut self, id: &str) -> Self {
        self.materia = Some(id.to_string());
        self
    }

    pub fn docente(mut self, rfc: &str) -> Self {
        self.docente = Some(rfc.to_string());
        self
    }

    pub fn aula(mut self, id: &str) -> Self {
        self.aula = Some(id.to_string());
        self
    }

    pub fn alumno(mut self, curp: &str) -> Self {
        self.alumnos.push(curp.to_string());
        self
    }

    pub fn horario(mut self, horario: &str) -> Self {
        self.horario = horario.to_string();
        self
    }

    pub fn build(self) -> Value {
        let reference = |id: Option<String>| id.map(|id| json!({ "id": id }));
        json!({
            "id": self.id,
            "materia": reference(self.materia),
            "docente": reference(self.docente),
            "aula": reference(self.aula),
            "alumnos": self.alumnos.iter().map(|c| json!({ "id": c })).collect::<Vec<_>>(),
            "horario": self.horario
        })
    }
}
