use super::dto::{
    AlumnoConCalificacion, Calificacion, CalificacionesAlumno, HorarioAlumno,
    MateriaConCalificacion, MateriaConHorario, MateriasCursadas,
};
use crate::modules::alumnos::domain::{queries, Alumno, AlumnoResumen};
use crate::modules::grupos::domain::queries as grupo_queries;
use crate::modules::grupos::Grupo;
use crate::modules::materias::Materia;
use crate::shared::application::references;
use crate::shared::domain::{Document, DocumentRepository, Record};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::TimedOperation;
use crate::shared::utils::Validator;
use crate::log_debug;
use std::sync::Arc;

pub const DEFAULT_UMBRAL: f64 = 90.0;

/// Read-only views rooted at an Alumno
pub struct AlumnoService {
    alumnos: Arc<dyn DocumentRepository<Alumno>>,
    materias: Arc<dyn DocumentRepository<Materia>>,
    grupos: Arc<dyn DocumentRepository<Grupo>>,
}

impl AlumnoService {
    pub fn new(
        alumnos: Arc<dyn DocumentRepository<Alumno>>,
        materias: Arc<dyn DocumentRepository<Materia>>,
        grupos: Arc<dyn DocumentRepository<Grupo>>,
    ) -> Self {
        Self {
            alumnos,
            materias,
            grupos,
        }
    }

    async fn alumno(&self, curp: &str) -> AppResult<Alumno> {
        self.alumnos
            .find_by_key(curp)
            .await?
            .map(Document::into_record)
            .ok_or_else(|| Alumno::not_found(curp))
    }

    async fn materia(&self, materia_id: &str) -> AppResult<Document<Materia>> {
        self.materias
            .find_by_key(materia_id)
            .await?
            .ok_or_else(|| Materia::not_found(materia_id))
    }

    pub async fn materias_cursadas(&self, curp: &str) -> AppResult<MateriasCursadas> {
        let alumno = self.alumno(curp).await?;
        let origin = format!("alumno {}", curp);

        let mut materias_cursadas = Vec::with_capacity(alumno.materias_c.len());
        for cursada in &alumno.materias_c {
            let materia =
                references::resolve(self.materias.as_ref(), &cursada.id, &origin).await?;
            if let Some(materia) = materia {
                materias_cursadas.push(MateriaConCalificacion {
                    materia,
                    calificacion: cursada.cal,
                });
            }
        }

        Ok(MateriasCursadas {
            alumno: AlumnoResumen::from(alumno),
            materias_cursadas,
        })
    }

    pub async fn calificaciones(&self, curp: &str) -> AppResult<CalificacionesAlumno> {
        let alumno = self.alumno(curp).await?;
        let origin = format!("alumno {}", curp);

        let mut calificaciones = Vec::with_capacity(alumno.materias_c.len());
        for cursada in &alumno.materias_c {
            calificaciones.push(Calificacion {
                materia_id: cursada.id.clone(),
                materia: references::resolve(self.materias.as_ref(), &cursada.id, &origin)
                    .await?,
                calificacion: cursada.cal,
            });
        }

        Ok(CalificacionesAlumno {
            alumno: AlumnoResumen::from(alumno),
            calificaciones,
        })
    }

    /// Alumnos whose grade in `materia_id` is strictly above `umbral`. An
    /// alumno with several qualifying entries is reported once, with the
    /// highest of them.
    pub async fn calificaciones_altas(
        &self,
        materia_id: &str,
        umbral: f64,
    ) -> AppResult<Vec<AlumnoConCalificacion>> {
        Validator::validate_threshold(umbral)?;
        let timer = TimedOperation::new("calificaciones_altas");
        self.materia(materia_id).await?;

        let candidatos = self
            .alumnos
            .find_matching(&queries::completed_materia(materia_id))
            .await?;

        let resultado: Vec<AlumnoConCalificacion> = candidatos
            .into_iter()
            .filter_map(|doc| {
                let alumno = doc.into_record();
                alumno
                    .calificacion_sobre(materia_id, umbral)
                    .map(|calificacion| AlumnoConCalificacion {
                        alumno: AlumnoResumen::from(alumno),
                        calificacion,
                    })
            })
            .collect();

        log_debug!(
            "{} alumno(s) above {} in materia '{}'",
            resultado.len(),
            umbral,
            materia_id
        );
        timer.finish();
        Ok(resultado)
    }

    /// Materias the alumno attends through a grupo, with that grupo's
    /// schedule. Grupos whose materia is missing are left out.
    pub async fn materias_con_horario(&self, curp: &str) -> AppResult<HorarioAlumno> {
        let alumno = self.alumno(curp).await?;

        let grupos = self
            .grupos
            .find_matching(&grupo_queries::with_alumno(curp))
            .await?;

        let mut materias = Vec::with_capacity(grupos.len());
        for doc in grupos {
            let grupo = doc.into_record();
            let origin = format!("grupo {}", grupo.id);
            let materia =
                references::resolve_optional(self.materias.as_ref(), grupo.materia.as_ref(), &origin)
                    .await?;
            if let Some(materia) = materia {
                materias.push(MateriaConHorario {
                    materia,
                    grupo: grupo.id,
                    horario: grupo.horario,
                });
            }
        }

        Ok(HorarioAlumno {
            alumno: AlumnoResumen::from(alumno),
            materias,
        })
    }
}
