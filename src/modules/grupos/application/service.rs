use super::dto::{
    AlumnosDeGrupo, AlumnosDeGrupoMateria, GrupoDetalle, GruposDeMateria, VistaAlumnos,
};
use crate::modules::alumnos::{Alumno, AlumnoResumen};
use crate::modules::aulas::{Aula, AulaResumen};
use crate::modules::docentes::{Docente, DocenteResumen};
use crate::modules::grupos::domain::{queries, Grupo};
use crate::modules::materias::Materia;
use crate::shared::application::references;
use crate::shared::domain::{Document, DocumentRepository, Record};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::TimedOperation;
use std::sync::Arc;

pub struct GrupoService {
    grupos: Arc<dyn DocumentRepository<Grupo>>,
    materias: Arc<dyn DocumentRepository<Materia>>,
    docentes: Arc<dyn DocumentRepository<Docente>>,
    aulas: Arc<dyn DocumentRepository<Aula>>,
    alumnos: Arc<dyn DocumentRepository<Alumno>>,
}

impl GrupoService {
    pub fn new(
        grupos: Arc<dyn DocumentRepository<Grupo>>,
        materias: Arc<dyn DocumentRepository<Materia>>,
        docentes: Arc<dyn DocumentRepository<Docente>>,
        aulas: Arc<dyn DocumentRepository<Aula>>,
        alumnos: Arc<dyn DocumentRepository<Alumno>>,
    ) -> Self {
        Self {
            grupos,
            materias,
            docentes,
            aulas,
            alumnos,
        }
    }

    /// Every grupo of a materia with docente, aula and alumnos resolved
    pub async fn grupos_por_materia(&self, materia_id: &str) -> AppResult<GruposDeMateria> {
        let timer = TimedOperation::new("grupos_por_materia");
        let materia = self
            .materias
            .find_by_key(materia_id)
            .await?
            .ok_or_else(|| Materia::not_found(materia_id))?;

        let grupos = self
            .grupos
            .find_matching(&queries::of_materia(materia_id))
            .await?;

        let mut detalles = Vec::with_capacity(grupos.len());
        for doc in grupos {
            detalles.push(self.detalle(doc.into_record()).await?);
        }

        timer.finish_with_info(&format!("{} grupo(s)", detalles.len()));
        Ok(GruposDeMateria {
            materia,
            grupos: detalles,
        })
    }

    async fn detalle(&self, grupo: Grupo) -> AppResult<GrupoDetalle> {
        let origin = format!("grupo {}", grupo.id);

        let docente =
            references::resolve_optional(self.docentes.as_ref(), grupo.docente.as_ref(), &origin)
                .await?
                .map(|doc| DocenteResumen::from(doc.into_record()));
        let aula = references::resolve_optional(self.aulas.as_ref(), grupo.aula.as_ref(), &origin)
            .await?
            .map(|doc| AulaResumen::from(doc.into_record()));
        let alumnos = references::resolve_all(self.alumnos.as_ref(), &grupo.alumnos, &origin)
            .await?
            .into_iter()
            .map(|doc| AlumnoResumen::from(doc.into_record()))
            .collect();

        Ok(GrupoDetalle {
            id: grupo.id,
            horario: grupo.horario,
            docente,
            aula,
            alumnos,
        })
    }

    /// Alumnos of grupo `grupo_id`, provided it is a section of `materia_id`
    pub async fn alumnos_por_materia_grupo(
        &self,
        grupo_id: &str,
        materia_id: &str,
        vista: VistaAlumnos,
    ) -> AppResult<AlumnosDeGrupoMateria> {
        let grupo = self
            .grupos
            .find_matching(&queries::grupo_of_materia(grupo_id, materia_id))
            .await?
            .into_iter()
            .next()
            .map(Document::into_record)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Grupo with id '{}' for materia '{}' not found",
                    grupo_id, materia_id
                ))
            })?;

        let origin = format!("grupo {}", grupo.id);
        let resueltos =
            references::resolve_all(self.alumnos.as_ref(), &grupo.alumnos, &origin).await?;
        let alumnos = match vista {
            VistaAlumnos::Completa => AlumnosDeGrupo::Completa(resueltos),
            VistaAlumnos::Resumen => AlumnosDeGrupo::Resumen(
                resueltos
                    .into_iter()
                    .map(|doc| AlumnoResumen::from(doc.into_record()))
                    .collect(),
            ),
        };

        Ok(AlumnosDeGrupoMateria {
            grupo: grupo.id,
            materia: materia_id.to_string(),
            horario: grupo.horario,
            alumnos,
        })
    }
}
