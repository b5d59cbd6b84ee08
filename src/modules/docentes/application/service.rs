use super::dto::{DocenteConGrupos, GrupoConAlumnos, MateriaConDocentes};
use crate::modules::alumnos::{Alumno, AlumnoResumen};
use crate::modules::docentes::domain::{queries, Docente, DocenteResumen};
use crate::modules::grupos::domain::queries as grupo_queries;
use crate::modules::grupos::Grupo;
use crate::modules::materias::Materia;
use crate::shared::application::references;
use crate::shared::domain::{Document, DocumentRepository, Record};
use crate::shared::errors::AppResult;
use crate::log_debug;
use std::sync::Arc;

pub struct DocenteService {
    docentes: Arc<dyn DocumentRepository<Docente>>,
    materias: Arc<dyn DocumentRepository<Materia>>,
    grupos: Arc<dyn DocumentRepository<Grupo>>,
    alumnos: Arc<dyn DocumentRepository<Alumno>>,
}

impl DocenteService {
    pub fn new(
        docentes: Arc<dyn DocumentRepository<Docente>>,
        materias: Arc<dyn DocumentRepository<Materia>>,
        grupos: Arc<dyn DocumentRepository<Grupo>>,
        alumnos: Arc<dyn DocumentRepository<Alumno>>,
    ) -> Self {
        Self {
            docentes,
            materias,
            grupos,
            alumnos,
        }
    }

    /// Materia with every docente that lists it
    pub async fn materia_con_docentes(&self, materia_id: &str) -> AppResult<MateriaConDocentes> {
        let materia = self
            .materias
            .find_by_key(materia_id)
            .await?
            .ok_or_else(|| Materia::not_found(materia_id))?;

        let docentes: Vec<DocenteResumen> = self
            .docentes
            .find_matching(&queries::teaching_materia(materia_id))
            .await?
            .into_iter()
            .map(|doc| DocenteResumen::from(doc.into_record()))
            .collect();

        log_debug!(
            "Materia '{}' is taught by {} docente(s)",
            materia_id,
            docentes.len()
        );
        Ok(MateriaConDocentes { materia, docentes })
    }

    /// Every grupo the docente teaches, with its materia and alumnos
    pub async fn materias_con_alumnos(&self, rfc: &str) -> AppResult<DocenteConGrupos> {
        let docente = self
            .docentes
            .find_by_key(rfc)
            .await?
            .map(Document::into_record)
            .ok_or_else(|| Docente::not_found(rfc))?;

        let grupos = self
            .grupos
            .find_matching(&grupo_queries::taught_by(rfc))
            .await?;

        let mut vistas = Vec::with_capacity(grupos.len());
        for doc in grupos {
            let grupo = doc.into_record();
            let origin = format!("grupo {}", grupo.id);

            let materia =
                references::resolve_optional(self.materias.as_ref(), grupo.materia.as_ref(), &origin)
                    .await?;
            let alumnos = references::resolve_all(self.alumnos.as_ref(), &grupo.alumnos, &origin)
                .await?
                .into_iter()
                .map(|doc| AlumnoResumen::from(doc.into_record()))
                .collect();

            vistas.push(GrupoConAlumnos {
                grupo: grupo.id,
                materia,
                alumnos,
                horario: grupo.horario,
            });
        }

        Ok(DocenteConGrupos {
            docente: DocenteResumen::from(docente),
            grupos: vistas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;
    use crate::shared::infrastructure::MemoryRepository;

    struct Fixture {
        docentes: Arc<MemoryRepository<Docente>>,
        materias: Arc<MemoryRepository<Materia>>,
        grupos: Arc<MemoryRepository<Grupo>>,
        alumnos: Arc<MemoryRepository<Alumno>>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                docentes: Arc::new(MemoryRepository::new()),
                materias: Arc::new(MemoryRepository::new()),
                grupos: Arc::new(MemoryRepository::new()),
                alumnos: Arc::new(MemoryRepository::new()),
            }
        }

        fn service(&self) -> DocenteService {
            DocenteService::new(
                self.docentes.clone(),
                self.materias.clone(),
                self.grupos.clone(),
                self.alumnos.clone(),
            )
        }
    }

    #[tokio::test]
    async fn materia_con_docentes_lists_only_teaching_docentes() {
        let fx = Fixture::new();
        fx.materias.create(Materia::new("ISC01")).await.unwrap();
        fx.docentes
            .create(Docente::new("RFC1").with_materia("MAT01").with_materia("ISC01"))
            .await
            .unwrap();
        fx.docentes
            .create(Docente::new("RFC2").with_materia("MAT01"))
            .await
            .unwrap();

        let view = fx.service().materia_con_docentes("ISC01").await.unwrap();

        assert_eq!(view.materia.key(), "ISC01");
        assert_eq!(view.docentes.len(), 1);
        assert_eq!(view.docentes[0].rfc, "RFC1");
    }

    #[tokio::test]
    async fn materia_con_docentes_requires_materia() {
        let fx = Fixture::new();
        fx.docentes
            .create(Docente::new("RFC1").with_materia("ISC01"))
            .await
            .unwrap();

        let err = fx.service().materia_con_docentes("ISC01").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn materias_con_alumnos_resolves_each_grupo() {
        let fx = Fixture::new();
        fx.docentes.create(Docente::new("RFC1")).await.unwrap();
        fx.materias.create(Materia::new("ISC01")).await.unwrap();
        fx.alumnos.create(Alumno::new("A", "1")).await.unwrap();
        fx.grupos
            .create(
                Grupo::new("G1")
                    .with_materia("ISC01")
                    .with_docente("RFC1")
                    .with_alumno("A")
                    .with_alumno("GONE")
                    .with_horario("L-V 9:00"),
            )
            .await
            .unwrap();
        fx.grupos
            .create(Grupo::new("G2").with_materia("MISSING").with_docente("RFC1"))
            .await
            .unwrap();
        fx.grupos
            .create(Grupo::new("G3").with_materia("ISC01").with_docente("RFC2"))
            .await
            .unwrap();

        let view = fx.service().materias_con_alumnos("RFC1").await.unwrap();

        assert_eq!(view.docente.rfc, "RFC1");
        assert_eq!(view.grupos.len(), 2);

        let g1 = &view.grupos[0];
        assert_eq!(g1.grupo, "G1");
        assert_eq!(g1.materia.as_ref().map(|m| m.key()), Some("ISC01"));
        assert_eq!(g1.alumnos.len(), 1);
        assert_eq!(g1.alumnos[0].curp, "A");
        assert_eq!(g1.horario.as_deref(), Some("L-V 9:00"));

        assert!(view.grupos[1].materia.is_none());
    }

    #[tokio::test]
    async fn materias_con_alumnos_requires_docente() {
        let fx = Fixture::new();
        let err = fx.service().materias_con_alumnos("NOPE").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
