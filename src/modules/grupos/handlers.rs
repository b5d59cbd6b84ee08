use super::application::dto::{AlumnosDeGrupoMateria, GruposDeMateria};
use super::application::{GrupoService, VistaAlumnos};
use super::domain::Grupo;
use crate::shared::application::CrudService;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http::crud_routes;
use axum::extract::{FromRef, Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Arc<CrudService<Grupo>>: FromRef<S>,
    Arc<GrupoService>: FromRef<S>,
{
    crud_routes::<Grupo, S>("/grupos", "id")
        .route(
            "/grupos/{id}/{materia_id}/alumnos",
            get(alumnos_por_materia_grupo),
        )
        .route("/materias/{id}/grupos", get(grupos_por_materia))
}

#[derive(Debug, Deserialize)]
pub struct VistaQuery {
    pub vista: Option<String>,
}

impl VistaQuery {
    fn vista(&self) -> AppResult<VistaAlumnos> {
        match self.vista.as_deref() {
            None | Some("") | Some("completa") => Ok(VistaAlumnos::Completa),
            Some("resumen") => Ok(VistaAlumnos::Resumen),
            Some(other) => Err(AppError::ValidationError(format!(
                "vista must be 'completa' or 'resumen', got '{}'",
                other
            ))),
        }
    }
}

async fn grupos_por_materia(
    State(service): State<Arc<GrupoService>>,
    Path(materia_id): Path<String>,
) -> AppResult<Json<GruposDeMateria>> {
    Ok(Json(service.grupos_por_materia(&materia_id).await?))
}

async fn alumnos_por_materia_grupo(
    State(service): State<Arc<GrupoService>>,
    Path((grupo_id, materia_id)): Path<(String, String)>,
    Query(query): Query<VistaQuery>,
) -> AppResult<Json<AlumnosDeGrupoMateria>> {
    let vista = query.vista()?;
    Ok(Json(
        service
            .alumnos_por_materia_grupo(&grupo_id, &materia_id, vista)
            .await?,
    ))
}
