use super::application::dto::{DocenteConGrupos, MateriaConDocentes};
use super::application::DocenteService;
use super::domain::Docente;
use crate::shared::application::CrudService;
use crate::shared::errors::AppResult;
use crate::shared::http::crud_routes;
use axum::extract::{FromRef, Path, State};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Arc<CrudService<Docente>>: FromRef<S>,
    Arc<DocenteService>: FromRef<S>,
{
    // The detalles segment sits under the same parameter as the rfc routes
    // but carries a materia id.
    crud_routes::<Docente, S>("/docentes", "rfc")
        .route("/docentes/{rfc}/detalles", get(materia_con_docentes))
        .route(
            "/docentes/{rfc}/materias-con-alumnos",
            get(materias_con_alumnos),
        )
}

async fn materia_con_docentes(
    State(service): State<Arc<DocenteService>>,
    Path(materia_id): Path<String>,
) -> AppResult<Json<MateriaConDocentes>> {
    Ok(Json(service.materia_con_docentes(&materia_id).await?))
}

async fn materias_con_alumnos(
    State(service): State<Arc<DocenteService>>,
    Path(rfc): Path<String>,
) -> AppResult<Json<DocenteConGrupos>> {
    Ok(Json(service.materias_con_alumnos(&rfc).await?))
}
