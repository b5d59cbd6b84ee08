use super::application::dto::{
    AlumnoConCalificacion, CalificacionesAlumno, HorarioAlumno, MateriasCursadas,
};
use super::application::{AlumnoService, DEFAULT_UMBRAL};
use super::domain::Alumno;
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
    Arc<CrudService<Alumno>>: FromRef<S>,
    Arc<AlumnoService>: FromRef<S>,
{
    crud_routes::<Alumno, S>("/alumnos", "curp")
        .route("/alumnos/{curp}/materias-cursadas", get(materias_cursadas))
        .route("/alumnos/{curp}/calificaciones", get(calificaciones))
        .route(
            "/alumnos/{curp}/materias-con-horario",
            get(materias_con_horario),
        )
        .route(
            "/alumnos/calificaciones-altas/{materia_id}",
            get(calificaciones_altas),
        )
}

#[derive(Debug, Deserialize)]
pub struct UmbralQuery {
    pub umbral: Option<String>,
}

impl UmbralQuery {
    fn umbral(&self) -> AppResult<f64> {
        match self.umbral.as_deref() {
            None | Some("") => Ok(DEFAULT_UMBRAL),
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                AppError::ValidationError(format!("umbral must be a number, got '{}'", raw))
            }),
        }
    }
}

async fn materias_cursadas(
    State(service): State<Arc<AlumnoService>>,
    Path(curp): Path<String>,
) -> AppResult<Json<MateriasCursadas>> {
    Ok(Json(service.materias_cursadas(&curp).await?))
}

async fn calificaciones(
    State(service): State<Arc<AlumnoService>>,
    Path(curp): Path<String>,
) -> AppResult<Json<CalificacionesAlumno>> {
    Ok(Json(service.calificaciones(&curp).await?))
}

async fn materias_con_horario(
    State(service): State<Arc<AlumnoService>>,
    Path(curp): Path<String>,
) -> AppResult<Json<HorarioAlumno>> {
    Ok(Json(service.materias_con_horario(&curp).await?))
}

async fn calificaciones_altas(
    State(service): State<Arc<AlumnoService>>,
    Path(materia_id): Path<String>,
    Query(query): Query<UmbralQuery>,
) -> AppResult<Json<Vec<AlumnoConCalificacion>>> {
    let umbral = query.umbral()?;
    Ok(Json(service.calificaciones_altas(&materia_id, umbral).await?))
}
