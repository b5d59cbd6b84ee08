use super::domain::Materia;
use crate::shared::application::CrudService;
use crate::shared::http::crud_routes;
use axum::extract::FromRef;
use axum::Router;
use std::sync::Arc;

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Arc<CrudService<Materia>>: FromRef<S>,
{
    crud_routes::<Materia, S>("/materias", "id")
}
