use crate::modules::aulas::Aula;
use crate::shared::application::CrudService;
use crate::shared::http::crud_routes;
use axum::extract::FromRef;
use axum::Router;
use std::sync::Arc;

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Arc<CrudService<Aula>>: FromRef<S>,
{
    crud_routes::<Aula, S>("/aulas", "id")
}
