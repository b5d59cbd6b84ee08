/// Generic CRUD routes
///
/// One set of handlers serves every collection; the entity type picks the
/// service out of the router state.
use crate::shared::application::CrudService;
use crate::shared::domain::{Document, Record};
use crate::shared::errors::{AppResult, MessageBody};
use crate::shared::http::body::decode_record;
use axum::body::Bytes;
use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// `GET|POST {base}` and `GET|PUT|DELETE {base}/{key_param}`
pub fn crud_routes<T, S>(base: &str, key_param: &str) -> Router<S>
where
    T: Record,
    S: Clone + Send + Sync + 'static,
    Arc<CrudService<T>>: FromRef<S>,
{
    let item = format!("{}/{{{}}}", base, key_param);
    Router::new()
        .route(base, get(list_records::<T>).post(create_record::<T>))
        .route(
            &item,
            get(get_record::<T>)
                .put(update_record::<T>)
                .delete(delete_record::<T>),
        )
}

pub async fn list_records<T: Record>(
    State(service): State<Arc<CrudService<T>>>,
) -> AppResult<Json<Vec<Document<T>>>> {
    Ok(Json(service.list().await?))
}

pub async fn get_record<T: Record>(
    State(service): State<Arc<CrudService<T>>>,
    Path(key): Path<String>,
) -> AppResult<Json<Document<T>>> {
    Ok(Json(service.get(&key).await?))
}

pub async fn create_record<T: Record>(
    State(service): State<Arc<CrudService<T>>>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Document<T>>)> {
    let record = decode_record::<T>(&body, None)?;
    let created = service.create(record).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_record<T: Record>(
    State(service): State<Arc<CrudService<T>>>,
    Path(key): Path<String>,
    body: Bytes,
) -> AppResult<Json<Document<T>>> {
    let record = decode_record::<T>(&body, Some(&key))?;
    Ok(Json(service.update(&key, record).await?))
}

pub async fn delete_record<T: Record>(
    State(service): State<Arc<CrudService<T>>>,
    Path(key): Path<String>,
) -> AppResult<Json<MessageBody>> {
    service.delete(&key).await?;
    Ok(Json(MessageBody {
        message: format!("{} '{}' deleted", T::LABEL, key),
    }))
}
