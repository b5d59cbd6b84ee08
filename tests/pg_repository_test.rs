/// PostgreSQL document store tests
///
/// Run only when TEST_DATABASE_URL points at a database the migrations can be
/// applied to.
mod utils;

use std::sync::Arc;
use tecapp::modules::alumnos::Alumno;
use tecapp::modules::grupos::{domain::queries, Grupo};
use tecapp::modules::materias::Materia;
use tecapp::shared::domain::DocumentRepository;
use tecapp::shared::errors::AppError;
use tecapp::shared::infrastructure::PgDocumentRepository;
use utils::db;

#[tokio::test]
async fn materia_crud_round_trip() {
    let Some(database) = db::test_database() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let _guard = db::acquire_test_lock();
    let repo = PgDocumentRepository::<Materia>::new(Arc::clone(&database));

    let id = db::unique("ISC");
    let created = repo
        .create(Materia::new(&id).with_nombre("Algoritmos"))
        .await
        .unwrap();
    assert_eq!(created.key(), id);

    let found = repo.find_by_key(&id).await.unwrap().unwrap();
    assert_eq!(found.record, created.record);

    let err = repo.create(Materia::new(&id)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let updated = repo
        .update(&id, Materia::new(&id).with_nombre("Redes"))
        .await
        .unwrap();
    assert_eq!(updated.record.nombre.as_deref(), Some("Redes"));
    assert_eq!(updated.created_at, created.created_at);

    repo.delete(&id).await.unwrap();
    assert!(repo.find_by_key(&id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(&id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn alumno_nc_is_unique() {
    let Some(database) = db::test_database() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let _guard = db::acquire_test_lock();
    let repo = PgDocumentRepository::<Alumno>::new(Arc::clone(&database));

    let nc = db::unique("NC");
    let first = db::unique("CURP");
    repo.create(Alumno::new(&first, &nc)).await.unwrap();

    let err = repo
        .create(Alumno::new(db::unique("CURP"), &nc))
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(message) => assert!(message.contains("nc"), "{}", message),
        other => panic!("expected conflict, got {:?}", other),
    }

    repo.delete(&first).await.unwrap();
}

#[tokio::test]
async fn containment_filter_matches_embedded_reference() {
    let Some(database) = db::test_database() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    let _guard = db::acquire_test_lock();
    let repo = PgDocumentRepository::<Grupo>::new(Arc::clone(&database));

    let materia = db::unique("MAT");
    let grupo = db::unique("G");
    repo.create(Grupo::new(&grupo).with_materia(&materia).with_alumno("A"))
        .await
        .unwrap();

    let matched = repo.find_matching(&queries::of_materia(&materia)).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].key(), grupo);

    let matched = repo
        .find_matching(&queries::grupo_of_materia(&grupo, "OTHER"))
        .await
        .unwrap();
    assert!(matched.is_empty());

    repo.delete(&grupo).await.unwrap();
}
