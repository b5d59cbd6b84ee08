/// Application state, router assembly and the serve loop
use crate::modules::alumnos::{self, Alumno, AlumnoService};
use crate::modules::aulas::{self, Aula};
use crate::modules::docentes::{self, Docente, DocenteService};
use crate::modules::grupos::{self, Grupo, GrupoService};
use crate::modules::materias::{self, Materia};
use crate::shared::application::CrudService;
use crate::shared::config::{AppConfig, RequestLogBackend, StoreBackend};
use crate::shared::domain::DocumentRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::http::log_requests;
use crate::shared::infrastructure::{
    Database, LogRequestLogSink, MemoryRepository, PgDocumentRepository, PgRequestLogSink,
    RequestLogSink,
};
use crate::{log_error, log_info};
use axum::extract::{FromRef, State};
use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// One repository per collection, all on the same backend
#[derive(Clone)]
pub struct Stores {
    pub alumnos: Arc<dyn DocumentRepository<Alumno>>,
    pub materias: Arc<dyn DocumentRepository<Materia>>,
    pub aulas: Arc<dyn DocumentRepository<Aula>>,
    pub docentes: Arc<dyn DocumentRepository<Docente>>,
    pub grupos: Arc<dyn DocumentRepository<Grupo>>,
}

impl Stores {
    pub fn memory() -> Self {
        Self {
            alumnos: Arc::new(MemoryRepository::<Alumno>::new()),
            materias: Arc::new(MemoryRepository::<Materia>::new()),
            aulas: Arc::new(MemoryRepository::<Aula>::new()),
            docentes: Arc::new(MemoryRepository::<Docente>::new()),
            grupos: Arc::new(MemoryRepository::<Grupo>::new()),
        }
    }

    pub fn postgres(db: Arc<Database>) -> Self {
        Self {
            alumnos: Arc::new(PgDocumentRepository::<Alumno>::new(Arc::clone(&db))),
            materias: Arc::new(PgDocumentRepository::<Materia>::new(Arc::clone(&db))),
            aulas: Arc::new(PgDocumentRepository::<Aula>::new(Arc::clone(&db))),
            docentes: Arc::new(PgDocumentRepository::<Docente>::new(Arc::clone(&db))),
            grupos: Arc::new(PgDocumentRepository::<Grupo>::new(db)),
        }
    }
}

#[derive(Clone, FromRef)]
pub struct AppState {
    pub alumnos: Arc<CrudService<Alumno>>,
    pub materias: Arc<CrudService<Materia>>,
    pub aulas: Arc<CrudService<Aula>>,
    pub docentes: Arc<CrudService<Docente>>,
    pub grupos: Arc<CrudService<Grupo>>,
    pub alumno_service: Arc<AlumnoService>,
    pub docente_service: Arc<DocenteService>,
    pub grupo_service: Arc<GrupoService>,
    pub store_backend: StoreBackend,
}

impl AppState {
    pub fn new(stores: Stores, store_backend: StoreBackend) -> Self {
        let alumno_service = Arc::new(AlumnoService::new(
            Arc::clone(&stores.alumnos),
            Arc::clone(&stores.materias),
            Arc::clone(&stores.grupos),
        ));
        let docente_service = Arc::new(DocenteService::new(
            Arc::clone(&stores.docentes),
            Arc::clone(&stores.materias),
            Arc::clone(&stores.grupos),
            Arc::clone(&stores.alumnos),
        ));
        let grupo_service = Arc::new(GrupoService::new(
            Arc::clone(&stores.grupos),
            Arc::clone(&stores.materias),
            Arc::clone(&stores.docentes),
            Arc::clone(&stores.aulas),
            Arc::clone(&stores.alumnos),
        ));

        Self {
            alumnos: Arc::new(CrudService::new(stores.alumnos)),
            materias: Arc::new(CrudService::new(stores.materias)),
            aulas: Arc::new(CrudService::new(stores.aulas)),
            docentes: Arc::new(CrudService::new(stores.docentes)),
            grupos: Arc::new(CrudService::new(stores.grupos)),
            alumno_service,
            docente_service,
            grupo_service,
            store_backend,
        }
    }
}

/// Open the configured store and request-log sink
pub async fn build_state(
    config: &AppConfig,
) -> AppResult<(AppState, Option<Arc<dyn RequestLogSink>>)> {
    let database = match config.store_backend {
        StoreBackend::Postgres => {
            let url = config.database_url.clone().ok_or_else(|| {
                AppError::ValidationError("DATABASE_URL environment variable not found".to_string())
            })?;
            let max_size = config.db_pool_max_size;

            let database = task::spawn_blocking(move || -> AppResult<Database> {
                let database = Database::new(&url, max_size)?;
                database.run_migrations()?;
                Ok(database)
            })
            .await??;
            Some(Arc::new(database))
        }
        StoreBackend::Memory => None,
    };

    let stores = match &database {
        Some(db) => Stores::postgres(Arc::clone(db)),
        None => Stores::memory(),
    };

    let sink: Option<Arc<dyn RequestLogSink>> = match (config.request_log, &database) {
        (RequestLogBackend::Postgres, Some(db)) => {
            Some(Arc::new(PgRequestLogSink::new(Arc::clone(db))))
        }
        (RequestLogBackend::Postgres, None) => {
            return Err(AppError::ValidationError(
                "REQUEST_LOG=postgres requires STORE_BACKEND=postgres".to_string(),
            ))
        }
        (RequestLogBackend::Log, _) => Some(Arc::new(LogRequestLogSink)),
        (RequestLogBackend::Off, _) => None,
    };

    log_info!(
        "Store backend: {}, request log: {:?}",
        config.store_backend,
        config.request_log
    );
    Ok((AppState::new(stores, config.store_backend), sink))
}

pub fn build_router(state: AppState, request_log: Option<Arc<dyn RequestLogSink>>) -> Router {
    let mut router = Router::<AppState>::new()
        .route("/health", get(health))
        .merge(alumnos::handlers::routes::<AppState>())
        .merge(materias::handlers::routes::<AppState>())
        .merge(aulas::handlers::routes::<AppState>())
        .merge(docentes::handlers::routes::<AppState>())
        .merge(grupos::handlers::routes::<AppState>())
        .with_state(state);

    if let Some(sink) = request_log {
        router = router.layer(middleware::from_fn_with_state(sink, log_requests));
    }

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
}

async fn health(State(store_backend): State<StoreBackend>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "store": store_backend.to_string(),
    }))
}

/// Serve until `shutdown` is cancelled, letting in-flight requests finish
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (state, sink) = build_state(&config).await?;
    let router = build_router(state, sink);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    log_info!("Listening on {}", address);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        log_info!("Shutdown signal received, draining connections");
        signal.cancel();
    });

    serve(listener, router, shutdown).await?;
    log_info!("Server stopped");
    Ok(())
}
