//! Fixtures and doubles shared by the handler tests.

use crate::{
    data::{
        alumno::Alumno,
        asignacion::AsignacionAlumno,
        clase::Clase,
        page::{Page, PageRequest},
    },
    error::{KalumError, KalumResult, StoreAction},
    routes::router,
    state::KalumState,
    store::{Store, memory::MemoryStore},
};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes},
    http::Request,
    response::Response,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::{num::NonZeroU32, sync::Arc};

pub const PAGE_SIZE: NonZeroU32 = NonZeroU32::new(2).unwrap();

pub fn alumno(carne: &str) -> Alumno {
    Alumno {
        carne: carne.to_string(),
        no_expediente: format!("EXP-{carne}"),
        apellidos: "Pérez".to_string(),
        nombres: "Lucía".to_string(),
        email: format!("{carne}@kalum.edu.gt"),
    }
}

pub fn clase(clase_id: &str) -> Clase {
    Clase {
        clase_id: clase_id.to_string(),
        descripcion: Some(format!("Curso {clase_id}")),
        ciclo: Some(2024),
    }
}

pub fn asignacion(id: &str, carne: &str, clase_id: &str) -> AsignacionAlumno {
    AsignacionAlumno {
        asignacion_id: id.to_string(),
        fecha_asignacion: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        alumno: alumno(carne),
        clase: clase(clase_id),
    }
}

/// Two alumnos (`2020001`, `2020002`) and two clases (`CS101`, `MAT200`), no asignaciones.
pub fn seeded_store() -> MemoryStore {
    MemoryStore::default()
        .with_alumno(alumno("2020001"))
        .with_alumno(alumno("2020002"))
        .with_clase(clase("CS101"))
        .with_clase(clase("MAT200"))
}

pub fn app<S: Store + 'static>(store: Arc<S>) -> Router {
    router(KalumState::with_store(store, PAGE_SIZE))
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_body(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("should read body")
}

pub async fn read_json(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("should parse JSON")
}

/// A store whose every call fails the way an unreachable or misbehaving database would.
#[derive(Debug, Clone, Copy)]
pub enum FailingStore {
    Connection,
    Query,
}

impl FailingStore {
    fn fail<T>(self, action: StoreAction) -> KalumResult<T> {
        Err(match self {
            Self::Connection => KalumError::GetDatabaseConnection {
                source: sqlx::Error::PoolTimedOut,
            },
            Self::Query => KalumError::MakeQuery {
                source: sqlx::Error::Protocol("relation \"alumno\" does not exist".to_string()),
                action,
            },
        })
    }
}

#[async_trait]
impl Store for FailingStore {
    async fn all_alumnos(&self) -> KalumResult<Vec<Alumno>> {
        self.fail(StoreAction::Consultar)
    }

    async fn alumno_by_carne(&self, _carne: &str) -> KalumResult<Option<Alumno>> {
        self.fail(StoreAction::Consultar)
    }

    async fn clase_by_id(&self, _clase_id: &str) -> KalumResult<Option<Clase>> {
        self.fail(StoreAction::Consultar)
    }

    async fn all_asignaciones(&self) -> KalumResult<Vec<AsignacionAlumno>> {
        self.fail(StoreAction::Consultar)
    }

    async fn asignaciones_page(&self, _request: PageRequest) -> KalumResult<Page<AsignacionAlumno>> {
        self.fail(StoreAction::Consultar)
    }

    async fn asignacion_by_id(&self, _id: &str) -> KalumResult<Option<AsignacionAlumno>> {
        self.fail(StoreAction::Consultar)
    }

    async fn insert_asignacion(&self, _asignacion: &AsignacionAlumno) -> KalumResult<()> {
        self.fail(StoreAction::Insertar)
    }

    async fn update_asignacion(&self, _asignacion: &AsignacionAlumno) -> KalumResult<()> {
        self.fail(StoreAction::Actualizar)
    }

    async fn remove_asignacion(&self, _id: &str) -> KalumResult<()> {
        self.fail(StoreAction::Eliminar)
    }
}
