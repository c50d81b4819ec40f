use crate::{
    routes::{
        alumnos::{get_alumno, get_alumnos},
        asignaciones::{
            delete_asignacion, get_asignacion, get_asignaciones, get_asignaciones_page,
            post_asignacion, put_asignacion,
        },
    },
    state::KalumState,
};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;

pub mod alumnos;
pub mod asignaciones;

pub const API_PREFIX: &str = "/kalum-notas/v1";

/// A collection lookup. An empty collection is answered with `204 No Content`
/// rather than an empty list.
#[derive(Debug)]
pub enum Listing<T> {
    Found(T),
    Empty,
}

impl<T: Serialize> IntoResponse for Listing<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Found(body) => (StatusCode::OK, Json(body)).into_response(),
            Self::Empty => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

pub fn router(state: KalumState) -> Router {
    let api = Router::new()
        .route("/alumnos", get(get_alumnos))
        .route("/alumnos/{carne}", get(get_alumno))
        .route(
            "/asignaciones",
            get(get_asignaciones).post(post_asignacion),
        )
        .route("/asignaciones/page/{page}", get(get_asignaciones_page))
        .route(
            "/asignaciones/{id}",
            get(get_asignacion)
                .put(put_asignacion)
                .delete(delete_asignacion),
        );

    Router::new().nest(API_PREFIX, api).with_state(state)
}
