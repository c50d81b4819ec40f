use crate::{
    data::{
        asignacion::{AsignacionAlumno, AsignacionForm, ValidAsignacion},
        alumno::Alumno,
        clase::Clase,
        page::Page,
    },
    error::{
        KalumResult, MalformedBodySnafu, MissingAsignacionSnafu,
        UnknownAlumnoReferenceSnafu, UnknownClaseReferenceSnafu, ValidationSnafu,
    },
    routes::Listing,
    state::KalumState,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Serialize;
use snafu::{OptionExt, ResultExt};
use uuid::Uuid;

pub const CREATED_MESSAGE: &str = "La asignación fue creada con exito";
pub const UPDATED_MESSAGE: &str = "La asignación del alumno a la clase se ha realizado correctamente";
pub const DELETED_MESSAGE: &str = "La asignacion fue eliminada correctamente";

#[derive(Serialize, Debug)]
pub struct Confirmation {
    #[serde(rename = "Mensaje")]
    mensaje: &'static str,
    #[serde(rename = "Asignacion")]
    asignacion: AsignacionAlumno,
}

fn validated(payload: Result<Json<AsignacionForm>, JsonRejection>) -> KalumResult<ValidAsignacion> {
    let Json(form) = payload.context(MalformedBodySnafu)?;
    form.validate()
        .map_err(|errors| ValidationSnafu { errors }.build())
}

/// Both references must exist before anything is written.
async fn resolve_references(
    state: &KalumState,
    carne: &str,
    clase_id: &str,
) -> KalumResult<(Alumno, Clase)> {
    let alumno = state
        .alumno_by_carne(carne)
        .await?
        .context(UnknownAlumnoReferenceSnafu { carne })?;
    let clase = state
        .clase_by_id(clase_id)
        .await?
        .context(UnknownClaseReferenceSnafu { clase_id })?;

    Ok((alumno, clase))
}

#[axum::debug_handler]
pub async fn get_asignaciones(
    State(state): State<KalumState>,
) -> KalumResult<Listing<Vec<AsignacionAlumno>>> {
    debug!("Querying every asignacion");
    let asignaciones = state.all_asignaciones().await?;

    if asignaciones.is_empty() {
        warn!("No existen registros en la tabla de asignaciones");
        return Ok(Listing::Empty);
    }

    info!(count = asignaciones.len(), "Listing asignaciones");
    Ok(Listing::Found(asignaciones))
}

#[axum::debug_handler]
pub async fn get_asignaciones_page(
    State(state): State<KalumState>,
    Path(page): Path<u32>,
) -> KalumResult<Listing<Page<AsignacionAlumno>>> {
    let request = state.page_request(page);
    debug!(?request, "Querying page of asignaciones");
    let page = state.asignaciones_page(request).await?;

    if page.empty {
        warn!(number = page.number, "Requested page of asignaciones is empty");
        return Ok(Listing::Empty);
    }

    Ok(Listing::Found(page))
}

#[axum::debug_handler]
pub async fn get_asignacion(
    State(state): State<KalumState>,
    Path(id): Path<String>,
) -> KalumResult<Json<AsignacionAlumno>> {
    let asignacion = state
        .asignacion_by_id(&id)
        .await?
        .context(MissingAsignacionSnafu { id: &id })?;

    Ok(Json(asignacion))
}

#[axum::debug_handler]
pub async fn post_asignacion(
    State(state): State<KalumState>,
    payload: Result<Json<AsignacionForm>, JsonRejection>,
) -> KalumResult<(StatusCode, Json<Confirmation>)> {
    let ValidAsignacion {
        carne,
        clase_id,
        fecha_asignacion,
    } = validated(payload)?;

    let (alumno, clase) = resolve_references(&state, &carne, &clase_id).await?;

    let asignacion = AsignacionAlumno {
        asignacion_id: Uuid::new_v4().to_string(),
        fecha_asignacion,
        alumno,
        clase,
    };
    state.insert_asignacion(&asignacion).await?;
    info!(id = %asignacion.asignacion_id, %carne, %clase_id, "Created asignacion");

    Ok((
        StatusCode::CREATED,
        Json(Confirmation {
            mensaje: CREATED_MESSAGE,
            asignacion,
        }),
    ))
}

#[axum::debug_handler]
pub async fn put_asignacion(
    State(state): State<KalumState>,
    Path(id): Path<String>,
    payload: Result<Json<AsignacionForm>, JsonRejection>,
) -> KalumResult<Json<Confirmation>> {
    let ValidAsignacion {
        carne,
        clase_id,
        fecha_asignacion,
    } = validated(payload)?;

    let mut asignacion = state
        .asignacion_by_id(&id)
        .await?
        .context(MissingAsignacionSnafu { id: &id })?;

    let (alumno, clase) = resolve_references(&state, &carne, &clase_id).await?;

    asignacion.fecha_asignacion = fecha_asignacion;
    asignacion.alumno = alumno;
    asignacion.clase = clase;
    state.update_asignacion(&asignacion).await?;
    info!(%id, %carne, %clase_id, "Updated asignacion");

    Ok(Json(Confirmation {
        mensaje: UPDATED_MESSAGE,
        asignacion,
    }))
}

#[axum::debug_handler]
pub async fn delete_asignacion(
    State(state): State<KalumState>,
    Path(id): Path<String>,
) -> KalumResult<Json<Confirmation>> {
    let asignacion = state
        .asignacion_by_id(&id)
        .await?
        .context(MissingAsignacionSnafu { id: &id })?;

    state.remove_asignacion(&id).await?;
    info!(%id, "Deleted asignacion");

    Ok(Json(Confirmation {
        mensaje: DELETED_MESSAGE,
        asignacion,
    }))
}
