use crate::{
    data::alumno::Alumno,
    error::{KalumResult, MissingAlumnoSnafu},
    routes::Listing,
    state::KalumState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use snafu::OptionExt;

#[axum::debug_handler]
pub async fn get_alumnos(State(state): State<KalumState>) -> KalumResult<Listing<Vec<Alumno>>> {
    debug!("Querying every alumno");
    let alumnos = state.all_alumnos().await?;

    if alumnos.is_empty() {
        warn!("No existen registros en la tabla alumnos");
        return Ok(Listing::Empty);
    }

    info!(count = alumnos.len(), "Listing alumnos");
    Ok(Listing::Found(alumnos))
}

#[axum::debug_handler]
pub async fn get_alumno(
    State(state): State<KalumState>,
    Path(carne): Path<String>,
) -> KalumResult<Json<Alumno>> {
    debug!(%carne, "Querying alumno by carne");
    let alumno = state
        .alumno_by_carne(&carne)
        .await?
        .context(MissingAlumnoSnafu { carne: &carne })?;

    info!(%carne, "Found alumno");
    Ok(Json(alumno))
}
