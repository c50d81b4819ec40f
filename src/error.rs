use crate::data::asignacion::FieldError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snafu::{ErrorCompat, Snafu};
use std::{fmt, num::ParseIntError};

pub type KalumResult<T> = Result<T, KalumError>;

/// What the store was asked to do when it failed, used to word the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Consultar,
    Insertar,
    Actualizar,
    Eliminar,
}

impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Consultar => "consultar la información a",
            Self::Insertar => "insertar la información a",
            Self::Actualizar => "actualizar la información a",
            Self::Eliminar => "eliminar la información de",
        })
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum KalumError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error al momento de conectarse a la base de datos"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error al momento de {action} la base de datos"))]
    MakeQuery {
        source: sqlx::Error,
        action: StoreAction,
    },
    #[snafu(display("Error migrating DB schema"))]
    Migrate { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{name}`"))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{name}` from {original:?}"))]
    ParseEnvVar {
        source: ParseIntError,
        name: &'static str,
        original: String,
    },
    #[snafu(display("La solicitud contiene {} error(es) de validación", errors.len()))]
    Validation { errors: Vec<FieldError> },
    #[snafu(display("El cuerpo de la solicitud no es válido: {source}"))]
    MalformedBody { source: JsonRejection },
    #[snafu(display("No existe el alumno con el carné {carne}"))]
    UnknownAlumnoReference { carne: String },
    #[snafu(display("No existe la clase con el id {clase_id}"))]
    UnknownClaseReference { clase_id: String },
    #[snafu(display("No existe registro en tabla alumno con el carné {carne}"))]
    MissingAlumno { carne: String },
    #[snafu(display("No existe la asignación con el id {id}"))]
    MissingAsignacion { id: String },
}

impl KalumError {
    pub const fn status_code(&self) -> StatusCode {
        const SU: StatusCode = StatusCode::SERVICE_UNAVAILABLE; //store unavailable or rejected the operation
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //start-up only
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        match self {
            Self::GetDatabaseConnection { .. } | Self::MakeQuery { .. } => SU,
            Self::OpenDatabase { .. } | Self::Migrate { .. } => SU,
            Self::BadEnvVar { .. } | Self::ParseEnvVar { .. } => ISE,
            Self::Validation { .. } | Self::MalformedBody { .. } => BI,
            Self::UnknownAlumnoReference { .. } | Self::UnknownClaseReference { .. } => BI,
            Self::MissingAlumno { .. } | Self::MissingAsignacion { .. } => NF,
        }
    }

    /// Every message in the cause chain, outermost first, joined with `": "`.
    pub fn cause_chain(&self) -> String {
        self.iter_chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ")
    }
}

#[derive(Serialize, Debug)]
struct ErrorBody {
    #[serde(rename = "Mensaje")]
    mensaje: String,
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errores: Vec<&'static str>,
}

impl IntoResponse for KalumError {
    fn into_response(self) -> Response {
        let mut body = ErrorBody {
            mensaje: self.to_string(),
            error: None,
            errores: vec![],
        };

        match &self {
            Self::GetDatabaseConnection { .. }
            | Self::MakeQuery { .. }
            | Self::OpenDatabase { .. }
            | Self::Migrate { .. } => {
                let chain = self.cause_chain();
                error!(?self, %chain, "Store failure");
                body.error = Some(chain);
            }
            Self::BadEnvVar { .. } | Self::ParseEnvVar { .. } => {
                error!(?self, "Configuration error");
            }
            Self::Validation { errors } => {
                for FieldError { field, message } in errors {
                    debug!(field, reason = message, "Rejected invalid payload");
                }
                body.errores = errors.iter().map(|e| e.message).collect();
            }
            Self::MalformedBody { .. }
            | Self::UnknownAlumnoReference { .. }
            | Self::UnknownClaseReference { .. } => {
                info!(msg = %body.mensaje, "Rejected request");
            }
            Self::MissingAlumno { .. } | Self::MissingAsignacion { .. } => {
                warn!(msg = %body.mensaje, "Not found");
            }
        }

        (self.status_code(), Json(body)).into_response()
    }
}
