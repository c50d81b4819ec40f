use crate::{
    data::{
        DataType,
        alumno::Alumno,
        clase::Clase,
        page::{Page, PageRequest},
    },
    error::{KalumResult, MakeQuerySnafu, StoreAction},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use sqlx::PgConnection;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_ASIGNACIONES: &str = "SELECT a.asignacion_id, a.fecha_asignacion, \
    al.carne, al.noexpediente, al.apellidos, al.nombres, al.email, \
    c.clase_id, c.descripcion, c.ciclo \
    FROM public.asignacion_alumno a \
    JOIN public.alumno al ON al.carne = a.carne \
    JOIN public.clase c ON c.clase_id = a.clase_id";

/// A student's enrolment in a class on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsignacionAlumno {
    pub asignacion_id: String,
    pub fecha_asignacion: NaiveDate,
    pub alumno: Alumno,
    pub clase: Clase,
}

#[derive(sqlx::FromRow)]
struct AsignacionRow {
    asignacion_id: String,
    fecha_asignacion: NaiveDate,
    #[sqlx(flatten)]
    alumno: Alumno,
    #[sqlx(flatten)]
    clase: Clase,
}

impl From<AsignacionRow> for AsignacionAlumno {
    fn from(row: AsignacionRow) -> Self {
        Self {
            asignacion_id: row.asignacion_id,
            fecha_asignacion: row.fecha_asignacion,
            alumno: row.alumno,
            clase: row.clase,
        }
    }
}

impl DataType for AsignacionAlumno {
    async fn get_from_db_by_id(id: &str, conn: &mut PgConnection) -> KalumResult<Option<Self>> {
        let row = sqlx::query_as::<_, AsignacionRow>(&format!(
            "{SELECT_ASIGNACIONES} WHERE a.asignacion_id = $1"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu {
            action: StoreAction::Consultar,
        })?;

        Ok(row.map(Self::from))
    }
}

impl AsignacionAlumno {
    pub async fn get_all(conn: &mut PgConnection) -> KalumResult<Vec<Self>> {
        let rows = sqlx::query_as::<_, AsignacionRow>(SELECT_ASIGNACIONES)
            .fetch_all(conn)
            .await
            .context(MakeQuerySnafu {
                action: StoreAction::Consultar,
            })?;

        Ok(rows.into_iter().map(Self::from).collect())
    }

    pub async fn get_page(request: PageRequest, conn: &mut PgConnection) -> KalumResult<Page<Self>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM public.asignacion_alumno")
            .fetch_one(&mut *conn)
            .await
            .context(MakeQuerySnafu {
                action: StoreAction::Consultar,
            })?;

        let rows = sqlx::query_as::<_, AsignacionRow>(&format!(
            "{SELECT_ASIGNACIONES} ORDER BY a.asignacion_id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::try_from(request.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&mut *conn)
        .await
        .context(MakeQuerySnafu {
            action: StoreAction::Consultar,
        })?;

        let content = rows.into_iter().map(Self::from).collect();
        Ok(Page::new(
            content,
            request,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    pub async fn insert_into_database(&self, conn: &mut PgConnection) -> KalumResult<()> {
        sqlx::query("INSERT INTO public.asignacion_alumno (asignacion_id, carne, clase_id, fecha_asignacion) VALUES ($1, $2, $3, $4)")
            .bind(&self.asignacion_id)
            .bind(&self.alumno.carne)
            .bind(&self.clase.clase_id)
            .bind(self.fecha_asignacion)
            .execute(conn)
            .await
            .context(MakeQuerySnafu {
                action: StoreAction::Insertar,
            })?;
        Ok(())
    }

    pub async fn update_in_database(&self, conn: &mut PgConnection) -> KalumResult<()> {
        sqlx::query("UPDATE public.asignacion_alumno SET carne = $2, clase_id = $3, fecha_asignacion = $4 WHERE asignacion_id = $1")
            .bind(&self.asignacion_id)
            .bind(&self.alumno.carne)
            .bind(&self.clase.clase_id)
            .bind(self.fecha_asignacion)
            .execute(conn)
            .await
            .context(MakeQuerySnafu {
                action: StoreAction::Actualizar,
            })?;
        Ok(())
    }

    pub async fn remove_from_database(id: &str, conn: &mut PgConnection) -> KalumResult<()> {
        sqlx::query("DELETE FROM public.asignacion_alumno WHERE asignacion_id = $1")
            .bind(id)
            .execute(conn)
            .await
            .context(MakeQuerySnafu {
                action: StoreAction::Eliminar,
            })?;
        Ok(())
    }
}

/// One violated constraint on an incoming payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlumnoRef {
    pub carne: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaseRef {
    pub clase_id: Option<String>,
}

/// Body of a create or update request. Every field is optional so that a
/// missing field is reported as a validation error instead of a decode failure;
/// any `asignacionId` sent by the client is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsignacionForm {
    pub fecha_asignacion: Option<String>,
    pub alumno: Option<AlumnoRef>,
    pub clase: Option<ClaseRef>,
}

/// An [`AsignacionForm`] whose fields passed validation; references are not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAsignacion {
    pub carne: String,
    pub clase_id: String,
    pub fecha_asignacion: NaiveDate,
}

impl AsignacionForm {
    pub fn validate(self) -> Result<ValidAsignacion, Vec<FieldError>> {
        let mut errors = vec![];

        // blank means missing, otherwise the value is kept exactly as sent
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let carne = non_empty(self.alumno.and_then(|a| a.carne));
        if carne.is_none() {
            errors.push(FieldError {
                field: "alumno.carne",
                message: "Es necesario asignar un número de carne",
            });
        }

        let clase_id = non_empty(self.clase.and_then(|c| c.clase_id));
        if clase_id.is_none() {
            errors.push(FieldError {
                field: "clase.claseId",
                message: "Es necesario asignar el id de la clase",
            });
        }

        let fecha_asignacion = match non_empty(self.fecha_asignacion) {
            None => {
                errors.push(FieldError {
                    field: "fechaAsignacion",
                    message: "Es necesario asignar una fecha de asignación",
                });
                None
            }
            Some(raw) => match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(FieldError {
                        field: "fechaAsignacion",
                        message: "La fecha de asignación debe tener el formato AAAA-MM-DD",
                    });
                    None
                }
            },
        };

        match (carne, clase_id, fecha_asignacion) {
            (Some(carne), Some(clase_id), Some(fecha_asignacion)) if errors.is_empty() => {
                Ok(ValidAsignacion {
                    carne,
                    clase_id,
                    fecha_asignacion,
                })
            }
            _ => Err(errors),
        }
    }
}
