use crate::{
    data::DataType,
    error::{KalumResult, MakeQuerySnafu, StoreAction},
};
use serde::Serialize;
use snafu::ResultExt;
use sqlx::PgConnection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Alumno {
    pub carne: String,
    #[sqlx(rename = "noexpediente")]
    pub no_expediente: String,
    pub apellidos: String,
    pub nombres: String,
    pub email: String,
}

impl DataType for Alumno {
    async fn get_from_db_by_id(carne: &str, conn: &mut PgConnection) -> KalumResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT carne, noexpediente, apellidos, nombres, email FROM public.alumno WHERE carne = $1",
        )
        .bind(carne)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu {
            action: StoreAction::Consultar,
        })
    }
}

impl Alumno {
    pub async fn get_all(conn: &mut PgConnection) -> KalumResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT carne, noexpediente, apellidos, nombres, email FROM public.alumno",
        )
        .fetch_all(conn)
        .await
        .context(MakeQuerySnafu {
            action: StoreAction::Consultar,
        })
    }
}
