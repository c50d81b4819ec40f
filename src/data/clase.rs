use crate::{
    data::DataType,
    error::{KalumResult, MakeQuerySnafu, StoreAction},
};
use serde::Serialize;
use snafu::ResultExt;
use sqlx::PgConnection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Clase {
    pub clase_id: String,
    pub descripcion: Option<String>,
    pub ciclo: Option<i32>,
}

impl DataType for Clase {
    async fn get_from_db_by_id(id: &str, conn: &mut PgConnection) -> KalumResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT clase_id, descripcion, ciclo FROM public.clase WHERE clase_id = $1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu {
            action: StoreAction::Consultar,
        })
    }
}
