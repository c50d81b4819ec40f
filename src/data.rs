use crate::error::KalumResult;
use sqlx::PgConnection;

pub mod alumno;
pub mod asignacion;
pub mod clase;
pub mod page;

/// Keyed lookup against a table with a string primary key.
pub trait DataType: Sized {
    async fn get_from_db_by_id(id: &str, conn: &mut PgConnection) -> KalumResult<Option<Self>>;
}
