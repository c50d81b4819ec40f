use crate::{
    data::{
        alumno::Alumno,
        asignacion::AsignacionAlumno,
        clase::Clase,
        page::{Page, PageRequest},
    },
    error::KalumResult,
};
use async_trait::async_trait;
use std::fmt::Debug;

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Persistence seam used by the request handlers.
///
/// Implementations report an unreachable backend as
/// [`KalumError::GetDatabaseConnection`](crate::error::KalumError::GetDatabaseConnection)
/// and a rejected statement as [`KalumError::MakeQuery`](crate::error::KalumError::MakeQuery).
#[async_trait]
pub trait Store: Debug + Send + Sync {
    async fn all_alumnos(&self) -> KalumResult<Vec<Alumno>>;
    async fn alumno_by_carne(&self, carne: &str) -> KalumResult<Option<Alumno>>;

    async fn clase_by_id(&self, clase_id: &str) -> KalumResult<Option<Clase>>;

    async fn all_asignaciones(&self) -> KalumResult<Vec<AsignacionAlumno>>;
    async fn asignaciones_page(&self, request: PageRequest) -> KalumResult<Page<AsignacionAlumno>>;
    async fn asignacion_by_id(&self, id: &str) -> KalumResult<Option<AsignacionAlumno>>;
    async fn insert_asignacion(&self, asignacion: &AsignacionAlumno) -> KalumResult<()>;
    async fn update_asignacion(&self, asignacion: &AsignacionAlumno) -> KalumResult<()>;
    async fn remove_asignacion(&self, id: &str) -> KalumResult<()>;

    /// Releases any held connections. Called once during shutdown.
    async fn close(&self) {}
}
