use crate::{
    config::DbConfig,
    data::{
        DataType,
        alumno::Alumno,
        asignacion::AsignacionAlumno,
        clase::Clase,
        page::{Page, PageRequest},
    },
    error::{GetDatabaseConnectionSnafu, KalumResult, MigrateSnafu, OpenDatabaseSnafu},
    store::Store,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, pool::PoolConnection, postgres::PgPoolOptions};

#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    pub async fn new(options: PgPoolOptions, db_config: &DbConfig) -> KalumResult<Self> {
        let pool = options
            .connect(db_config.get_db_path().expose_secret())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;
        info!(database = db_config.database(), "Connected and migrated");

        Ok(Self { pool })
    }

    async fn get_connection(&self) -> KalumResult<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn all_alumnos(&self) -> KalumResult<Vec<Alumno>> {
        Alumno::get_all(&mut *self.get_connection().await?).await
    }

    async fn alumno_by_carne(&self, carne: &str) -> KalumResult<Option<Alumno>> {
        Alumno::get_from_db_by_id(carne, &mut *self.get_connection().await?).await
    }

    async fn clase_by_id(&self, clase_id: &str) -> KalumResult<Option<Clase>> {
        Clase::get_from_db_by_id(clase_id, &mut *self.get_connection().await?).await
    }

    async fn all_asignaciones(&self) -> KalumResult<Vec<AsignacionAlumno>> {
        AsignacionAlumno::get_all(&mut *self.get_connection().await?).await
    }

    async fn asignaciones_page(&self, request: PageRequest) -> KalumResult<Page<AsignacionAlumno>> {
        AsignacionAlumno::get_page(request, &mut *self.get_connection().await?).await
    }

    async fn asignacion_by_id(&self, id: &str) -> KalumResult<Option<AsignacionAlumno>> {
        AsignacionAlumno::get_from_db_by_id(id, &mut *self.get_connection().await?).await
    }

    async fn insert_asignacion(&self, asignacion: &AsignacionAlumno) -> KalumResult<()> {
        asignacion
            .insert_into_database(&mut *self.get_connection().await?)
            .await
    }

    async fn update_asignacion(&self, asignacion: &AsignacionAlumno) -> KalumResult<()> {
        asignacion
            .update_in_database(&mut *self.get_connection().await?)
            .await
    }

    async fn remove_asignacion(&self, id: &str) -> KalumResult<()> {
        AsignacionAlumno::remove_from_database(id, &mut *self.get_connection().await?).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
