use crate::{
    config::RuntimeConfiguration,
    data::page::PageRequest,
    error::KalumResult,
    store::{Store, postgres::PostgresStore},
};
use sqlx::postgres::PgPoolOptions;
use std::{num::NonZeroU32, ops::Deref, sync::Arc};

#[derive(Clone, Debug)]
pub struct KalumState {
    store: Arc<dyn Store>,
    page_size: NonZeroU32,
}

impl KalumState {
    pub async fn new(options: PgPoolOptions, config: &RuntimeConfiguration) -> KalumResult<Self> {
        let store = PostgresStore::new(options, &config.db_config()).await?;
        Ok(Self::with_store(Arc::new(store), config.page_size()))
    }

    pub fn with_store(store: Arc<dyn Store>, page_size: NonZeroU32) -> Self {
        Self { store, page_size }
    }

    pub const fn page_request(&self, number: u32) -> PageRequest {
        PageRequest::new(number, self.page_size)
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
    }
}

impl Deref for KalumState {
    type Target = dyn Store;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
