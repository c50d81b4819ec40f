use crate::{
    data::{
        alumno::Alumno,
        asignacion::AsignacionAlumno,
        clase::Clase,
        page::{Page, PageRequest},
    },
    error::KalumResult,
    store::Store,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    alumnos: BTreeMap<String, Alumno>,
    clases: BTreeMap<String, Clase>,
    asignaciones: BTreeMap<String, AsignacionAlumno>,
}

/// Process-local store keyed like the relational tables, iterated in key order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn with_alumno(mut self, alumno: Alumno) -> Self {
        self.tables
            .get_mut()
            .alumnos
            .insert(alumno.carne.clone(), alumno);
        self
    }

    #[must_use]
    pub fn with_clase(mut self, clase: Clase) -> Self {
        self.tables
            .get_mut()
            .clases
            .insert(clase.clase_id.clone(), clase);
        self
    }

    #[must_use]
    pub fn with_asignacion(mut self, asignacion: AsignacionAlumno) -> Self {
        self.tables
            .get_mut()
            .asignaciones
            .insert(asignacion.asignacion_id.clone(), asignacion);
        self
    }

    pub async fn asignacion_count(&self) -> usize {
        self.tables.read().await.asignaciones.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn all_alumnos(&self) -> KalumResult<Vec<Alumno>> {
        Ok(self.tables.read().await.alumnos.values().cloned().collect())
    }

    async fn alumno_by_carne(&self, carne: &str) -> KalumResult<Option<Alumno>> {
        Ok(self.tables.read().await.alumnos.get(carne).cloned())
    }

    async fn clase_by_id(&self, clase_id: &str) -> KalumResult<Option<Clase>> {
        Ok(self.tables.read().await.clases.get(clase_id).cloned())
    }

    async fn all_asignaciones(&self) -> KalumResult<Vec<AsignacionAlumno>> {
        Ok(self
            .tables
            .read()
            .await
            .asignaciones
            .values()
            .cloned()
            .collect())
    }

    async fn asignaciones_page(&self, request: PageRequest) -> KalumResult<Page<AsignacionAlumno>> {
        let tables = self.tables.read().await;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);

        let content = tables
            .asignaciones
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok(Page::new(content, request, tables.asignaciones.len() as u64))
    }

    async fn asignacion_by_id(&self, id: &str) -> KalumResult<Option<AsignacionAlumno>> {
        Ok(self.tables.read().await.asignaciones.get(id).cloned())
    }

    async fn insert_asignacion(&self, asignacion: &AsignacionAlumno) -> KalumResult<()> {
        self.tables
            .write()
            .await
            .asignaciones
            .insert(asignacion.asignacion_id.clone(), asignacion.clone());
        Ok(())
    }

    async fn update_asignacion(&self, asignacion: &AsignacionAlumno) -> KalumResult<()> {
        if let Some(existing) = self
            .tables
            .write()
            .await
            .asignaciones
            .get_mut(&asignacion.asignacion_id)
        {
            existing.clone_from(asignacion);
        }
        Ok(())
    }

    async fn remove_asignacion(&self, id: &str) -> KalumResult<()> {
        self.tables.write().await.asignaciones.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{alumno, asignacion, clase};
    use std::num::NonZeroU32;

    #[tokio::test]
    async fn lookups_return_exactly_the_keyed_record() {
        let store = MemoryStore::default()
            .with_alumno(alumno("2020001"))
            .with_alumno(alumno("2020002"));

        let found = store.alumno_by_carne("2020002").await.unwrap().unwrap();
        assert_eq!(found.carne, "2020002");
        assert!(store.alumno_by_carne("2020009").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_only_existing_rows() {
        let store = MemoryStore::default();
        let ghost = asignacion("ghost", "2020001", "CS101");

        store.update_asignacion(&ghost).await.unwrap();
        assert_eq!(store.asignacion_count().await, 0);

        store.insert_asignacion(&ghost).await.unwrap();
        let mut moved = ghost.clone();
        moved.clase = clase("MAT200");
        store.update_asignacion(&moved).await.unwrap();

        let stored = store.asignacion_by_id("ghost").await.unwrap().unwrap();
        assert_eq!(stored.clase.clase_id, "MAT200");
    }

    #[tokio::test]
    async fn pages_slice_in_key_order() {
        let store = MemoryStore::default()
            .with_asignacion(asignacion("a", "2020001", "CS101"))
            .with_asignacion(asignacion("b", "2020001", "CS101"))
            .with_asignacion(asignacion("c", "2020001", "CS101"));
        let size = NonZeroU32::new(2).unwrap();

        let second = store
            .asignaciones_page(PageRequest::new(1, size))
            .await
            .unwrap();

        assert_eq!(second.total_elements, 3);
        assert_eq!(second.content.len(), 1);
        assert_eq!(second.content[0].asignacion_id, "c");
        assert!(second.last);
    }
}
