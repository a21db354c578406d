//! In-memory material store for the session. No I/O happens here; extraction
//! runs at the upload boundary before a material reaches the store.

use uuid::Uuid;

use crate::models::MaterialSource;

#[derive(Debug, Default, Clone)]
pub struct MaterialStore {
    materials: Vec<MaterialSource>,
}

impl MaterialStore {
    /// Appends a material. Returns `false` (and stores nothing) if the id is already present.
    pub fn add(&mut self, material: MaterialSource) -> bool {
        if self.get(material.id).is_some() {
            return false;
        }
        self.materials.push(material);
        true
    }

    /// Removes the material with this id. Absent ids are a no-op returning `false`.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.materials.len();
        self.materials.retain(|m| m.id != id);
        self.materials.len() != before
    }

    pub fn get(&self, id: Uuid) -> Option<&MaterialSource> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Materials in insertion order.
    pub fn list(&self) -> &[MaterialSource] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
