use crate::collection;
use crate::document::{self, Document};
use crate::error::{CocktailDbError, Result};
use crate::query::{CocktailParams, IngredientParams, Query, QueryParams};
use crate::schema::{Cocktail, Ingredient, Record, RecordKind};
use crate::validation;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The main entry point for CocktailDB.
///
/// A store is only a handle on the document path. Every operation reads the
/// document fresh, and every successful mutation writes it back in full, so
/// nothing about the records outlives a single call.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open the store backed by the JSON document at `path`.
    /// A missing document is created empty; an existing one is left untouched.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            log::info!("Creating empty document at {}", path.display());
            document::write_document(&path, &Document::default())?;
        }
        Ok(Store { path })
    }

    /// Get the backing document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document.
    pub fn load(&self) -> Result<Document> {
        document::read_document(&self.path)
    }

    /// Overwrite the whole document.
    pub fn save(&self, doc: &Document) -> Result<()> {
        document::write_document(&self.path, doc)
    }

    // ── Typed API ───────────────────────────────────────────────────

    /// Records of kind `K` matching the query, in query order.
    pub fn list<K: Record>(&self, query: &Query<K>) -> Result<Vec<K>> {
        let mut doc = self.load()?;
        let records = std::mem::take(K::collection_mut(&mut doc));
        Ok(query.apply(records))
    }

    /// A single record by identifier.
    pub fn get<K: Record>(&self, id: u64) -> Result<K> {
        let doc = self.load()?;
        collection::find_by_id(K::collection(&doc), id)
            .cloned()
            .ok_or_else(|| not_found::<K>(id))
    }

    /// Insert an already validated record. Returns it with its assigned id.
    pub fn insert<K: Record>(&self, new: K::New) -> Result<K> {
        let mut doc = self.load()?;
        let created = collection::insert(K::collection_mut(&mut doc), new).ok_or_else(|| {
            CocktailDbError::Validation(format!("No {} identifiers left to assign", K::KIND))
        })?;
        self.save(&doc)?;
        log::info!("Created {} {}", K::KIND, created.id());
        Ok(created)
    }

    /// Validate a raw creation payload and insert it.
    /// An invalid payload is rejected before the document is read.
    pub fn insert_json<K: Record>(&self, data: &serde_json::Value) -> Result<K> {
        let new = validation::validate_and_prepare::<K>(data).map_err(|e| {
            log::warn!("Rejected {} payload: {e}", K::KIND);
            e
        })?;
        self.insert::<K>(new)
    }

    /// Merge a patch into the record with the given id and return the result.
    pub fn update<K: Record>(&self, id: u64, patch: K::Patch) -> Result<K> {
        let mut doc = self.load()?;
        let merged = collection::update(K::collection_mut(&mut doc), id, patch)
            .ok_or_else(|| not_found::<K>(id))?;
        self.save(&doc)?;
        log::info!("Updated {} {}", K::KIND, id);
        Ok(merged)
    }

    /// Convert a raw partial record into a patch and apply it.
    pub fn update_json<K: Record>(&self, id: u64, data: &serde_json::Value) -> Result<K> {
        let patch = validation::prepare_patch::<K>(data)?;
        self.update::<K>(id, patch)
    }

    /// Delete the record with the given id.
    pub fn delete<K: Record>(&self, id: u64) -> Result<()> {
        let mut doc = self.load()?;
        if !collection::delete(K::collection_mut(&mut doc), id) {
            return Err(not_found::<K>(id));
        }
        self.save(&doc)?;
        log::info!("Deleted {} {}", K::KIND, id);
        Ok(())
    }

    // ── Dynamic (untyped) API for the CLI ───────────────────────────

    /// List a collection by name, filtered by loose query parameters.
    pub fn list_dynamic(
        &self,
        collection: &str,
        params: &HashMap<String, String>,
    ) -> Result<serde_json::Value> {
        match kind_of(collection)? {
            RecordKind::Cocktail => {
                let query = CocktailParams::from_pairs(params)?.translate()?;
                to_json(&self.list(&query)?)
            }
            RecordKind::Ingredient => {
                let query = IngredientParams::from_pairs(params)?.translate()?;
                to_json(&self.list(&query)?)
            }
        }
    }

    pub fn get_dynamic(&self, collection: &str, id: u64) -> Result<serde_json::Value> {
        match kind_of(collection)? {
            RecordKind::Cocktail => to_json(&self.get::<Cocktail>(id)?),
            RecordKind::Ingredient => to_json(&self.get::<Ingredient>(id)?),
        }
    }

    /// Insert into a collection by name. Returns the stored record.
    pub fn insert_dynamic(
        &self,
        collection: &str,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        match kind_of(collection)? {
            RecordKind::Cocktail => to_json(&self.insert_json::<Cocktail>(data)?),
            RecordKind::Ingredient => to_json(&self.insert_json::<Ingredient>(data)?),
        }
    }

    pub fn update_dynamic(
        &self,
        collection: &str,
        id: u64,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        match kind_of(collection)? {
            RecordKind::Cocktail => to_json(&self.update_json::<Cocktail>(id, data)?),
            RecordKind::Ingredient => to_json(&self.update_json::<Ingredient>(id, data)?),
        }
    }

    pub fn delete_dynamic(&self, collection: &str, id: u64) -> Result<()> {
        match kind_of(collection)? {
            RecordKind::Cocktail => self.delete::<Cocktail>(id),
            RecordKind::Ingredient => self.delete::<Ingredient>(id),
        }
    }

    /// Record counts and next identifiers per collection.
    pub fn status(&self) -> Result<serde_json::Value> {
        let doc = self.load()?;
        Ok(serde_json::json!({
            "path": self.path.display().to_string(),
            "collections": {
                "cocktails": {
                    "count": doc.cocktails.len(),
                    "next_id": collection::next_id(&doc.cocktails),
                },
                "ingredients": {
                    "count": doc.ingredients.len(),
                    "next_id": collection::next_id(&doc.ingredients),
                },
            },
        }))
    }
}

fn not_found<K: Record>(id: u64) -> CocktailDbError {
    CocktailDbError::NotFound { kind: K::KIND, id }
}

fn kind_of(collection: &str) -> Result<RecordKind> {
    RecordKind::from_collection_name(collection)
        .ok_or_else(|| CocktailDbError::UnknownCollection(collection.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}
