//! In-memory `RecipeStore` for handler tests.

use crate::database::{RecipeStore, UpdateOutcome};
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryRecipeStore {
    recipes: Mutex<Vec<Document>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent operation fails like a lost connection
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Number of store operations attempted so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.recipes.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn enter(&self) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }
}

fn has_id(doc: &Document, id: &ObjectId) -> bool {
    matches!(doc.get("_id"), Some(Bson::ObjectId(oid)) if oid == id)
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn find(&self, owner_email: Option<&str>) -> Result<Vec<Document>, AppError> {
        self.enter()?;
        let recipes = self.recipes.lock().unwrap();
        Ok(recipes
            .iter()
            .filter(|doc| match owner_email {
                Some(email) => doc.get_str("userEmail").map(|e| e == email).unwrap_or(false),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        self.enter()?;
        let recipes = self.recipes.lock().unwrap();
        Ok(recipes.iter().find(|doc| has_id(doc, &id)).cloned())
    }

    async fn insert_one(&self, mut recipe: Document) -> Result<ObjectId, AppError> {
        self.enter()?;
        let id = ObjectId::new();
        recipe.insert("_id", id);
        self.recipes.lock().unwrap().push(recipe);
        Ok(id)
    }

    async fn update_one(&self, id: ObjectId, fields: Document) -> Result<UpdateOutcome, AppError> {
        self.enter()?;
        let mut recipes = self.recipes.lock().unwrap();
        let Some(doc) = recipes.iter_mut().find(|doc| has_id(doc, &id)) else {
            return Ok(UpdateOutcome { matched: 0, modified: 0 });
        };

        let mut changed = false;
        for (key, value) in fields {
            if doc.get(&key) != Some(&value) {
                doc.insert(key, value);
                changed = true;
            }
        }

        Ok(UpdateOutcome { matched: 1, modified: u64::from(changed) })
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError> {
        self.enter()?;
        let mut recipes = self.recipes.lock().unwrap();
        match recipes.iter().position(|doc| has_id(doc, &id)) {
            Some(index) => {
                recipes.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.enter()
    }
}
