use crate::database::MongoDB;
use crate::utils::AppError;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::Collection;

pub const RECIPES_COLLECTION: &str = "recipes";

/// Resultado de um `$set`: quantos documentos casaram e quantos mudaram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Operações da coleção de receitas usadas pelos handlers.
///
/// A instância é criada no `main` e injetada via `web::Data<dyn RecipeStore>`.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Lista receitas; `owner_email` filtra por igualdade em `userEmail`
    async fn find(&self, owner_email: Option<&str>) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, id: ObjectId) -> Result<Option<Document>, AppError>;

    /// Insere e devolve o `_id` atribuído
    async fn insert_one(&self, recipe: Document) -> Result<ObjectId, AppError>;

    /// Merge-patch: só os campos presentes em `fields` são sobrescritos
    async fn update_one(&self, id: ObjectId, fields: Document) -> Result<UpdateOutcome, AppError>;

    /// Devolve o número de documentos removidos (0 ou 1)
    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError>;

    /// Readiness: falha se o banco não responde
    async fn ping(&self) -> Result<(), AppError>;
}

/// `RecipeStore` sobre o MongoDB. Sem client (falha no start-up) toda
/// operação devolve `StoreUnavailable`.
pub struct MongoRecipeStore {
    db: Option<MongoDB>,
}

impl MongoRecipeStore {
    pub fn new(db: MongoDB) -> Self {
        Self { db: Some(db) }
    }

    pub fn unavailable() -> Self {
        Self { db: None }
    }

    fn connection(&self) -> Result<&MongoDB, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::StoreUnavailable("MongoDB client was not initialized".to_string()))
    }

    fn recipes(&self) -> Result<Collection<Document>, AppError> {
        Ok(self.connection()?.collection::<Document>(RECIPES_COLLECTION))
    }
}

#[async_trait]
impl RecipeStore for MongoRecipeStore {
    async fn find(&self, owner_email: Option<&str>) -> Result<Vec<Document>, AppError> {
        let filter = match owner_email {
            Some(email) => doc! { "userEmail": email },
            None => doc! {},
        };

        let cursor = self.recipes()?.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<Document>, AppError> {
        Ok(self.recipes()?.find_one(doc! { "_id": id }).await?)
    }

    async fn insert_one(&self, recipe: Document) -> Result<ObjectId, AppError> {
        let result = self.recipes()?.insert_one(recipe).await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError(format!("Unexpected inserted id: {}", result.inserted_id)))
    }

    async fn update_one(&self, id: ObjectId, fields: Document) -> Result<UpdateOutcome, AppError> {
        let result = self
            .recipes()?
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, AppError> {
        let result = self.recipes()?.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.connection()?.ping().await
    }
}
