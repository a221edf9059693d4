use crate::utils::AppError;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Nome do campo obrigatório com o email do dono da receita
pub const OWNER_EMAIL_FIELD: &str = "userEmail";

/// Campos arbitrários enviados pelo cliente (corpo JSON de POST/PUT)
pub type RecipeFields = Map<String, Value>;

/// Query de listagem: `GET /recipes?email=...`
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeQuery {
    /// Email do dono; vazio ou ausente lista todas as receitas
    pub email: Option<String>,
}

impl RecipeQuery {
    pub fn owner_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

/// Confirmação de inserção (mesmo formato do driver: `acknowledged` + `insertedId`)
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAcknowledgment {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Resposta de delete/update
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<u64>,
}

impl ActionResponse {
    pub fn ok(message: &str) -> Self {
        Self { success: true, message: message.to_string(), deleted_count: None }
    }

    pub fn failed(message: &str) -> Self {
        Self { success: false, message: message.to_string(), deleted_count: None }
    }

    pub fn deleted(count: u64) -> Self {
        Self { success: true, message: "Recipe deleted".to_string(), deleted_count: Some(count) }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

/// Valida o identificador recebido na rota (24 caracteres hexadecimais)
pub fn parse_recipe_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidRequest("Invalid ID format".to_string()))
}

/// `userEmail` precisa ser "truthy": ausente, null, false, 0 e "" contam como ausente
pub fn has_owner_email(fields: &RecipeFields) -> bool {
    match fields.get(OWNER_EMAIL_FIELD) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(true),
        Some(Value::String(email)) => !email.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Converte o corpo JSON em documento BSON. O `_id` do cliente é descartado:
/// o identificador é atribuído pelo banco e nunca muda.
pub fn fields_to_document(mut fields: RecipeFields) -> Result<Document, AppError> {
    fields.remove("_id");
    mongodb::bson::to_document(&fields)
        .map_err(|e| AppError::InvalidRequest(format!("Unsupported recipe fields: {}", e)))
}

/// Converte um documento armazenado para JSON; ObjectIds viram strings hex
pub fn recipe_to_json(doc: Document) -> Value {
    Value::Object(document_to_map(doc))
}

fn document_to_map(doc: Document) -> Map<String, Value> {
    doc.into_iter().map(|(key, value)| (key, bson_to_json(value))).collect()
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => Value::Object(document_to_map(doc)),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
