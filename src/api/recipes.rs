use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use crate::database::RecipeStore;
use crate::models::{
    fields_to_document, has_owner_email, parse_recipe_id, recipe_to_json, ActionResponse,
    ErrorResponse, InsertAcknowledgment, RecipeFields, RecipeQuery,
};

/// GET /recipes - Lista receitas, opcionalmente filtradas por `?email=`
#[utoipa::path(
    get,
    path = "/recipes",
    tag = "Recipes",
    params(RecipeQuery),
    responses(
        (status = 200, description = "Matching recipes (empty array if none)"),
        (status = 400, description = "Malformed query string", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[get("")]
pub async fn get_recipes(query: web::Query<RecipeQuery>, store: web::Data<dyn RecipeStore>) -> impl Responder {
    match store.find(query.owner_email()).await {
        Ok(recipes) => {
            let recipes: Vec<_> = recipes.into_iter().map(recipe_to_json).collect();
            HttpResponse::Ok().json(recipes)
        }
        Err(e) => {
            log::error!("❌ Error fetching recipes: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to fetch recipes"))
        }
    }
}

/// GET /recipes/{id} - Busca uma receita
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe id (24 hex characters)")),
    responses(
        (status = 200, description = "The recipe document"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such recipe", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[get("/{id}")]
pub async fn get_recipe(path: web::Path<String>, store: web::Data<dyn RecipeStore>) -> impl Responder {
    let recipe_id = match parse_recipe_id(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid ID format")),
    };

    match store.find_one(recipe_id).await {
        Ok(Some(recipe)) => HttpResponse::Ok().json(recipe_to_json(recipe)),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new("Recipe not found")),
        Err(e) => {
            log::error!("❌ Error getting recipe {}: {}", recipe_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to get recipe"))
        }
    }
}

/// POST /recipes - Cria receita (exige `userEmail`)
#[utoipa::path(
    post,
    path = "/recipes",
    tag = "Recipes",
    request_body(content = serde_json::Value, description = "Arbitrary recipe fields; `userEmail` is required", content_type = "application/json"),
    responses(
        (status = 201, description = "Recipe created", body = InsertAcknowledgment),
        (status = 400, description = "Missing userEmail or malformed body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[post("")]
pub async fn create_recipe(body: web::Json<RecipeFields>, store: web::Data<dyn RecipeStore>) -> impl Responder {
    let fields = body.into_inner();

    if !has_owner_email(&fields) {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Missing user email"));
    }

    let recipe = match fields_to_document(fields) {
        Ok(doc) => doc,
        Err(e) => return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string())),
    };

    match store.insert_one(recipe).await {
        Ok(id) => {
            log::info!("✅ Recipe created: {}", id);
            HttpResponse::Created().json(InsertAcknowledgment {
                acknowledged: true,
                inserted_id: id.to_hex(),
            })
        }
        Err(e) => {
            log::error!("❌ Insert failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to add recipe"))
        }
    }
}

/// DELETE /recipes/{id} - Remove receita
#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe id (24 hex characters)")),
    responses(
        (status = 200, description = "Recipe deleted", body = ActionResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such recipe", body = ActionResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[delete("/{id}")]
pub async fn delete_recipe(path: web::Path<String>, store: web::Data<dyn RecipeStore>) -> impl Responder {
    let recipe_id = match parse_recipe_id(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid ID format")),
    };

    match store.delete_one(recipe_id).await {
        Ok(1) => {
            log::info!("🗑️ Recipe deleted: {}", recipe_id);
            HttpResponse::Ok().json(ActionResponse::deleted(1))
        }
        Ok(_) => HttpResponse::NotFound().json(ActionResponse::failed("Recipe not found")),
        Err(e) => {
            log::error!("❌ Delete failed for {}: {}", recipe_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to delete recipe"))
        }
    }
}

/// PUT /recipes/{id} - Merge dos campos enviados (`$set`)
#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "Recipes",
    params(("id" = String, Path, description = "Recipe id (24 hex characters)")),
    request_body(content = serde_json::Value, description = "Fields to overwrite; omitted fields are kept", content_type = "application/json"),
    responses(
        (status = 200, description = "Recipe updated or already up-to-date", body = ActionResponse),
        (status = 400, description = "Malformed id or empty update", body = ErrorResponse),
        (status = 404, description = "No such recipe", body = ActionResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
#[put("/{id}")]
pub async fn update_recipe(
    path: web::Path<String>,
    body: web::Json<RecipeFields>,
    store: web::Data<dyn RecipeStore>,
) -> impl Responder {
    let recipe_id = match parse_recipe_id(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid ID format")),
    };

    let update_doc = match fields_to_document(body.into_inner()) {
        Ok(doc) if doc.is_empty() => {
            return HttpResponse::BadRequest().json(ErrorResponse::new("No fields to update"))
        }
        Ok(doc) => doc,
        Err(e) => return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string())),
    };

    match store.update_one(recipe_id, update_doc).await {
        Ok(outcome) if outcome.matched == 0 => {
            HttpResponse::NotFound().json(ActionResponse::failed("Recipe not found"))
        }
        Ok(outcome) if outcome.modified == 0 => {
            HttpResponse::Ok().json(ActionResponse::ok("Recipe already up-to-date"))
        }
        Ok(_) => HttpResponse::Ok().json(ActionResponse::ok("Recipe updated")),
        Err(e) => {
            log::error!("❌ Update failed for {}: {}", recipe_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to update recipe"))
        }
    }
}
