use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe Service API",
        version = "0.1.0",
        description = "CRUD over the `recipes` collection.\n\n**Documents are schemaless:** any JSON object is stored verbatim; only `userEmail` is required on creation. Ids are 24-character hex strings."
    ),
    paths(
        // Health
        crate::api::health::root,
        crate::api::health::health_check,

        // Recipes
        crate::api::recipes::get_recipes,
        crate::api::recipes::get_recipe,
        crate::api::recipes::create_recipe,
        crate::api::recipes::delete_recipe,
        crate::api::recipes::update_recipe,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::InsertAcknowledgment,
            crate::models::ActionResponse,
            crate::models::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database readiness."),
        (name = "Recipes", description = "List, fetch, create, merge-update and delete recipes."),
    )
)]
pub struct ApiDoc;
