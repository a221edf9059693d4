pub mod health;
pub mod recipes;
pub mod swagger;

use actix_web::{error, web, HttpResponse};
use crate::models::ErrorResponse;

/// Rotas da aplicação. O `web::Data<dyn RecipeStore>` é registrado por quem
/// monta o `App` (main ou testes).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/recipes")
                .service(recipes::get_recipes)
                .service(recipes::get_recipe)
                .service(recipes::create_recipe)
                .service(recipes::delete_recipe)
                .service(recipes::update_recipe),
        );
}

/// Corpo JSON inválido vira 400 `{ "error": ... }`
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected JSON body: {}", err);
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(format!("Invalid JSON body: {}", err)));
        error::InternalError::from_response(err, response).into()
    })
}

/// Query string inválida (ex.: `email` repetido) vira 400 `{ "error": ... }`
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected query string: {}", err);
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(format!("Invalid query string: {}", err)));
        error::InternalError::from_response(err, response).into()
    })
}
