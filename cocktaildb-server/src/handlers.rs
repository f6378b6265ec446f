use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use cocktaildb::query::QueryParams;
use cocktaildb::{
    Cocktail, CocktailDbError, CocktailParams, Ingredient, IngredientParams, Record,
};

use crate::AppState;

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| json_error(err, StatusCode::NOT_FOUND)),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| json_error(err, StatusCode::BAD_REQUEST)),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| json_error(err, StatusCode::BAD_REQUEST)),
    )
    // Status
    .route("/status", web::get().to(status))
    // Cocktails
    .route("/cocktails", web::get().to(list_cocktails))
    .route("/cocktails", web::post().to(create_cocktail))
    .route("/cocktails/{id}", web::get().to(get_cocktail))
    .route("/cocktails/{id}", web::put().to(update_cocktail))
    .route("/cocktails/{id}", web::delete().to(delete_cocktail))
    // Ingredients
    .route("/ingredients", web::get().to(list_ingredients))
    .route("/ingredients", web::post().to(create_ingredient))
    .route("/ingredients/{id}", web::get().to(get_ingredient))
    .route("/ingredients/{id}", web::put().to(update_ingredient))
    .route("/ingredients/{id}", web::delete().to(delete_ingredient));
}

// ── Helpers ─────────────────────────────────────────────────────────

fn json_error(err: impl std::fmt::Display, status: StatusCode) -> actix_web::Error {
    let message = err.to_string();
    let response = HttpResponse::build(status).json(serde_json::json!({ "error": message }));
    InternalError::from_response(message, response).into()
}

fn err_response(e: CocktailDbError) -> HttpResponse {
    match &e {
        CocktailDbError::NotFound { .. } | CocktailDbError::UnknownCollection(_) => {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
        CocktailDbError::Validation(_) | CocktailDbError::InvalidQuery(_) => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string()
            }))
        }
        _ => {
            log::error!("Internal error: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}

// ── Status ──────────────────────────────────────────────────────────

async fn status(state: web::Data<AppState>) -> HttpResponse {
    match state.store.status() {
        Ok(v) => HttpResponse::Ok().json(v),
        Err(e) => err_response(e),
    }
}

// ── Generic CRUD handlers ───────────────────────────────────────────

fn handle_list<P: QueryParams>(state: &AppState, params: &P) -> HttpResponse {
    let result = params
        .translate()
        .map_err(|e| {
            log::warn!("Rejected query: {e}");
            e
        })
        .and_then(|query| state.store.list(&query));
    match result {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => err_response(e),
    }
}

fn handle_get<K: Record>(state: &AppState, id: u64) -> HttpResponse {
    match state.store.get::<K>(id) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => err_response(e),
    }
}

fn handle_create<K: Record>(state: &AppState, body: serde_json::Value) -> HttpResponse {
    match state.store.insert_json::<K>(&body) {
        Ok(record) => HttpResponse::Created().json(record),
        Err(e) => err_response(e),
    }
}

fn handle_update<K: Record>(state: &AppState, id: u64, body: serde_json::Value) -> HttpResponse {
    match state.store.update_json::<K>(id, &body) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => err_response(e),
    }
}

fn handle_delete<K: Record>(state: &AppState, id: u64) -> HttpResponse {
    match state.store.delete::<K>(id) {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(format!("{} deleted", K::KIND)),
        Err(e) => err_response(e),
    }
}

// ── Cocktails ───────────────────────────────────────────────────────

async fn list_cocktails(
    state: web::Data<AppState>,
    query: web::Query<CocktailParams>,
) -> HttpResponse {
    handle_list(&state, &query.into_inner())
}

async fn get_cocktail(state: web::Data<AppState>, path: web::Path<u64>) -> HttpResponse {
    handle_get::<Cocktail>(&state, path.into_inner())
}

async fn create_cocktail(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    handle_create::<Cocktail>(&state, body.into_inner())
}

async fn update_cocktail(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    handle_update::<Cocktail>(&state, path.into_inner(), body.into_inner())
}

async fn delete_cocktail(state: web::Data<AppState>, path: web::Path<u64>) -> HttpResponse {
    handle_delete::<Cocktail>(&state, path.into_inner())
}

// ── Ingredients ─────────────────────────────────────────────────────

async fn list_ingredients(
    state: web::Data<AppState>,
    query: web::Query<IngredientParams>,
) -> HttpResponse {
    handle_list(&state, &query.into_inner())
}

async fn get_ingredient(state: web::Data<AppState>, path: web::Path<u64>) -> HttpResponse {
    handle_get::<Ingredient>(&state, path.into_inner())
}

async fn create_ingredient(
    state: web::Data<AppState>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    handle_create::<Ingredient>(&state, body.into_inner())
}

async fn update_ingredient(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<serde_json::Value>,
) -> HttpResponse {
    handle_update::<Ingredient>(&state, path.into_inner(), body.into_inner())
}

async fn delete_ingredient(state: web::Data<AppState>, path: web::Path<u64>) -> HttpResponse {
    handle_delete::<Ingredient>(&state, path.into_inner())
}
