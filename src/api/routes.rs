use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{auth, companies, contracts, dashboard, users, vacations};
use crate::api::state::AppState;

/// Builds the full HTTP router over the given state
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Public
        .route("/health", get(auth::health_check))
        .route("/login", post(auth::login))
        // Companies
        .route("/companies", post(companies::create_company))
        .route(
            "/companies/:id",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route("/companies/:id/users", get(companies::list_company_users))
        .route(
            "/companies/:id/users/batch",
            post(companies::batch_create_users),
        )
        // Users
        .route("/users", post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/:id/contracts",
            get(contracts::list_user_contracts).post(contracts::create_contract),
        )
        .route(
            "/users/:id/vacations",
            get(vacations::list_user_vacations).post(vacations::create_vacation),
        )
        // Contracts
        .route(
            "/contracts/:id",
            get(contracts::get_contract)
                .put(contracts::update_contract)
                .delete(contracts::delete_contract),
        )
        // Vacations
        .route(
            "/vacations/:id",
            get(vacations::get_vacation)
                .put(vacations::update_vacation)
                .delete(vacations::delete_vacation),
        )
        // Dashboard
        .route("/dashboard/stats", get(dashboard::get_stats))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
