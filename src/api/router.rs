//! API router with Swagger UI

use axum::{
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{charging, health, metrics, providers, stations, users, ApiState};
use crate::application::SharedContext;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        // Users
        users::list_users,
        users::create_user,
        users::get_user,
        users::delete_user,
        users::add_funds,
        // Providers
        providers::list_providers,
        providers::create_provider,
        providers::get_provider,
        providers::delete_provider,
        providers::list_provider_stations,
        providers::attach_station,
        providers::detach_station,
        // Stations
        stations::list_stations,
        stations::create_station,
        stations::get_station,
        stations::delete_station,
        stations::update_station_status,
        // Charging
        charging::start_charging,
        charging::stop_charging,
    ),
    components(
        schemas(
            health::HealthResponse,
            UserResponse,
            CreateUserRequest,
            FundsRequest,
            BalanceResponse,
            ProviderResponse,
            CreateProviderRequest,
            StationResponse,
            CreateStationRequest,
            UpdateStatusRequest,
            StationFilter,
            StartChargingRequest,
            ChargingResponse,
            StopChargingResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Users", description = "Drivers and their prepaid balances"),
        (name = "Providers", description = "Station operators and the stations they own"),
        (name = "Stations", description = "Charging stations and their status"),
        (name = "Charging", description = "Start and stop charging sessions"),
    ),
    info(
        title = "EV Charging Service API",
        version = "0.1.0",
        description = "Charging admission and station notifications"
    )
)]
pub struct ApiDoc;

/// Build the REST router. `/metrics` is mounted only when a Prometheus
/// handle is given.
pub fn create_api_router(ctx: SharedContext, metrics_handle: Option<PrometheusHandle>) -> Router {
    let state = ApiState::new(ctx);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", get(users::get_user).delete(users::delete_user))
        .route("/{id}/funds", post(users::add_funds));

    let provider_routes = Router::new()
        .route(
            "/",
            get(providers::list_providers).post(providers::create_provider),
        )
        .route(
            "/{id}",
            get(providers::get_provider).delete(providers::delete_provider),
        )
        .route("/{id}/stations", get(providers::list_provider_stations))
        .route(
            "/{id}/stations/{station_id}",
            put(providers::attach_station).delete(providers::detach_station),
        );

    let station_routes = Router::new()
        .route(
            "/",
            get(stations::list_stations).post(stations::create_station),
        )
        .route(
            "/{id}",
            get(stations::get_station).delete(stations::delete_station),
        )
        .route("/{id}/status", put(stations::update_station_status));

    let charging_routes = Router::new()
        .route("/start", post(charging::start_charging))
        .route("/stop/{station_id}", post(charging::stop_charging));

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/providers", provider_routes)
        .nest("/api/v1/stations", station_routes)
        .nest("/api/v1/charging", charging_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = metrics_handle {
        let metrics_routes = Router::new()
            .route("/metrics", get(metrics::prometheus_metrics))
            .with_state(metrics::MetricsState { handle });
        router = router.merge(metrics_routes);
    }

    router.layer(TraceLayer::new_for_http()).layer(cors)
}
