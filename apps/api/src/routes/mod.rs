pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::jobs;
use crate::profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Everything behind the auth gate. Policy past the gate is per-route:
    // some reads are owner-only, others are open to any authenticated user.
    let protected = Router::new()
        .route("/api/user-details", get(profiles::handlers::user_details))
        .route(
            "/api/profile/:profile_type",
            post(profiles::handlers::create_profile),
        )
        .route("/api/update-user", post(profiles::handlers::update_user))
        .route("/api/job-seekers", get(profiles::handlers::list_job_seekers))
        .route(
            "/api/job-seeker/:username",
            get(profiles::handlers::job_seeker_details),
        )
        .route("/api/jobs_for_user", get(jobs::handlers::jobs_for_user))
        .route(
            "/api/jobs",
            post(jobs::handlers::post_job).get(jobs::handlers::list_jobs),
        )
        .route(
            "/api/jobs/:id",
            get(jobs::handlers::get_job).put(jobs::handlers::update_job),
        )
        .route("/api/apply-job", post(jobs::applications::apply_job))
        .route("/api/applied-jobs", get(jobs::applications::applied_jobs))
        .route(
            "/api/jobs/:id/applicants",
            get(jobs::applications::job_applicants),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ))
        // Resume uploads outgrow axum's 2 MB default
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/register", post(auth::handlers::register))
        .route("/api/login", post(auth::handlers::login))
        .merge(protected)
        .with_state(state)
}
