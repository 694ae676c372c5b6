/**
 * REST Route Configuration
 *
 * Every JSON and multipart endpoint, grouped by resource. All routes here
 * are public except `GET /auth/me`, which sits behind `auth_middleware`.
 */

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::{auth, board, events, files, mail, messaging, users};

/// Add the REST routes to `router`
///
/// `state` is needed up front because the authenticated routes carry their
/// own middleware layer.
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/auth/me", get(auth::get_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    router
        // Events
        .route("/events/get", get(events::get_all_events))
        .route("/events/get/{id}", get(events::get_event_by_id))
        .route("/events/create", post(events::create_event))
        .route("/events/delete/{id}", axum::routing::delete(events::delete_event))
        .route("/events/like/{id}", patch(events::toggle_like))
        // Project files
        .route("/files/project/{projectId}", get(files::get_project_files))
        .route("/files/upload/{projectId}", post(files::upload_file))
        .route("/files/download/{fileId}", get(files::download_file))
        .route("/files/delete/{fileId}", axum::routing::delete(files::delete_file))
        // Project chat
        .route("/messages/send", post(messaging::send_message))
        .route("/messages/{projectID}", get(messaging::get_messages))
        // Profiles and personal tasks
        .route("/users/{id}", get(users::fetch_user))
        .route(
            "/users/tasks/{id}",
            get(users::fetch_tasks)
                .post(users::add_task)
                .patch(users::update_task)
                .delete(users::delete_task),
        )
        // Internal mail
        .route("/mail/send", post(mail::send_mail))
        .route("/mail/inbox", post(mail::get_inbox))
        .route("/mail/outbox", post(mail::get_outbox))
        .route("/mail/read", patch(mail::mark_as_read))
        .route("/mail/delete", axum::routing::delete(mail::delete_mail))
        // Accounts
        .route("/auth/createaccount", post(auth::create_account))
        .route("/auth/login", post(auth::login))
        .route("/auth/checkaccount", post(auth::check_account))
        .route("/auth/generateotp", post(auth::generate_otp))
        .route("/auth/verifyotp", post(auth::verify_otp))
        .route("/auth/resendotp", post(auth::resend_otp))
        .route("/auth/resetpassword", post(auth::reset_password))
        .route("/auth/emails", get(auth::get_all_user_emails))
        // Project boards
        .route(
            "/projects/{projectId}",
            get(board::get_board).patch(board::replace_columns),
        )
        .merge(authenticated)
}
