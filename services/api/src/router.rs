use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use chitfund_core::health::{healthz, readyz};
use chitfund_core::middleware::request_id_layer;

use crate::handlers::{
    auction::{list_auctions, list_bids, place_bid, schedule_auction, update_auction},
    auth::{login, logout},
    chit_group::{
        add_member, create_chit_group, get_chit_group, list_chit_groups, list_members,
        remove_member, update_chit_group,
    },
    notification::{list_notifications, mark_notification_read},
    payment::{list_payments, record_payment, update_payment},
    user::{list_customers, register, reset_password},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Session
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/register", post(register))
        // Users
        .route("/users/{id}/reset-password", post(reset_password))
        .route("/customers", get(list_customers))
        // Chit groups
        .route("/chitgroups", get(list_chit_groups))
        .route("/chitgroups", post(create_chit_group))
        .route("/chitgroups/{id}", get(get_chit_group))
        .route("/chitgroups/{id}", put(update_chit_group))
        // Members
        .route("/chitgroups/{id}/members", get(list_members))
        .route("/chitgroups/{id}/members", post(add_member))
        .route("/chitgroups/{gid}/members/{uid}", delete(remove_member))
        // Auctions
        .route("/chitgroups/{id}/auctions", get(list_auctions))
        .route("/chitgroups/{id}/auctions", post(schedule_auction))
        .route("/auctions/{id}", put(update_auction))
        // Bids
        .route("/auctions/{id}/bids", get(list_bids))
        .route("/auctions/{id}/bids", post(place_bid))
        // Payments
        .route("/payments", get(list_payments))
        .route("/payments", post(record_payment))
        .route("/payments/{id}", put(update_payment))
        // Notifications
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", patch(mark_notification_read))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
