use axum::{Router, routing::post};

use super::controller::{get_subscriptions, toggle_subscription};
use crate::state::AppState;

pub fn init_subscriptions_router() -> Router<AppState> {
    Router::new().route("/", post(toggle_subscription).get(get_subscriptions))
}
