// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route tests driven through the router with `oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use courtside_api::FixedClock;
use courtside_persistence::Persistence;
use serde_json::Value;
use time::{Date, Month, Time};
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};
use crate::actor::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER, CUSTOMER_ID_HEADER};

/// Tuesday, 10 March 2026.
pub fn today() -> Date {
    Date::from_calendar_date(2026, Month::March, 10).unwrap()
}

pub fn create_test_app() -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let clock: FixedClock = FixedClock::new(
        today().with_time(Time::from_hms(9, 0, 0).unwrap()).assume_utc(),
        today(),
    );
    build_router(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(clock),
    })
}

/// Who a test request is sent as.
#[derive(Clone, Copy)]
pub enum As {
    Anonymous,
    Admin,
    Staff,
    Customer(i64),
}

pub async fn send(app: &Router, method: &str, uri: &str, who: As, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    builder = match who {
        As::Anonymous => builder,
        As::Admin => builder
            .header(ACTOR_ID_HEADER, "admin-1")
            .header(ACTOR_ROLE_HEADER, "admin"),
        As::Staff => builder
            .header(ACTOR_ID_HEADER, "staff-1")
            .header(ACTOR_ROLE_HEADER, "staff"),
        As::Customer(id) => builder
            .header(ACTOR_ID_HEADER, format!("portal-{id}"))
            .header(ACTOR_ROLE_HEADER, "customer")
            .header(CUSTOMER_ID_HEADER, id.to_string()),
    };
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
