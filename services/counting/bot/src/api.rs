use std::sync::Arc;
use std::time::Instant;

use rocket::serde::json::{json, Json, Value};
use rocket::{Route, State};

use counting_client::{ChannelState, ChatMessage, EvaluateRequest, MessageResponse, Number};
use telemetry::Measure;

use crate::error::ApiError;
use crate::service::{self, CountingService};

lazy_static! {
    static ref EVALUATE_MEASURE: Measure = Measure::new("controller", "evaluate");
    static ref MESSAGE_MEASURE: Measure = Measure::new("controller", "message");
    static ref DELETE_MEASURE: Measure = Measure::new("controller", "delete_message");
    static ref CHANNEL_MEASURE: Measure = Measure::new("controller", "channel_get");
}

#[get("/status")]
fn status() -> Value {
    json!({ "status": "ok" })
}

#[get("/metrics")]
fn metrics() -> Result<String, ApiError> {
    telemetry::encode().map_err(|e| ApiError::InternalError(format!("Metrics Error: {}", e)))
}

#[post("/api/v1/evaluate", format = "json", data = "<request>")]
async fn evaluate(request: Json<EvaluateRequest>) -> Result<Json<Number>, ApiError> {
    EVALUATE_MEASURE
        .stats(async move { Ok(Json(service::calculate(&request.expr)?)) })
        .await
}

#[post("/api/v1/messages", format = "json", data = "<message>")]
async fn post_message(
    service: &State<Arc<CountingService>>,
    message: Json<ChatMessage>,
) -> Result<Json<MessageResponse>, ApiError> {
    MESSAGE_MEASURE
        .stats(async move {
            let response = service.handle_message(&message, Instant::now()).await;
            Ok(Json(response))
        })
        .await
}

#[delete("/api/v1/channels/<channel_id>/messages/<message_id>")]
async fn delete_message(
    service: &State<Arc<CountingService>>,
    channel_id: u64,
    message_id: u64,
) -> Result<Json<MessageResponse>, ApiError> {
    DELETE_MEASURE
        .stats(async move {
            let response = service
                .handle_delete(channel_id, message_id)
                .await
                .ok_or(ApiError::NotFound)?;
            Ok(Json(response))
        })
        .await
}

#[get("/api/v1/channels/<channel_id>")]
async fn get_channel(
    service: &State<Arc<CountingService>>,
    channel_id: u64,
) -> Result<Json<ChannelState>, ApiError> {
    CHANNEL_MEASURE
        .stats(async move {
            let state = service
                .channel_state(channel_id, Instant::now())
                .await
                .ok_or(ApiError::NotFound)?;
            Ok(Json(state))
        })
        .await
}

pub fn routes() -> Vec<Route> {
    routes![
        status,
        metrics,
        evaluate,
        post_message,
        delete_message,
        get_channel
    ]
}
