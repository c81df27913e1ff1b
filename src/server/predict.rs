use crate::dispatcher::core::{DispatchError, Dispatcher};
use crate::library::logger::interface::Logger;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub class_name: String,
    pub probability: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictData {
    pub class_name: String,
    pub probability: f32,
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PredictData>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    Malformed(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Malformed(_) => 400,
            ApiError::Dispatch(DispatchError::UnsupportedClass(_)) => 422,
            ApiError::Dispatch(DispatchError::PortNotOpen | DispatchError::Write { .. }) => 503,
        }
    }
}

/// Handles `POST /api/predict`.
#[derive(Clone)]
pub struct PredictServer {
    dispatcher: Dispatcher,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl PredictServer {
    pub fn new(dispatcher: Dispatcher, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            dispatcher,
            logger: logger.with_namespace("server"),
        }
    }

    pub fn handle_predict(&self, body: &str) -> ApiResponse {
        match self.predict(body) {
            Ok(data) => respond(
                200,
                PredictResponse {
                    success: true,
                    message: "Prediction received successfully".to_string(),
                    data: Some(data),
                },
            ),
            Err(e) => {
                let _ = self.logger.error(&format!("POST /api/predict: {}", e));
                respond(
                    e.status(),
                    PredictResponse {
                        success: false,
                        message: e.to_string(),
                        data: None,
                    },
                )
            }
        }
    }

    fn predict(&self, body: &str) -> Result<PredictData, ApiError> {
        let request: PredictRequest =
            serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;

        if !(0.0..=1.0).contains(&request.probability) {
            return Err(ApiError::Malformed(format!(
                "probability {} is outside [0, 1]",
                request.probability
            )));
        }

        let _ = self.logger.info(&format!(
            "Prediction received: {} {}% {}",
            request.class_name,
            percentage(request.probability),
            confidence_bar(request.probability)
        ));

        self.dispatcher.dispatch(&request.class_name)?;

        Ok(PredictData {
            percentage: format!("{}%", percentage(request.probability)),
            class_name: request.class_name,
            probability: request.probability,
        })
    }
}

fn respond(status: u16, response: PredictResponse) -> ApiResponse {
    let body = serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            "{{\"success\":false,\"message\":\"failed to encode response: {}\"}}",
            e
        )
    });
    ApiResponse { status, body }
}

fn percentage(probability: f32) -> u32 {
    (probability * 100.0).round() as u32
}

fn confidence_bar(probability: f32) -> String {
    const WIDTH: usize = 20;
    let filled = ((probability.clamp(0.0, 1.0) * WIDTH as f32).round() as usize).min(WIDTH);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(WIDTH - filled))
}
