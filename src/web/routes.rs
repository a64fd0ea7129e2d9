// ============================================================
// Layer 1 — Routes
// ============================================================
//   GET  /             → empty form
//   POST /             → form + result (or error) string
//   POST /api/predict  → the same prediction as JSON
//   GET  /api/schema   → ordered columns and their kinds
//
// POST bodies may be form-encoded or JSON; the content type
// decides. Prediction failures are part of the page, so every
// one of these routes answers 200 once it is reached.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Html,
    routing::{get, post},
    Json, Router,
};

use crate::application::predict_use_case::{PredictUseCase, PredictionOutcome};
use crate::domain::input::RawFields;
use crate::domain::schema::Column;
use crate::web::page;

/// Build the application router around a shared use case
pub fn router(use_case: PredictUseCase) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/api/predict", post(predict_json))
        .route("/api/schema", get(schema_json))
        .with_state(use_case)
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

async fn show_form(State(use_case): State<PredictUseCase>) -> Html<String> {
    Html(page::render(use_case.schema(), &RawFields::new(), None))
}

async fn submit_form(
    State(use_case): State<PredictUseCase>,
    headers:         HeaderMap,
    body:            Bytes,
) -> Html<String> {
    let (values, verdict) = use_case.verdict_for_body(content_type(&headers), &body);
    Html(page::render(use_case.schema(), &values, Some(&verdict)))
}

async fn predict_json(
    State(use_case): State<PredictUseCase>,
    headers:         HeaderMap,
    body:            Bytes,
) -> Json<PredictionOutcome> {
    let (_, outcome) = use_case.predict_body(content_type(&headers), &body);
    Json(outcome)
}

async fn schema_json(State(use_case): State<PredictUseCase>) -> Json<Vec<Column>> {
    Json(use_case.schema().columns().to_vec())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::domain::prediction::{PredictionReport, NEGATIVE_MESSAGE, POSITIVE_MESSAGE};
    use crate::domain::schema::FeatureSchema;
    use crate::domain::traits::FieldPredictor;
    use crate::ml::fixtures;
    use crate::ml::inferencer::InferenceAdapter;

    fn app() -> Router {
        let adapter = InferenceAdapter::new(fixtures::artifact(), &fixtures::categorical()).unwrap();
        router(PredictUseCase::new(Arc::new(adapter)))
    }

    async fn send(req: Request<Body>) -> (StatusCode, String) {
        let resp   = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes  = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post(uri: &str, content_type: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_renders_empty_form() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, html) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("name=\"koi_model_snr\""));
        assert!(!html.contains("id=\"prediction\""));
    }

    #[tokio::test]
    async fn test_form_post_renders_result() {
        let req = post(
            "/",
            "application/x-www-form-urlencoded",
            "koi_prad=1.3&koi_model_snr=48&koi_tce_delivname=q1_q16_tce&extra=1",
        );
        let (status, html) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(POSITIVE_MESSAGE));
        assert!(html.contains("value=\"48\""));
    }

    #[tokio::test]
    async fn test_json_post_to_root_renders_result() {
        let req = post("/", "application/json", r#"{"koi_model_snr": "abc"}"#);
        let (status, html) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(NEGATIVE_MESSAGE));
    }

    #[tokio::test]
    async fn test_malformed_body_still_answers_ok() {
        let req = post("/", "application/json", "{broken");
        let (status, html) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("class=\"result error\""));
        assert!(html.contains("Error: "));
    }

    #[tokio::test]
    async fn test_api_predict_returns_report() {
        let req = post("/api/predict", "application/json", r#"{"koi_prad": 1.3, "koi_model_snr": 48}"#);
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["prediction"], POSITIVE_MESSAGE);
        assert_eq!(json["label"], 1);
        assert!(json["probability"].as_f64().unwrap() > 0.5);
    }

    #[tokio::test]
    async fn test_api_predict_reports_errors_as_json() {
        let req = post("/api/predict", "text/plain", "koi_prad=1");
        let (status, body) = send(req).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("Unsupported content type"));
    }

    /// Answers the display string but has no label or probability
    struct VerdictOnly {
        schema: FeatureSchema,
    }

    impl FieldPredictor for VerdictOnly {
        fn schema(&self) -> &FeatureSchema {
            &self.schema
        }

        fn predict_detailed(&self, _raw: &RawFields) -> anyhow::Result<PredictionReport> {
            anyhow::bail!("no report")
        }

        fn predict(&self, _raw: &RawFields) -> anyhow::Result<String> {
            Ok("verdict only".to_string())
        }
    }

    #[tokio::test]
    async fn test_page_uses_display_string_and_api_uses_report() {
        let predictor = VerdictOnly { schema: FeatureSchema::new(["koi_prad"], &["none"]) };
        let app = router(PredictUseCase::new(Arc::new(predictor)));

        let resp = app.clone()
            .oneshot(post("/", "application/x-www-form-urlencoded", "koi_prad=1"))
            .await
            .unwrap();
        let html = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&html).contains(">verdict only</div>"));

        let resp = app
            .oneshot(post("/api/predict", "application/json", r#"{"koi_prad": 1}"#))
            .await
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await.unwrap()).unwrap();
        assert_eq!(json["error"], "Error: no report");
    }

    #[tokio::test]
    async fn test_api_schema_lists_columns_in_order() {
        let req = Request::builder().uri("/api/schema").body(Body::empty()).unwrap();
        let (_, body) = send(req).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json[0]["name"], "koi_period");
        assert_eq!(json[3]["name"], "koi_tce_delivname");
        assert_eq!(json[3]["kind"], "categorical");
    }
}
