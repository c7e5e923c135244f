use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AgroError;
use crate::models::{LimingTarget, SoilAnalysis, SprayerSetup};

use super::state::AppState;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug)]
pub struct WebError(AgroError);

impl From<AgroError> for WebError {
    fn from(e: AgroError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_type) = match &self.0 {
            AgroError::ValidationError(_)
            | AgroError::InvalidInput(_)
            | AgroError::ParseError(_) => {
                (actix_web::http::StatusCode::BAD_REQUEST, "Bad Request")
            }
            AgroError::InsufficientData(_) => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "Unprocessable Entity",
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };
        HttpResponse::build(status).json(ErrorBody {
            error: error_type.to_string(),
            details: self.0.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct LimingRequest {
    analysis: SoilAnalysis,
    /// Falls back to the configured defaults
    target: Option<LimingTarget>,
}

#[derive(Deserialize)]
pub struct BatchRequest {
    samples: Vec<SoilAnalysis>,
    target: Option<LimingTarget>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub async fn defaults(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.calculator.config())
}

pub async fn liming(
    state: web::Data<AppState>,
    body: web::Json<LimingRequest>,
) -> Result<HttpResponse, WebError> {
    let calc = &state.calculator;
    let target = body.target.unwrap_or_else(|| calc.default_target());
    let report = calc.liming(&body.analysis, &target)?;
    Ok(HttpResponse::Ok().json(report))
}

pub async fn sprayer(
    state: web::Data<AppState>,
    body: web::Json<SprayerSetup>,
) -> Result<HttpResponse, WebError> {
    let report = state.calculator.sprayer(&body)?;
    Ok(HttpResponse::Ok().json(report))
}

pub async fn batch(
    state: web::Data<AppState>,
    body: web::Json<BatchRequest>,
) -> Result<HttpResponse, WebError> {
    if body.samples.is_empty() {
        return Err(AgroError::InsufficientData("no samples submitted".to_string()).into());
    }
    let calc = &state.calculator;
    let target = body.target.unwrap_or_else(|| calc.default_target());
    target.validate()?;
    Ok(HttpResponse::Ok().json(calc.batch(&body.samples, &target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::App;

    use crate::config::Config;

    fn make_app(
        state: AppState,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .configure(crate::web::configure)
    }

    // -----------------------------------------------------------------------
    // Health and defaults
    // -----------------------------------------------------------------------

    #[actix_web::test]
    async fn test_health() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::get().uri("/api/health").to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn test_defaults_reflect_config() {
        let mut config = Config::default();
        config.liming.prnt = 95.0;
        let app = actix_test::init_service(make_app(AppState::new(config))).await;
        let req = actix_test::TestRequest::get().uri("/api/defaults").to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["liming"]["prnt"].as_f64(), Some(95.0));
        assert_eq!(body["sprayer"]["tank_capacity"].as_f64(), Some(600.0));
    }

    // -----------------------------------------------------------------------
    // Liming endpoint
    // -----------------------------------------------------------------------

    #[actix_web::test]
    async fn test_liming_success() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/liming")
            .set_json(serde_json::json!({
                "analysis": {"potassium": 0.2, "calcium": 2.0, "magnesium": 1.0, "acidity": 3.0, "phosphorus": 15.0},
                "target": {"target_saturation": 70.0, "prnt": 80.0}
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let need = body["recommendation"]["needed_tons_per_ha"].as_f64().unwrap();
        assert!((need - 1.425).abs() < 1e-3);
        assert_eq!(body["fertilization"]["phosphorus"], "medium");
        assert_eq!(body["already_corrected"], false);
    }

    #[actix_web::test]
    async fn test_liming_uses_default_target() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/liming")
            .set_json(serde_json::json!({
                "analysis": {"potassium": 0.5, "calcium": 4.0, "magnesium": 2.0, "acidity": 1.0}
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["target"]["target_saturation"].as_f64(), Some(70.0));
        assert_eq!(body["already_corrected"], true);
        assert!(body["fertilization"]["phosphorus"].is_null());
        assert_eq!(body["fertilization"]["potassium"], "adequate");
    }

    #[actix_web::test]
    async fn test_liming_zero_prnt_is_bad_request() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/liming")
            .set_json(serde_json::json!({
                "analysis": {"potassium": 0.2, "calcium": 2.0, "magnesium": 1.0, "acidity": 3.0},
                "target": {"target_saturation": 70.0, "prnt": 0.0}
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["error"], "Bad Request");
        assert!(body["details"].as_str().unwrap().contains("PRNT"));
    }

    #[actix_web::test]
    async fn test_liming_negative_nutrient_is_bad_request() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/liming")
            .set_json(serde_json::json!({
                "analysis": {"potassium": -0.2, "calcium": 2.0, "magnesium": 1.0, "acidity": 3.0}
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    // -----------------------------------------------------------------------
    // Sprayer endpoint
    // -----------------------------------------------------------------------

    #[actix_web::test]
    async fn test_sprayer_direct() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/sprayer")
            .set_json(serde_json::json!({
                "nozzle_flow": 0.8,
                "nozzle_spacing": 50.0,
                "tank_capacity": 600.0,
                "speed": {"mode": "direct", "speed_kmh": 5.0}
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let volume = body["result"]["volume_per_ha"].as_f64().unwrap();
        assert!((volume - 192.0).abs() < 1e-9);
        assert_eq!(body["result"]["band"], "ideal");
        assert_eq!(body["speed_mode"], "direct");
    }

    #[actix_web::test]
    async fn test_sprayer_timed() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/sprayer")
            .set_json(serde_json::json!({
                "nozzle_flow": 0.8,
                "nozzle_spacing": 50.0,
                "tank_capacity": 600.0,
                "speed": {"mode": "timed", "distance_m": 50.0, "elapsed_s": 30.0}
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let speed = body["speed_kmh"].as_f64().unwrap();
        assert!((speed - 6.0).abs() < 1e-9);
    }

    #[actix_web::test]
    async fn test_sprayer_timed_zero_time_is_bad_request() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/sprayer")
            .set_json(serde_json::json!({
                "nozzle_flow": 0.8,
                "nozzle_spacing": 50.0,
                "tank_capacity": 600.0,
                "speed": {"mode": "timed", "distance_m": 50.0, "elapsed_s": 0.0}
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert!(body["details"].as_str().unwrap().contains("elapsed time"));
    }

    // -----------------------------------------------------------------------
    // Batch endpoint
    // -----------------------------------------------------------------------

    #[actix_web::test]
    async fn test_batch_mixed_results() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/batch")
            .set_json(serde_json::json!({
                "samples": [
                    {"sample_id": "A", "potassium": 0.2, "calcium": 2.0, "magnesium": 1.0, "acidity": 3.0},
                    {"sample_id": "B", "potassium": 0.2, "calcium": -2.0, "magnesium": 1.0, "acidity": 3.0}
                ]
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        let arr = body.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert!(arr[0]["report"].is_object());
        assert!(arr[1]["error"].as_str().unwrap().contains("calcium"));
    }

    #[actix_web::test]
    async fn test_batch_empty_is_unprocessable() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/batch")
            .set_json(serde_json::json!({ "samples": [] }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 422);
    }

    #[actix_web::test]
    async fn test_malformed_json_is_client_error() {
        let app = actix_test::init_service(make_app(AppState::default())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/sprayer")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert!(resp.status().is_client_error());
    }
}
