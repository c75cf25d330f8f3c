use crate::wire::{
    resolve_count, DemoRecommendation, ProfileRequest, RecommendQuery, RecommendationResponse, SectionResponse,
    SectionedQuery, SectionedResponse, ValidationError,
};
use actix_cors::Cors;
use actix_web::{error, web, App, HttpResponse, HttpServer, ResponseError, Result as ActixResult};
use carfit_core::{SentimentPreference, UserProfile};
use carfit_ranking::{format_price, RecommendationEngine};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub struct RestApi;

impl RestApi {
    pub async fn start(engine: Arc<RecommendationEngine>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(engine.clone()))
                .configure(routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register every endpoint; expects `web::Data<Arc<RecommendationEngine>>`
pub fn routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| json_error(err));
    let query_config = web::QueryConfig::default().error_handler(|err, _req| json_error(err));

    cfg.app_data(json_config)
        .app_data(query_config)
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health))
        .route("/stats", web::get().to(stats))
        .route("/categories", web::get().to(categories))
        .route("/brands", web::get().to(brands))
        .route("/recommend", web::post().to(recommend))
        .route("/recommend/sectioned", web::post().to(recommend_sectioned))
        .route("/recommend/demo", web::get().to(demo));
}

/// Extractor failures become 400 with a JSON error body
fn json_error(err: impl ResponseError + 'static) -> actix_web::Error {
    let message = err.to_string();
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(json!({ "error": message }))).into()
}

fn bad_request(err: ValidationError) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
}

async fn root() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "Vehicle Accessories Recommendation API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "stats": "/stats",
            "categories": "/categories",
            "brands": "/brands",
            "recommend": "/recommend (POST)",
            "recommend_sectioned": "/recommend/sectioned (POST)",
            "demo": "/recommend/demo"
        }
    })))
}

async fn health(engine: web::Data<Arc<RecommendationEngine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "engine_loaded": true,
        "total_accessories": engine.catalog().len()
    })))
}

async fn stats(engine: web::Data<Arc<RecommendationEngine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(engine.catalog().stats()))
}

async fn categories(engine: web::Data<Arc<RecommendationEngine>>) -> ActixResult<HttpResponse> {
    let categories = engine.catalog().categories();
    Ok(HttpResponse::Ok().json(json!({
        "count": categories.len(),
        "categories": categories
    })))
}

async fn brands(engine: web::Data<Arc<RecommendationEngine>>) -> ActixResult<HttpResponse> {
    let brands = engine.catalog().brands();
    Ok(HttpResponse::Ok().json(json!({
        "count": brands.len(),
        "brands": brands
    })))
}

async fn recommend(
    engine: web::Data<Arc<RecommendationEngine>>,
    query: web::Query<RecommendQuery>,
    req: web::Json<ProfileRequest>,
) -> ActixResult<HttpResponse> {
    let config = engine.config();
    let top_k = match resolve_count(query.top_k, config.default_top_k, config.max_top_k, "top_k") {
        Ok(k) => k,
        Err(e) => return Ok(bad_request(e)),
    };
    let profile = match req.into_inner().into_profile() {
        Ok(p) => p,
        Err(e) => return Ok(bad_request(e)),
    };

    let result = engine.recommend(&profile, top_k, config.diversity_factor);
    debug!(brand = %profile.car_brand, returned = result.len(), "recommend");
    Ok(HttpResponse::Ok().json(RecommendationResponse::from_result(&result, &profile)))
}

async fn recommend_sectioned(
    engine: web::Data<Arc<RecommendationEngine>>,
    query: web::Query<SectionedQuery>,
    req: web::Json<ProfileRequest>,
) -> ActixResult<HttpResponse> {
    let config = engine.config();
    let counts = resolve_count(
        query.exact_match_count,
        config.default_exact_match_count,
        config.max_top_k,
        "exact_match_count",
    )
    .and_then(|exact| {
        resolve_count(
            query.compatible_count,
            config.default_compatible_count,
            config.max_top_k,
            "compatible_count",
        )
        .map(|compatible| (exact, compatible))
    });
    let (exact_match_count, compatible_count) = match counts {
        Ok(c) => c,
        Err(e) => return Ok(bad_request(e)),
    };
    let profile = match req.into_inner().into_profile() {
        Ok(p) => p,
        Err(e) => return Ok(bad_request(e)),
    };

    let result = engine.recommend_sectioned(&profile, exact_match_count, compatible_count);
    debug!(
        brand = %profile.car_brand,
        exact = result.exact_match.result.len(),
        compatible = result.compatible.result.len(),
        "recommend sectioned"
    );
    Ok(HttpResponse::Ok().json(SectionedResponse {
        success: !result.is_empty(),
        total_count: result.total(),
        exact_match: SectionResponse::from_section(&result.exact_match, &profile),
        compatible: SectionResponse::from_section(&result.compatible, &profile),
    }))
}

/// Fixed sample profile served by the demo endpoint
pub fn demo_profile() -> UserProfile {
    UserProfile {
        car_brand: "Toyota".to_string(),
        car_model: Some("Camry".to_string()),
        budget_min: 500.0,
        budget_max: 3000.0,
        quality_threshold: 0.3,
        sentiment_preference: SentimentPreference::Positive,
        emotion_preference: vec!["Happy".to_string(), "Satisfied".to_string()],
        preferred_categories: vec!["Interior".to_string(), "Safety".to_string()],
        search_query: None,
        aspect_priorities: Some(BTreeMap::from([
            ("Compatibility".to_string(), 0.9),
            ("Quality".to_string(), 0.9),
            ("Value".to_string(), 0.8),
        ])),
    }
}

async fn demo(engine: web::Data<Arc<RecommendationEngine>>) -> ActixResult<HttpResponse> {
    let profile = demo_profile();
    let config = engine.config();
    let result = engine.recommend(&profile, config.default_top_k, config.diversity_factor);
    let recommendations: Vec<DemoRecommendation> = result
        .items
        .iter()
        .map(|item| DemoRecommendation {
            accessory_name: item.record().name().to_string(),
            price: format_price(item.record().price),
            category: item.record().category.clone(),
            score: format!("{:.3}", item.final_score()),
            explanation: item.explanation.clone(),
        })
        .collect();
    Ok(HttpResponse::Ok().json(json!({
        "demo_user": profile,
        "recommendations": recommendations
    })))
}
