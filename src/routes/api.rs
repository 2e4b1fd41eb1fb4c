use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::dto::companies::CompaniesQuery;
use crate::engine::FilterEngine;
use crate::repository::CompanyReader;
use crate::routes::{error_response, local_now};
use crate::services::companies as companies_service;

/// Repository handle registered with `web::Data::from(Arc<...>)`.
pub type SharedRepository = dyn CompanyReader + Send + Sync;

#[derive(Deserialize)]
pub struct AsOfQueryParams {
    as_of: Option<String>,
}

#[post("/v1/companies")]
pub async fn api_v1_companies(
    repo: web::Data<SharedRepository>,
    engine: web::Data<FilterEngine>,
    web::Json(query): web::Json<CompaniesQuery>,
) -> impl Responder {
    match companies_service::list_companies(repo.get_ref(), engine.get_ref(), query, local_now()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => error_response(err),
    }
}

#[get("/v1/categories/summary")]
pub async fn api_v1_category_summary(
    repo: web::Data<SharedRepository>,
    engine: web::Data<FilterEngine>,
    params: web::Query<AsOfQueryParams>,
) -> impl Responder {
    match companies_service::summarize_categories(
        repo.get_ref(),
        engine.get_ref(),
        params.as_of.as_deref(),
        local_now(),
    ) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => error_response(err),
    }
}

#[get("/v1/companies/{company_id}")]
pub async fn api_v1_company(
    repo: web::Data<SharedRepository>,
    engine: web::Data<FilterEngine>,
    company_id: web::Path<i64>,
    params: web::Query<AsOfQueryParams>,
) -> impl Responder {
    match companies_service::show_company(
        repo.get_ref(),
        engine.get_ref(),
        company_id.into_inner(),
        params.as_of.as_deref(),
        local_now(),
    ) {
        Ok(company) => HttpResponse::Ok().json(company),
        Err(err) => error_response(err),
    }
}
