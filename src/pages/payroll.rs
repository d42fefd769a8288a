use std::str::FromStr;

use actix_web::{
    delete, dev, get, http::header::ContentDisposition, post, put, web, FromRequest, HttpRequest, HttpResponse,
    Responder,
};
use chrono::{Datelike, Local};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::{Identity, Manager},
    dispatch::Mailer,
    entity::{payroll, sea_orm_active_enums::PayrollStatus},
    payroll::{self as engine, PayrollError, PayrollFilter, PayrollSettings, Period},
    utils,
};

use extractor::PayrollId;
use model::*;

mod extractor;
mod model;

pub(super) fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(generate_payroll)
        .service(get_payrolls)
        .service(get_payroll_stats)
        .service(get_payroll)
        .service(finalize_payroll)
        .service(recalculate_payroll)
        .service(delete_payroll)
        .service(download_payslip);
}

#[post("/generate")]
async fn generate_payroll(
    db: web::Data<DatabaseConnection>,
    settings: web::Data<PayrollSettings>,
    manager: Manager,
    payload: web::Json<GeneratePayroll>,
) -> Result<impl Responder, actix_web::Error> {
    let period = payload.period()?;

    let generated = engine::generate(
        db.get_ref(),
        settings.get_ref(),
        period,
        payload.employee_ids.as_deref(),
        manager.user_id,
    ).await?;

    Ok(
        HttpResponse::Created()
            .json(GeneratedPayrolls {
                message: format!("Generated {} payroll records", generated.created.len()),
                count: generated.created.len(),
                skipped: generated.skipped,
                data: generated.created,
            })
    )
}

#[get("")]
async fn get_payrolls(
    db: web::Data<DatabaseConnection>,
    identity: Identity,
    query: web::Query<ListPayrolls>,
) -> Result<impl Responder, actix_web::Error> {
    let visibility = identity.visibility()?;
    let (page, limit) = utils::page_window(query.page, query.limit);

    let page = engine::list(db.get_ref(), &query.filter(), &visibility, page, limit).await?;

    Ok(web::Json(page))
}

#[get("/stats/overview")]
async fn get_payroll_stats(
    db: web::Data<DatabaseConnection>,
    _manager: Manager,
    query: web::Query<StatsPeriod>,
) -> Result<impl Responder, actix_web::Error> {
    let stats = engine::stats(db.get_ref(), query.period()?).await?;

    Ok(web::Json(stats))
}

#[get("/{payroll_id}")]
async fn get_payroll(
    db: web::Data<DatabaseConnection>,
    identity: Identity,
    id: PayrollId,
) -> Result<impl Responder, actix_web::Error> {
    let record = engine::find_visible(db.get_ref(), *id, &identity.visibility()?).await?;

    Ok(web::Json(record))
}

#[put("/{payroll_id}/finalize")]
async fn finalize_payroll(
    db: web::Data<DatabaseConnection>,
    mailer: web::Data<dyn Mailer>,
    manager: Manager,
    id: PayrollId,
) -> Result<impl Responder, actix_web::Error> {
    let record = engine::finalize(db.get_ref(), mailer.get_ref(), *id, manager.user_id).await?;

    Ok(web::Json(record))
}

#[put("/{payroll_id}/recalculate")]
async fn recalculate_payroll(
    db: web::Data<DatabaseConnection>,
    settings: web::Data<PayrollSettings>,
    manager: Manager,
    id: PayrollId,
) -> Result<impl Responder, actix_web::Error> {
    let record = engine::recalculate(db.get_ref(), settings.get_ref(), *id, manager.user_id).await?;

    Ok(web::Json(record))
}

#[delete("/{payroll_id}")]
async fn delete_payroll(
    db: web::Data<DatabaseConnection>,
    _manager: Manager,
    id: PayrollId,
) -> Result<impl Responder, actix_web::Error> {
    engine::delete(db.get_ref(), *id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/{payroll_id}/payslip")]
async fn download_payslip(
    db: web::Data<DatabaseConnection>,
    identity: Identity,
    id: PayrollId,
) -> Result<impl Responder, actix_web::Error> {
    let payslip = engine::download_payslip(db.get_ref(), *id, &identity.visibility()?).await?;

    Ok(
        HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition::attachment(payslip.filename))
            .body(payslip.bytes)
    )
}
