use std::{fs::OpenOptions, sync::Arc};

use actix_web::{web, App, HttpServer};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::Level;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{filter, fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use crate::{auth::Authority, dispatch::{LogMailer, Mailer, SmtpMailer}};

mod config;
mod consts;
mod utils;

mod entity;
mod auth;
mod payroll;
mod payslip;
mod dispatch;
mod pages;

#[cfg(test)]
mod test_utils;

#[actix_web::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("trace.log")
        .unwrap();

    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_line_number(true)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(log_file)
                .with_filter(filter::LevelFilter::from_level(Level::TRACE))
        );

    tracing::subscriber::set_global_default(subscriber).unwrap();

    let config::Config {
        host_address,
        database_opt,
        jwt_key,
        run_migrations,
        payroll: payroll_settings,
        email,
    } = config::load();

    let database = Database::connect(database_opt).await.expect("Unable to connect to database");

    if run_migrations {
        tracing::info!("Applying pending migrations");
        Migrator::up(&database, None).await.expect("Unable to apply migrations");
    }

    let mailer: Arc<dyn Mailer> = match email {
        Some(email) => Arc::new(SmtpMailer::new(email).expect("Unable to set up SMTP transport")),
        None => {
            tracing::warn!("`SMTP_HOST` is not set, emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    tracing::info!(leave_proration = ?payroll_settings.leave_proration, "Payroll settings loaded");

    let database = web::Data::new(database);
    let authority = web::Data::new(Authority::new(jwt_key.as_bytes()));
    let settings = web::Data::new(payroll_settings);
    let mailer = web::Data::from(mailer);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(database.clone())
            .app_data(authority.clone())
            .app_data(settings.clone())
            .app_data(mailer.clone())
            .wrap(TracingLogger::default())
            .configure(pages::config)
    });

    server
        .bind(host_address).unwrap()
        .run().await.unwrap();
}
