use std::{env, net::{SocketAddr, ToSocketAddrs as _}};

use sea_orm::ConnectOptions;
use tracing::info;

use crate::{dispatch::EmailConfig, payroll::{LeaveProration, PayrollSettings}};

pub struct Config {
    pub host_address: SocketAddr,

    pub database_opt: ConnectOptions,

    pub jwt_key: String,

    pub run_migrations: bool,

    pub payroll: PayrollSettings,

    /// `None` leaves emails in the log
    pub email: Option<EmailConfig>,
}

pub fn load() -> Config {
    Config {
        host_address: load_host_address(),
        database_opt: load_database_opt().into(),
        jwt_key: load_jwt_key(),
        run_migrations: load_flag("RUN_MIGRATIONS"),
        payroll: load_payroll_settings(),
        email: load_email(),
    }
}

fn load_host_address() -> SocketAddr {
    info!("Loading environment `HOST_ADDRESS`");

    let var = env::var("HOST_ADDRESS").unwrap_or_else(|_| "127.0.0.1:0".to_string());

    var.to_socket_addrs()
        .expect("`HOST_ADDRESS` is not in a valid format").nth(0)
        .expect("unable to resolve host from `HOST_ADDRESS`")
}

fn load_database_opt() -> impl Into<ConnectOptions> {
    info!("Loading environment `DATABASE_URL`");

    let var = env::var("DATABASE_URL").expect("Environment `DATABASE_URL` is required to be set");

    var
}

fn load_jwt_key() -> String {
    info!("Loading environment `JWT_SECRET`");

    let var = env::var("JWT_SECRET").expect("Environment `JWT_SECRET` is required to be set");

    var
}

fn load_flag(name: &str) -> bool {
    info!("Loading environment `{name}`");

    env::var(name).is_ok_and(|var| parse_flag(&var))
}

fn parse_flag(var: &str) -> bool {
    matches!(var.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn load_payroll_settings() -> PayrollSettings {
    let leave_proration = if load_flag("PAYROLL_CLIP_LEAVES") {
        LeaveProration::ClipToMonth
    } else {
        LeaveProration::FullDuration
    };

    PayrollSettings { leave_proration }
}

fn load_email() -> Option<EmailConfig> {
    info!("Loading environment `SMTP_*`");

    EmailConfig::from_env()
}
