use actix_web::web;

mod payroll;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg
        .service(web::scope("/payroll")
            .configure(payroll::config));
}
