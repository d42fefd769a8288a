use std::ops::Deref;

use futures_util::future::{ready, Ready};

use super::*;

/// The `payroll_id` path segment
pub(super) struct PayrollId(pub(super) Uuid);

impl Deref for PayrollId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for PayrollId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let payroll_id = req.match_info().get("payroll_id").expect("This extractor must be used under `payroll_id` path");

        ready(
            Uuid::from_str(payroll_id)
                .map(Self)
                .map_err(|_| PayrollError::validation("payroll_id", "must be a UUID").into())
        )
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};

    use super::*;

    #[actix_web::test]
    async fn test_payroll_id_extractor() {
        #[get("/{payroll_id}")]
        async fn test_handler(id: PayrollId) -> impl Responder {
            id.to_string()
        }

        let app = test::init_service(App::new().service(test_handler)).await;

        let id = Uuid::new_v4();
        let req = test::TestRequest::default()
            .uri(&format!("/{id}"))
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, id.to_string().as_bytes());

        let req = test::TestRequest::default()
            .uri("/not-a-uuid")
            .to_request();

        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
