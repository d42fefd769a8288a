use std::ops::Deref;

use actix_web::{body, dev, http::{self, header::ContentType, StatusCode}, web, FromRequest, HttpRequest, HttpResponse};
#[cfg(test)]
use chrono::{Duration, Local};
use futures_util::future::LocalBoxFuture;
#[cfg(test)]
use jsonwebtoken::{encode, EncodingKey, Header};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::entity::sea_orm_active_enums::RoleType;

/// Validates caller tokens issued by the identity service
pub struct Authority {
    #[cfg(test)]
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Authority {
    pub fn new(jwt_key: &[u8]) -> Self {
        Self {
            #[cfg(test)]
            encoding_key: EncodingKey::from_secret(jwt_key),
            decoding_key: DecodingKey::from_secret(jwt_key),
        }
    }

    /// Issue a token for specified identity with 1 week of expiration time
    #[cfg(test)]
    pub fn issue_for(&self, identity: &Identity) -> String {
        let claims = Claims {
            exp: (Local::now() + Duration::weeks(1)).timestamp(),
            data: identity,
        };

        encode(&Header::default(), &claims, &self.encoding_key).unwrap()
    }

    pub fn authorize(&self, token: impl AsRef<str>) -> Result<Identity, AuthError> {
        let payload = decode::<Claims<Identity>>(token.as_ref(), &self.decoding_key, &Validation::default())?;

        Ok(payload.claims.data)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims<T> {
    exp: i64,
    data: T,
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    /// Absent for accounts without an employee profile
    pub employee_id: Option<Uuid>,
    pub role: RoleType,
}

/// Which payroll records a caller may read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Everyone,
    Own(Uuid),
    /// The lead's own records and those of their direct reports
    Team(Uuid),
}

impl Identity {
    pub fn visibility(&self) -> Result<Visibility, AuthError> {
        match (self.role, self.employee_id) {
            (RoleType::Admin | RoleType::Hr, _) => Ok(Visibility::Everyone),
            (RoleType::TeamLead, Some(employee_id)) => Ok(Visibility::Team(employee_id)),
            (RoleType::Employee, Some(employee_id)) => Ok(Visibility::Own(employee_id)),
            (_, None) => Err(AuthError::NoEmployeeProfile),
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self.role, RoleType::Admin | RoleType::Hr)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authority error")]
    AuthorityError(#[from] jsonwebtoken::errors::Error),

    #[error("unauthorized")]
    MissingToken,

    #[error("forbidden")]
    Forbidden,

    #[error("no employee profile is linked to this account")]
    NoEmployeeProfile,
}

impl actix_web::error::ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> http::StatusCode {
        match self {
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::AuthorityError(_) | AuthError::Forbidden | AuthError::NoEmployeeProfile => StatusCode::FORBIDDEN,
        }
    }
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // Basically grabs the value after space ( ) from `Authorization` header
            // Example: JWT sometoken
            //              ^ grabs this value
            let Some(Ok(Some((_, token)))) = req.headers()
                .get("Authorization")
                .map(|v|
                    v.to_str()
                        .map(|str| str.split_once(" "))
                )
            else {
                return Err(AuthError::MissingToken.into())
            };

            let authority = req.app_data::<web::Data<Authority>>().expect("Authority must be attached");
            let identity = authority.authorize(token)?;

            Ok(identity)
        })
    }
}

/// A caller allowed to run payroll: Admin or HR
pub struct Manager(pub Identity);

impl Deref for Manager {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Manager {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let identity = Identity::from_request(&req, &mut dev::Payload::None).await?;

            if !identity.is_manager() {
                return Err(AuthError::Forbidden.into())
            }

            Ok(Self(identity))
        })
    }
}
