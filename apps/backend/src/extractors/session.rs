use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::SessionClaim;
use crate::error::AppError;

/// The verified session claim bound by `SessionAuth`.
///
/// Only usable on routes wrapped by the middleware; elsewhere the claim is
/// missing and extraction fails with 401 "token required".
#[derive(Debug, Clone)]
pub struct Session(pub SessionClaim);

impl Session {
    pub fn into_inner(self) -> SessionClaim {
        self.0
    }
}

impl Deref for Session {
    type Target = SessionClaim;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionClaim>()
                .cloned()
                .map(Session)
                .ok_or_else(AppError::token_required),
        )
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;
    use crate::auth::TokenAuthority;
    use crate::auth::SessionSubject;
    use crate::state::SecurityConfig;

    #[actix_web::test]
    async fn missing_claim_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = Session::extract(&req).await.unwrap_err();
        assert_eq!(err.message(), "token required");
    }

    #[actix_web::test]
    async fn bound_claim_is_returned() {
        let issued = TokenAuthority::new(SecurityConfig::for_tests())
            .issue(SessionSubject {
                subject_id: 3,
                email: "c@example.test".into(),
                display_name: "C".into(),
                role: "admin".into(),
                tenant_id: 2,
            })
            .unwrap();

        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(issued.claim.clone());

        let session = Session::extract(&req).await.unwrap();
        assert_eq!(session.subject_id(), 3);
        assert!(session.is_admin());
        assert_eq!(session.into_inner(), issued.claim);
    }
}
