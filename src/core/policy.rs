//! Authorization policies - decisioni basate sulle claim del token
//!
//! La valutazione (`Policy::evaluate`) non dipende da axum; il middleware
//! la collega alle richieste HTTP.

use crate::core::{AppError, Claims};
use axum::extract::State;
use axum::{body::Body, extract::Request, http::Response, middleware::Next};
use tracing::{debug, info, instrument, warn};

/// Claim required to delete suppliers
pub const DELETE_SUPPLIER_CLAIM: &str = "DeleteSupplier";

pub const DELETE_SUPPLIER: Policy = Policy::require_claim("DeleteSupplierPolicy", DELETE_SUPPLIER_CLAIM);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub name: &'static str,
    pub required_claim: &'static str,
}

impl Policy {
    /// Policy satisfied when the token carries a claim of this type, whatever its value
    pub const fn require_claim(name: &'static str, required_claim: &'static str) -> Self {
        Self {
            name,
            required_claim,
        }
    }

    pub fn evaluate(&self, claims: &Claims) -> Decision {
        if claims.has_claim(self.required_claim) {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

/// Da montare dopo `authentication_middleware`, che inserisce le `Claims`
#[instrument(skip(policy, req, next), fields(policy = policy.name))]
pub async fn authorization_middleware(
    State(policy): State<Policy>,
    req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authorization middleware");
    let claims = req.extensions().get::<Claims>().ok_or_else(|| {
        warn!("Claims not found in request extensions");
        AppError::unauthorized("User not authenticated")
    })?;

    match policy.evaluate(claims) {
        Decision::Allow => {
            info!("Policy satisfied for {}", claims.email);
            Ok(next.run(req).await)
        }
        Decision::Deny => {
            warn!("User {} lacks claim {}", claims.email, policy.required_claim);
            Err(AppError::forbidden("Insufficient claims").with_details(format!(
                "This action requires the '{}' claim",
                policy.required_claim
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn claims(user_claims: &[(&str, &str)]) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            email: "mario@example.com".to_string(),
            jti: Uuid::new_v4(),
            nbf: 0,
            iat: 0,
            exp: 0,
            iss: "supplier-registry".to_string(),
            aud: "https://localhost".to_string(),
            role: vec!["Admin".to_string()],
            user_claims: user_claims
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_allow_with_claim() {
        assert_eq!(
            DELETE_SUPPLIER.evaluate(&claims(&[(DELETE_SUPPLIER_CLAIM, "true")])),
            Decision::Allow
        );
    }

    #[test]
    fn test_claim_value_is_irrelevant() {
        assert_eq!(
            DELETE_SUPPLIER.evaluate(&claims(&[(DELETE_SUPPLIER_CLAIM, "")])),
            Decision::Allow
        );
    }

    #[test]
    fn test_deny_without_claim() {
        // un ruolo non basta, serve proprio la claim
        assert_eq!(DELETE_SUPPLIER.evaluate(&claims(&[])), Decision::Deny);
        assert_eq!(
            DELETE_SUPPLIER.evaluate(&claims(&[("EditSupplier", "true")])),
            Decision::Deny
        );
    }
}
