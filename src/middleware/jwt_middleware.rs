/// Bearer Authentication Middleware
///
/// Validates access tokens from the Authorization header through the
/// token codec and injects the claims into request extensions for use
/// by route handlers. Refresh tokens are rejected here; they are only
/// accepted by the session endpoints.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::{TokenCodec, TokenType};

/// JWT middleware for protecting routes
///
/// Must be applied to routes that require authentication.
pub struct JwtMiddleware {
    codec: TokenCodec,
}

impl JwtMiddleware {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            codec: self.codec.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    codec: TokenCodec,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Extract Authorization header
        let auth_header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string);

        let Some(token) = auth_header else {
            tracing::warn!("Missing or invalid Authorization header");
            let response = HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Missing or invalid authorization header",
                "code": "UNAUTHORIZED"
            }));
            return Box::pin(async move {
                Err(actix_web::error::InternalError::from_response(
                    "Unauthorized",
                    response,
                )
                .into())
            });
        };

        match self.codec.decode(&token) {
            Ok(claims) if claims.token_type == TokenType::Access => {
                req.extensions_mut().insert(claims.clone());

                tracing::debug!(user_id = %claims.sub, "Access token validated");

                let service = self.service.clone();
                Box::pin(async move { service.call(req).await })
            }
            Ok(_) => {
                tracing::warn!("Non-access token presented as bearer credential");
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "Invalid token type",
                    "code": "WRONG_TOKEN_TYPE"
                }));
                Box::pin(async move {
                    Err(actix_web::error::InternalError::from_response(
                        "Invalid token type",
                        response,
                    )
                    .into())
                })
            }
            Err(e) => {
                tracing::warn!("Access token validation failed: {}", e);
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "Invalid or expired token",
                    "code": "TOKEN_INVALID"
                }));
                Box::pin(async move {
                    Err(actix_web::error::InternalError::from_response(
                        "Invalid token",
                        response,
                    )
                    .into())
                })
            }
        }
    }
}
