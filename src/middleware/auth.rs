use crate::error::AppError;
use crate::models::SessionUser;
use crate::utils::auth::{clear_session_cookie, session_token};
use crate::AppState;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::Error as ActixError,
    http::{header, Method},
    web, HttpMessage, HttpResponse, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

pub const LOGIN_PATH: &str = "/login";

/// Signed-in admin, placed in request extensions by the session gate.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub user: SessionUser,
    pub token: String,
}

impl std::ops::Deref for AdminSession {
    type Target = SessionUser;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

// Extractor for AdminSession from request extensions
impl actix_web::FromRequest for AdminSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AdminSession>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(result)
    }
}

/// What the gate does with a request that has no valid session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateMode {
    /// HTML pages: send the browser to the login page.
    Redirect,
    /// JSON API: answer 401.
    Reject,
}

/// Session gate middleware factory
#[derive(Debug, Clone, Copy)]
pub struct SessionGate {
    mode: GateMode,
    writes_only: bool,
}

impl SessionGate {
    /// Gate every request, redirecting to the login page on failure.
    pub fn redirect() -> Self {
        SessionGate {
            mode: GateMode::Redirect,
            writes_only: false,
        }
    }

    /// Gate every request, answering 401 on failure.
    pub fn reject() -> Self {
        SessionGate {
            mode: GateMode::Reject,
            writes_only: false,
        }
    }

    /// Gate only mutating methods; reads pass through anonymously.
    pub fn reject_writes() -> Self {
        SessionGate {
            mode: GateMode::Reject,
            writes_only: true,
        }
    }
}

fn is_read(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Login URL that returns to `path` afterwards.
pub fn login_redirect_target(path: &str) -> String {
    format!("{}?next={}", LOGIN_PATH, urlencoding::encode(path))
}

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = SessionGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateService {
            service: Rc::new(service),
            gate: *self,
        }))
    }
}

pub struct SessionGateService<S> {
    service: Rc<S>,
    gate: SessionGate,
}

impl<S, B> Service<ServiceRequest> for SessionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let gate = self.gate;

        Box::pin(async move {
            if gate.writes_only && is_read(req.method()) {
                return Ok(service.call(req).await?.map_into_left_body());
            }

            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::InternalServerError("App state not found".to_string()))?
                .clone();

            let verified = match session_token(req.request()) {
                Some(token) => match state.auth.get_user(&token).await {
                    Ok(user) => Ok(AdminSession { user, token }),
                    Err(e) => {
                        tracing::debug!("Session check failed for {}: {}", req.path(), e);
                        Err(e)
                    }
                },
                None => Err(AppError::Unauthorized("Missing session token".to_string())),
            };

            match verified {
                Ok(session) => {
                    req.extensions_mut().insert(session);
                    Ok(service.call(req).await?.map_into_left_body())
                }
                Err(e) => match gate.mode {
                    GateMode::Reject => {
                        let response = e.error_response();
                        Ok(req.into_response(response).map_into_right_body())
                    }
                    GateMode::Redirect => {
                        let target = login_redirect_target(req.path());
                        let response = HttpResponse::SeeOther()
                            .insert_header((header::LOCATION, target))
                            .cookie(clear_session_cookie())
                            .finish();
                        Ok(req.into_response(response).map_into_right_body())
                    }
                },
            }
        })
    }
}
