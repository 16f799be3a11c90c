use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Uri,
    Error,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Public URL to internal page path, applied before routing.
pub const REWRITES: &[(&str, &str)] = &[
    ("/", "/public/home"),
    ("/about", "/public/about"),
    ("/skills", "/public/skills"),
    ("/projects", "/public/projects"),
    ("/experiences", "/public/experiences"),
];

/// Internal path for a public URL, if the table has an entry for it.
pub fn rewrite_target(path: &str) -> Option<&'static str> {
    REWRITES
        .iter()
        .find(|(from, _)| *from == path)
        .map(|(_, to)| *to)
}

/// Middleware that maps the public URL space onto internal routes
pub struct PathRewrite;

impl<S, B> Transform<S, ServiceRequest> for PathRewrite
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = PathRewriteMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PathRewriteMiddleware { service }))
    }
}

pub struct PathRewriteMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PathRewriteMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if let Some(target) = rewrite_target(req.path()) {
            let path_and_query = match req.query_string() {
                "" => target.to_string(),
                query => format!("{}?{}", target, query),
            };

            match path_and_query.parse::<Uri>() {
                Ok(uri) => {
                    tracing::trace!("Rewriting {} to {}", req.path(), uri);
                    req.match_info_mut().get_mut().update(&uri);
                    req.head_mut().uri = uri;
                }
                Err(e) => tracing::warn!("Skipping rewrite of {}: {}", req.path(), e),
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}
