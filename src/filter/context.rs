use tracing::warn;

use super::FilterContext;
use crate::request::Request;
use crate::response::Response;

/// The pipeline's [`FilterContext`], created fresh for every request.
#[derive(Debug)]
pub struct Context {
    request: Request,
    response: Option<Response>,
    served: bool,
}

impl Context {
    pub fn new(request: Request) -> Self {
        Self { request, response: None, served: false }
    }

    /// Installs the backend's response. Does not finalize the request.
    pub(crate) fn set_response(&mut self, response: Response) {
        self.response = Some(response);
    }

    pub fn into_response(self) -> Option<Response> {
        self.response
    }
}

impl FilterContext for Context {
    fn request(&self) -> &Request {
        &self.request
    }

    fn response_mut(&mut self) -> Option<&mut Response> {
        self.response.as_mut()
    }

    fn serve(&mut self, response: Response) {
        // A second serve means the pipeline ran a request hook after a shunt.
        // The first response stays.
        if self.served {
            warn!(path = self.request.path(), "request already served, response dropped");
            return;
        }
        self.response = Some(response);
        self.served = true;
    }

    fn served(&self) -> bool {
        self.served
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::StatusCode;

    use super::*;

    fn context() -> Context {
        Context::new(http::Request::get("/").body(Bytes::new()).unwrap().into())
    }

    #[test]
    fn serve_finalizes() {
        let mut ctx = context();
        assert!(!ctx.served());
        assert!(ctx.response_mut().is_none());

        ctx.serve(Response::status(StatusCode::OK));
        assert!(ctx.served());
        assert_eq!(ctx.response_mut().unwrap().status_code(), StatusCode::OK);
    }

    #[test]
    fn second_serve_keeps_first_response() {
        let mut ctx = context();
        ctx.serve(Response::status(StatusCode::OK));
        ctx.serve(Response::status(StatusCode::BAD_GATEWAY));
        assert_eq!(ctx.into_response().unwrap().status_code(), StatusCode::OK);
    }

    #[test]
    fn backend_response_is_not_a_shunt() {
        let mut ctx = context();
        ctx.set_response(Response::status(StatusCode::NOT_FOUND));
        assert!(!ctx.served());
        assert_eq!(ctx.into_response().unwrap().status_code(), StatusCode::NOT_FOUND);
    }
}
