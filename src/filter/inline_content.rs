//! The `inlineContent` filter: answers the request with literal content.
//!
//! ```text
//! status(420) -> inlineContent("Enhance Your Calm") -> <shunt>
//! inlineContent("{\"foo\": 42}", "application/json") -> <shunt>
//! ```
//!
//! The first argument is the body. The optional second argument is the
//! content type; when it is missing or empty the type is sniffed from the
//! body once, at construction. Every request gets `200 OK` with
//! `Content-Type` and `Content-Length` set. Filters placed before this one
//! can still rewrite the response in their response phase.

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};
use http::StatusCode;

use super::{Filter, FilterContext, Spec};
use crate::args::{self, Arg, Target};
use crate::error::Error;
use crate::response::Response;
use crate::sniff;

pub const INLINE_CONTENT: &str = "inlineContent";

/// Factory for [`InlineContent`].
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineContentSpec;

impl Spec for InlineContentSpec {
    fn name(&self) -> &str {
        INLINE_CONTENT
    }

    fn create_filter(&self, args: &[Arg]) -> Result<Box<dyn Filter>, Error> {
        Ok(Box::new(InlineContent::from_args(args)?))
    }
}

/// Serves a fixed body with a fixed content type.
#[derive(Clone, Debug)]
pub struct InlineContent {
    text: Bytes,
    mime: HeaderValue,
    length: HeaderValue,
}

impl InlineContent {
    /// Builds the filter from `(text, [mime])`.
    pub fn from_args(args: &[Arg]) -> Result<Self, Error> {
        let (mut text, mut mime) = (String::new(), String::new());
        args::capture(args, &mut [Target::Required(&mut text), Target::Optional(&mut mime)])?;
        Self::new(text, &mime)
    }

    /// Builds the filter directly. An empty `mime` is sniffed from `text`.
    pub fn new(text: impl Into<String>, mime: &str) -> Result<Self, Error> {
        let text = Bytes::from(text.into());
        let mime = match mime {
            "" => HeaderValue::from_static(sniff::detect_content_type(&text)),
            m => HeaderValue::from_str(m).map_err(|_| Error::InvalidParameters)?,
        };
        let length = HeaderValue::from(text.len());
        Ok(Self { text, mime, length })
    }

    pub fn text(&self) -> &Bytes {
        &self.text
    }

    /// The resolved content type; never empty.
    pub fn mime(&self) -> &HeaderValue {
        &self.mime
    }

    fn to_response(&self) -> Response {
        Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, self.mime.clone())
            .header(CONTENT_LENGTH, self.length.clone())
            .body(self.text.clone())
    }
}

impl Filter for InlineContent {
    fn request(&self, ctx: &mut dyn FilterContext) {
        ctx.serve(self.to_response());
    }

    // Nothing to finish: the response was complete when it was served.
    fn response(&self, _ctx: &mut dyn FilterContext) {}
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;
    use crate::filter::Context;
    use crate::request::Request;
    use crate::sniff::{detect_content_type, TEXT_PLAIN};

    fn request() -> Request {
        http::Request::get("/").body(Bytes::new()).unwrap().into()
    }

    fn serve(filter: &InlineContent) -> Response {
        let mut ctx = Context::new(request());
        filter.request(&mut ctx);
        assert!(ctx.served());
        ctx.into_response().unwrap()
    }

    async fn body(response: Response) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn name() {
        assert_eq!(InlineContentSpec.name(), "inlineContent");
    }

    #[test]
    fn sniffs_when_mime_missing() {
        for text in ["Enhance Your Calm", "<html><body/></html>", "%PDF-1.4", "", "\x01\x02"] {
            let f = InlineContent::from_args(&[text.into()]).unwrap();
            assert_eq!(f.mime(), detect_content_type(text.as_bytes()));
            assert!(!f.mime().is_empty());
        }
    }

    #[test]
    fn empty_mime_argument_is_sniffed() {
        let f = InlineContent::from_args(&["hello".into(), "".into()]).unwrap();
        assert_eq!(f.mime(), TEXT_PLAIN);
    }

    #[test]
    fn explicit_mime_bypasses_sniffing() {
        let f = InlineContent::from_args(&["<html>".into(), "application/json".into()]).unwrap();
        assert_eq!(f.mime(), "application/json");
    }

    #[test]
    fn invalid_arguments() {
        let spec = InlineContentSpec;
        assert!(matches!(spec.create_filter(&[]), Err(Error::InvalidParameters)));
        assert!(matches!(spec.create_filter(&[Arg::Number(42.0)]), Err(Error::InvalidParameters)));
        assert!(matches!(
            spec.create_filter(&["a".into(), "b".into(), "c".into()]),
            Err(Error::InvalidParameters)
        ));
        assert!(matches!(
            spec.create_filter(&["a".into(), "text/plain\r\nX-Evil: 1".into()]),
            Err(Error::InvalidParameters)
        ));
    }

    #[tokio::test]
    async fn enhance_your_calm() {
        let f = InlineContent::from_args(&["Enhance Your Calm".into()]).unwrap();
        let res = serve(&f);

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(res.headers()[CONTENT_LENGTH], "17");
        assert_eq!(body(res).await, "Enhance Your Calm");
    }

    #[tokio::test]
    async fn json_with_explicit_type() {
        let f = InlineContent::from_args(&[r#"{"foo": 42}"#.into(), "application/json".into()]).unwrap();
        let res = serve(&f);

        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(res.headers()[CONTENT_LENGTH], "11");
        assert_eq!(body(res).await, r#"{"foo": 42}"#);
    }

    #[tokio::test]
    async fn empty_content() {
        let f = InlineContent::from_args(&["".into()]).unwrap();
        let res = serve(&f);

        assert_eq!(res.headers()[CONTENT_LENGTH], "0");
        assert_eq!(res.headers()[CONTENT_TYPE], TEXT_PLAIN);
        assert!(body(res).await.is_empty());
    }

    #[test]
    fn content_length_counts_bytes() {
        let f = InlineContent::from_args(&["grüße 世界".into()]).unwrap();
        let res = serve(&f);
        assert_eq!(res.headers()[CONTENT_LENGTH], "grüße 世界".len().to_string().as_str());
        assert_eq!(res.headers()[CONTENT_LENGTH], "14");
    }

    #[tokio::test]
    async fn responses_are_identical_across_requests() {
        let f = InlineContent::from_args(&["same every time".into()]).unwrap();
        let (a, b) = (serve(&f), serve(&f));

        assert_eq!(a.status_code(), b.status_code());
        assert_eq!(a.headers(), b.headers());
        assert_eq!(body(a).await, body(b).await);
    }

    #[test]
    fn response_hook_is_a_no_op() {
        let f = InlineContent::from_args(&["x".into()]).unwrap();

        let mut ctx = Context::new(request());
        f.response(&mut ctx);
        assert!(!ctx.served());
        assert!(ctx.response_mut().is_none());

        f.request(&mut ctx);
        ctx.response_mut().unwrap().set_status(StatusCode::IM_A_TEAPOT);
        f.response(&mut ctx);
        assert_eq!(ctx.into_response().unwrap().status_code(), StatusCode::IM_A_TEAPOT);
    }
}
