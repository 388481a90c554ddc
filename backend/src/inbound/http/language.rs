//! Request language negotiation.
//!
//! `?lang=ne|en` wins, then an `Accept-Language` header starting with `ne`,
//! then English.

use actix_web::http::header::ACCEPT_LANGUAGE;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use serde::Deserialize;

use crate::domain::Language;

#[derive(Debug, Default, Deserialize)]
struct LanguageQuery {
    lang: Option<String>,
}

/// Language the response should be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLanguage(pub Language);

impl RequestLanguage {
    /// Negotiate from the query string and headers of `req`.
    pub fn from_http(req: &HttpRequest) -> Self {
        let query = web::Query::<LanguageQuery>::from_query(req.query_string())
            .map(web::Query::into_inner)
            .unwrap_or_default();
        let header = req
            .headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        Self(Language::negotiate(query.lang.as_deref(), header))
    }
}

impl FromRequest for RequestLanguage {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_http(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case("/", None, Language::En)]
    #[case("/?lang=ne", None, Language::Ne)]
    #[case("/?lang=en", Some("ne-NP,ne;q=0.9"), Language::En)]
    #[case("/", Some("ne-NP,en;q=0.8"), Language::Ne)]
    #[case("/", Some("en-GB,ne;q=0.8"), Language::En)]
    #[case("/?lang=fr", Some("ne"), Language::Ne)]
    fn negotiates_query_then_header(
        #[case] uri: &str,
        #[case] accept: Option<&str>,
        #[case] expected: Language,
    ) {
        let mut request = TestRequest::get().uri(uri);
        if let Some(value) = accept {
            request = request.insert_header((ACCEPT_LANGUAGE, value));
        }
        assert_eq!(RequestLanguage::from_http(&request.to_http_request()).0, expected);
    }
}
