//! Request body extraction and field validation.
//!
//! Bodies arrive as JSON or as urlencoded forms. Both are normalized to a JSON
//! value, then each payload type checks its own fields and reports every
//! failing field at once.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use serde_json::{Map, Value};
use service::author::domain::AuthorWrite;
use service::book::domain::BookWrite;

use crate::errors::{ApiError, FieldError};

/// Raw request body as a JSON value.
///
/// A missing or unknown content type yields an empty object, so field checks
/// report every field instead of the request failing on the media type.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(pub Value);

#[axum::async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            let map: Map<String, Value> = pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
            return Ok(Payload(Value::Object(map)));
        }

        if content_type.starts_with("application/json") || content_type.contains("+json") {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Payload(Value::Object(Map::new())));
            }
            let value = serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::BadRequest(format!("malformed JSON body: {e}")))?;
            return Ok(Payload(value));
        }

        Ok(Payload(Value::Object(Map::new())))
    }
}

/// A body that passed field validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: FromPayload,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Payload(body) = Payload::from_request(req, state).await?;
        T::from_payload(&body).map(Validated).map_err(ApiError::Validation)
    }
}

pub trait FromPayload: Sized + Send {
    fn from_payload(body: &Value) -> Result<Self, Vec<FieldError>>;
}

impl FromPayload for AuthorWrite {
    fn from_payload(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut v = Fields::new(body);
        let first_name = v.string("firstName");
        let last_name = v.string("lastName");
        match (first_name, last_name) {
            (Some(first_name), Some(last_name)) => Ok(AuthorWrite { first_name, last_name }),
            _ => Err(v.into_errors()),
        }
    }
}

impl FromPayload for BookWrite {
    fn from_payload(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut v = Fields::new(body);
        let title = v.string("title");
        let author_id = v.int("authorId");
        let date_published = v.string("datePublished");
        let is_fiction = v.boolean("isFiction");
        match (title, author_id, date_published, is_fiction) {
            (Some(title), Some(author_id), Some(date_published), Some(is_fiction)) => {
                Ok(BookWrite { title, author_id, date_published, is_fiction })
            }
            _ => Err(v.into_errors()),
        }
    }
}

/// Typed field accessors that record a `FieldError` for every miss.
pub struct Fields<'a> {
    body: Option<&'a Map<String, Value>>,
    errors: Vec<FieldError>,
}

impl<'a> Fields<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self { body: body.as_object(), errors: Vec::new() }
    }

    fn check<T>(&mut self, name: &str, parse: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
        let raw = self.body.and_then(|m| m.get(name));
        let parsed = raw.and_then(parse);
        if parsed.is_none() {
            self.errors.push(FieldError::invalid(name, raw));
        }
        parsed
    }

    pub fn string(&mut self, name: &str) -> Option<String> {
        self.check(name, |v| v.as_str().map(str::to_string))
    }

    /// JSON integer (or integral float) in i32 range, or a string holding a decimal integer.
    pub fn int(&mut self, name: &str) -> Option<i32> {
        self.check(name, |v| match v {
            Value::Number(n) => match n.as_i64() {
                Some(n) => i32::try_from(n).ok(),
                // `3.0` is written as `3` once stringified, so it counts as an integer
                None => n.as_f64().filter(|f| f.fract() == 0.0).and_then(|f| {
                    (f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX)).then_some(f as i32)
                }),
            },
            Value::String(s) => parse_decimal(s),
            _ => None,
        })
    }

    pub fn boolean(&mut self, name: &str) -> Option<bool> {
        self.check(name, |v| match v {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// Whole-string decimal integer with an optional sign.
fn parse_decimal(s: &str) -> Option<i32> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.strip_prefix('+').unwrap_or(s).parse().ok()
}

/// Leading-integer parse of a path segment: `"12abc"` is 12, `"abc"` is nothing.
pub fn parse_id(raw: &str) -> Option<i32> {
    let s = raw.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => ("-", &s[1..]),
        Some(b'+') => ("", &s[1..]),
        _ => ("", s),
    };
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    format!("{sign}{}", &rest[..end]).parse().ok()
}
