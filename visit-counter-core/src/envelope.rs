use {
    std::io,
    serde::{Serialize, Deserialize, ser::Error as _},
    serde_json::ser::{Formatter, Serializer},
    http::StatusCode,
};

const NOT_FOUND_PREFIX: &str = "Not Found";
const ERROR_PREFIX: &str = "Error";

// returned when the body itself cannot be encoded, keeps the envelope well-formed
const FALLBACK_ERROR_BODY: &str = "{\"error\": \"Error: failed to encode response body\"}";

/// What every invocation returns to the function runtime.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode", with = "http_serde::status_code")]
    pub status_code: StatusCode,
    /// JSON text of a [`ResponseBody`].
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum ResponseBody {
    VisitCount { visit_count: u64 },
    Error { error: String },
}

impl ResponseEnvelope {
    pub fn visit_count(visit_count: u64) -> Self {
        Self::new(StatusCode::OK, &ResponseBody::VisitCount { visit_count })
    }

    pub fn not_found(detail: impl AsRef<str>) -> Self {
        Self::error(StatusCode::NOT_FOUND, NOT_FOUND_PREFIX, detail.as_ref())
    }

    pub fn internal_error(detail: impl AsRef<str>) -> Self {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, ERROR_PREFIX, detail.as_ref())
    }

    fn error(status_code: StatusCode, prefix: &str, detail: &str) -> Self {
        Self::new(status_code, &ResponseBody::Error { error: format!("{prefix}: {detail}") })
    }

    fn new(status_code: StatusCode, body: &ResponseBody) -> Self {
        match encode_body(body) {
            Ok(body) => Self { status_code, body },
            Err(_) => Self {
                status_code: StatusCode::INTERNAL_SERVER_ERROR,
                body: FALLBACK_ERROR_BODY.to_owned(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    pub fn parse_body(&self) -> Result<ResponseBody, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

impl ResponseBody {
    pub fn visit_count(&self) -> Option<u64> {
        match self {
            Self::VisitCount { visit_count } => Some(*visit_count),
            Self::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::VisitCount { .. } => None,
            Self::Error { error } => Some(error.as_str()),
        }
    }
}

fn encode_body(body: &ResponseBody) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
    body.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|err| serde_json::Error::custom(format!("body is not utf-8: {err:?}")))
}

/// Compact json with a space after `,` and `:`, e.g. `{"visit_count": 1}`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}
