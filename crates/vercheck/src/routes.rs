use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};

use http_body_util::Full;
use serde::Serialize;
use tracing::debug;
use url::form_urlencoded;

use vercheck_pep440::parse_and_compare;

/// The sample request shown whenever a caller got the arguments wrong.
const SAMPLE_REQUEST: &str = "http://127.0.0.1:5000/checkversion?ver1=2.0&ver2=1.0";

/// The version scheme all arguments must follow.
const VERSION_SCHEME: &str = "https://www.python.org/dev/peps/pep-0440/#version-scheme";

const HELP_PAGE: &str = r#"
<h1>Version Checker</h1>

<pre>
METHOD:
GET /checkversion

Compare version strings in PEP 440 format
ref: https://www.python.org/dev/peps/pep-0440/#version-scheme

eg:  http://127.0.0.1:5000/checkversion?ver1=2.0&ver2=1.0.0

ARGUMENTS:
takes 2 args *ver1* and *ver2*, specified in PEP 440 format

RESPONSE:
json indicating if the first version is before, after, or equal to the second version.
eg: {
  "ver1": "2.0",
  "ver2": "1.0.0",
  "result": "2.0 After 1.0.0"
}

ERRORS:
422: if any one of *ver1* or *ver2* is absent, or if non-conformant version values are provided
eg: {
  "error": "Invalid version `2.0.`: trailing characters `.`",
  "message": "version numbers must conform to PEP 440, see https://www.python.org/dev/peps/pep-0440/#version-scheme"
}
</pre>
"#;

/// A successful comparison, echoing both inputs as received.
#[derive(Serialize)]
struct Comparison {
    ver1: String,
    ver2: String,
    result: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Route a single request to its handler.
///
/// Every response is generated locally, so the `hyper::Error` in the signature is
/// never produced; it's there to satisfy [`hyper::service::service_fn`].
pub async fn handle(request: Request<Incoming>) -> Result<Response<Full<Bytes>>, hyper::Error> {
    debug!("{} {}", request.method(), request.uri());
    let response = match (request.method(), request.uri().path()) {
        (&Method::GET, "/checkversion") => {
            check_version(request.uri().query().unwrap_or_default())
        }
        (&Method::GET, "/") => help_page(),
        (_, "/checkversion" | "/") => method_not_allowed(),
        _ => not_found(),
    };
    Ok(response)
}

/// Compare the `ver1` and `ver2` query parameters.
///
/// Flask surfaces the first value of a repeated parameter and treats an empty value
/// like an absent one, and callers rely on both.
fn check_version(query: &str) -> Response<Full<Bytes>> {
    let mut ver1 = None;
    let mut ver2 = None;
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            "ver1" if ver1.is_none() => ver1 = Some(value.into_owned()),
            "ver2" if ver2.is_none() => ver2 = Some(value.into_owned()),
            _ => {}
        }
    }

    let ver1 = ver1.filter(|raw| !raw.is_empty());
    let ver2 = ver2.filter(|raw| !raw.is_empty());
    let (ver1, ver2) = match (ver1, ver2) {
        (Some(ver1), Some(ver2)) => (ver1, ver2),
        (ver1, ver2) => {
            return json_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                &ErrorBody {
                    error: format!(
                        "send both versions ver1:{} ver2:{}",
                        ver1.as_deref().unwrap_or_default(),
                        ver2.as_deref().unwrap_or_default()
                    ),
                    message: Some(format!("sample request: {SAMPLE_REQUEST}")),
                },
            );
        }
    };

    match parse_and_compare(&ver1, &ver2) {
        Ok(ordering) => json_response(
            StatusCode::OK,
            &Comparison {
                result: format!("{ver1} {ordering} {ver2}"),
                ver1,
                ver2,
            },
        ),
        Err(err) => json_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            &ErrorBody {
                error: err.to_string(),
                message: Some(format!(
                    "version numbers must conform to PEP 440, see {VERSION_SCHEME}"
                )),
            },
        ),
    }
}

fn help_page() -> Response<Full<Bytes>> {
    response(
        StatusCode::OK,
        "text/html; charset=utf-8",
        Bytes::from_static(HELP_PAGE.as_bytes()),
    )
}

fn not_found() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &ErrorBody {
            error: "supported methods are /checkversion?ver1=2.0&ver2=1.0".to_string(),
            message: None,
        },
    )
}

fn method_not_allowed() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &ErrorBody {
            error: "method not allowed; use GET".to_string(),
            message: None,
        },
    )
}

fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(payload).expect("response payloads serialize");
    response(status, "application/json", Bytes::from(body))
}

fn response(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
