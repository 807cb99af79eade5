use super::types::{
    ApiSpec, MediaType, Operation, Parameter, PathItem, RequestBody, OPENAPI_VERSION,
};
use crate::content_type::{self, ContentFilter, ContentTypeError};
use crate::manifest::ProjectMeta;
use http::Method;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// A route handler as supplied at registration time.
///
/// The synthesizer records that a handler was provided and validates its
/// position among the registration arguments; dispatching requests to it is
/// the host framework's concern and never happens here.
pub type Handler = Arc<dyn Fn() + Send + Sync + 'static>;

/// Wrap a closure for use as the terminal argument of a route registration.
pub fn handler<F>(f: F) -> Handler
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

/// One element of a route registration's argument sequence: zero or more
/// modifiers followed by the terminal handler.
pub enum RouteArg {
    /// Declares the content types this route accepts.
    Filter(ContentFilter),
    /// The route handler. Must come last.
    Handler(Handler),
}

impl From<ContentFilter> for RouteArg {
    fn from(filter: ContentFilter) -> Self {
        RouteArg::Filter(filter)
    }
}

impl From<Handler> for RouteArg {
    fn from(h: Handler) -> Self {
        RouteArg::Handler(h)
    }
}

/// Ordered argument sequence for a route registration.
///
/// Conversions cover the common call shapes: a bare handler, a content filter
/// followed by a handler, or an explicit [`RouteArg`] sequence.
pub struct RouteArgs(Vec<RouteArg>);

impl From<Handler> for RouteArgs {
    fn from(h: Handler) -> Self {
        RouteArgs(vec![RouteArg::Handler(h)])
    }
}

impl From<(ContentFilter, Handler)> for RouteArgs {
    fn from((filter, h): (ContentFilter, Handler)) -> Self {
        RouteArgs(vec![RouteArg::Filter(filter), RouteArg::Handler(h)])
    }
}

impl From<Vec<RouteArg>> for RouteArgs {
    fn from(args: Vec<RouteArg>) -> Self {
        RouteArgs(args)
    }
}

/// Error raised while running a registration routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Malformed arguments to a verb method (missing or misplaced handler,
    /// more than one content filter).
    InvalidRoute {
        /// The method being registered
        method: Method,
        /// The route pattern being registered
        path: String,
        /// What was wrong with the argument sequence
        reason: &'static str,
    },
    /// A content-type declaration named an unknown alias.
    ContentType(ContentTypeError),
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::InvalidRoute {
                method,
                path,
                reason,
            } => {
                write!(f, "invalid route registration {method} {path}: {reason}")
            }
            RegistrationError::ContentType(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RegistrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistrationError::ContentType(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContentTypeError> for RegistrationError {
    fn from(err: ContentTypeError) -> Self {
        RegistrationError::ContentType(err)
    }
}

#[derive(Clone)]
struct OperationRecord {
    method: Method,
    path: String,
    filter: Option<ContentFilter>,
    description: Option<String>,
}

/// Accumulates route registrations and compiles them into an [`ApiSpec`].
///
/// Each instance owns its state outright, so independent documents can be
/// built side by side in one process. Registration happens inside [`api`]
/// calls; [`spec`] derives the document from whatever has accumulated so far
/// and can be called any number of times.
///
/// [`api`]: ApiDoc::api
/// [`spec`]: ApiDoc::spec
///
/// ```
/// use routedoc::{handler, ApiDoc};
///
/// let mut doc = ApiDoc::default();
/// doc.api(|api| {
///     api.get("/pets/:id", handler(|| {}))?
///         .desc("Fetch one pet\nLooks the pet up by its id.");
///     Ok(())
/// })?;
/// let spec = doc.spec();
/// assert!(spec.paths.contains_key("/pets/:id"));
/// # Ok::<(), routedoc::RegistrationError>(())
/// ```
pub struct ApiDoc {
    meta: ProjectMeta,
    info: IndexMap<String, Value>,
    accept: Option<ContentFilter>,
    operations: Vec<OperationRecord>,
}

impl ApiDoc {
    /// Create a builder seeded with the given project metadata.
    pub fn new(meta: ProjectMeta) -> Self {
        ApiDoc {
            meta,
            info: IndexMap::new(),
            accept: None,
            operations: Vec::new(),
        }
    }

    /// Run a registration routine against this document.
    ///
    /// The routine receives an [`Api`] context and runs to completion before
    /// this returns. Calling `api` again adds to the accumulated state; info
    /// merges and accept declarations follow last-write-wins.
    pub fn api<F>(&mut self, routine: F) -> Result<(), RegistrationError>
    where
        F: FnOnce(&mut Api<'_>) -> Result<(), RegistrationError>,
    {
        let mut api = Api { doc: self };
        routine(&mut api)
    }

    /// Compile the document from the current state.
    ///
    /// Pure derivation: calling this twice without intervening registrations
    /// yields equal documents, and it never mutates the builder.
    pub fn spec(&self) -> ApiSpec {
        let mut info = IndexMap::new();
        info.insert("title".to_string(), Value::String(self.meta.name.clone()));
        info.insert(
            "version".to_string(),
            Value::String(self.meta.version.clone()),
        );
        for (key, value) in &self.info {
            info.insert(key.clone(), value.clone());
        }

        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        for record in &self.operations {
            let item = paths.entry(record.path.clone()).or_insert_with(|| PathItem {
                parameters: path_parameters(&record.path),
                operations: IndexMap::new(),
            });
            item.operations.insert(
                record.method.as_str().to_ascii_lowercase(),
                self.compile_operation(record),
            );
        }

        ApiSpec {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            paths,
        }
    }

    fn compile_operation(&self, record: &OperationRecord) -> Operation {
        let (summary, description) = split_description(record.description.as_deref());
        Operation {
            summary,
            description,
            request_body: self.compile_request_body(record),
        }
    }

    fn compile_request_body(&self, record: &OperationRecord) -> RequestBody {
        // Route filter wins over the application-wide default.
        let filter = record.filter.as_ref().or(self.accept.as_ref());
        let mimes = match filter {
            Some(filter) => filter.media_types(),
            None => Vec::new(),
        };
        if mimes.is_empty() {
            return RequestBody::permissive();
        }
        let description = format!(
            "The request body must have one of the following types: {}.",
            mimes.join(", ")
        );
        let content = mimes
            .into_iter()
            .map(|mime| (mime, MediaType::permissive()))
            .collect();
        RequestBody {
            description: Some(description),
            content,
        }
    }
}

impl Default for ApiDoc {
    fn default() -> Self {
        ApiDoc::new(ProjectMeta::default())
    }
}

/// Registration context handed to the routine passed to [`ApiDoc::api`].
pub struct Api<'a> {
    doc: &'a mut ApiDoc,
}

macro_rules! verb_method {
    ($name:ident, $method:expr) => {
        #[doc = concat!("Register a route for `", stringify!($name), "` requests.")]
        pub fn $name<A>(
            &mut self,
            path: &str,
            args: A,
        ) -> Result<OperationHandle<'_>, RegistrationError>
        where
            A: Into<RouteArgs>,
        {
            self.route($method, path, args)
        }
    };
}

impl Api<'_> {
    verb_method!(get, Method::GET);
    verb_method!(post, Method::POST);
    verb_method!(put, Method::PUT);
    verb_method!(patch, Method::PATCH);
    verb_method!(delete, Method::DELETE);
    verb_method!(head, Method::HEAD);
    verb_method!(options, Method::OPTIONS);
    verb_method!(trace, Method::TRACE);

    /// Register a route for an arbitrary method.
    ///
    /// `args` is an ordered sequence: zero or more modifiers (at most one
    /// content filter today) terminated by the handler. Re-registering a
    /// (path, method) pair replaces the earlier operation in place.
    pub fn route<A>(
        &mut self,
        method: Method,
        path: &str,
        args: A,
    ) -> Result<OperationHandle<'_>, RegistrationError>
    where
        A: Into<RouteArgs>,
    {
        let (filter, _handler) = split_args(args.into(), &method, path)?;
        debug!(method = %method, path, "registering route");
        let record = OperationRecord {
            method,
            path: path.to_string(),
            filter,
            description: None,
        };
        let index = match self
            .doc
            .operations
            .iter()
            .position(|r| r.path == record.path && r.method == record.method)
        {
            Some(i) => {
                self.doc.operations[i] = record;
                i
            }
            None => {
                self.doc.operations.push(record);
                self.doc.operations.len() - 1
            }
        };
        Ok(OperationHandle {
            record: &mut self.doc.operations[index],
        })
    }

    /// Shallow-merge extra fields into the document's `info` object.
    ///
    /// Accepts anything that serializes to a JSON object; the last write per
    /// key wins, including over the seeded `title`/`version` defaults.
    pub fn info<T: Serialize>(&mut self, partial: T) {
        match serde_json::to_value(partial) {
            Ok(Value::Object(map)) => {
                for (key, value) in map {
                    self.doc.info.insert(key, value);
                }
            }
            Ok(other) => {
                warn!(value = %other, "ignoring non-object info fragment");
            }
            Err(err) => {
                warn!(error = %err, "ignoring unserializable info fragment");
            }
        }
    }

    /// Declare the content types accepted by every route that carries no
    /// filter of its own.
    ///
    /// Applies to routes registered before and after this call alike, since
    /// resolution happens when the document is compiled. Aliases are still
    /// validated here, so mistakes surface at declaration time.
    pub fn accept<I, S>(&mut self, tokens: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.doc.accept = Some(content_type::accept(tokens)?);
        Ok(())
    }
}

/// Handle to a just-registered operation, for after-the-fact annotation.
pub struct OperationHandle<'a> {
    record: &'a mut OperationRecord,
}

impl OperationHandle<'_> {
    /// Attach a human-readable description.
    ///
    /// The first line becomes the operation's `summary`; any remaining lines
    /// become its `description`. Calling this again replaces the earlier text.
    pub fn desc(self, text: &str) -> Self {
        self.record.description = Some(text.to_string());
        self
    }
}

fn split_args(
    args: RouteArgs,
    method: &Method,
    path: &str,
) -> Result<(Option<ContentFilter>, Handler), RegistrationError> {
    let invalid = |reason| RegistrationError::InvalidRoute {
        method: method.clone(),
        path: path.to_string(),
        reason,
    };
    let mut args = args.0;
    let handler = match args.pop() {
        Some(RouteArg::Handler(h)) => h,
        Some(RouteArg::Filter(_)) => return Err(invalid("the handler must be the final argument")),
        None => return Err(invalid("a handler is required")),
    };
    let mut filter = None;
    for arg in args {
        match arg {
            RouteArg::Filter(f) => {
                if filter.replace(f).is_some() {
                    return Err(invalid("at most one content filter may be given"));
                }
            }
            RouteArg::Handler(_) => {
                return Err(invalid("only one handler may be given"));
            }
        }
    }
    Ok((filter, handler))
}

fn split_description(text: Option<&str>) -> (Option<String>, Option<String>) {
    let text = match text {
        Some(t) => t,
        None => return (None, None),
    };
    match text.split_once('\n') {
        Some((first, rest)) if !rest.is_empty() => {
            (Some(first.to_string()), Some(rest.to_string()))
        }
        Some((first, _)) => (Some(first.to_string()), None),
        None => (Some(text.to_string()), None),
    }
}

static PATH_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\)?:(\w+)").expect("path parameter pattern"));

/// Derive the path parameters declared by a route pattern.
///
/// Every maximal word run following an unescaped `:` is a parameter name;
/// names repeat in order of first appearance and duplicates collapse to one
/// entry.
pub fn path_parameters(pattern: &str) -> Vec<Parameter> {
    let mut params: Vec<Parameter> = Vec::new();
    for caps in PATH_PARAM_RE.captures_iter(pattern) {
        if caps.get(1).is_some() {
            continue;
        }
        let name = &caps[2];
        if params.iter().any(|p| p.name == name) {
            continue;
        }
        params.push(Parameter::path(name));
    }
    params
}
