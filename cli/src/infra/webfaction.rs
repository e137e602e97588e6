//! `WebfactionClient` — the control-plane implementation of `ControlPlane`.
//!
//! The client logs in lazily: the first checked call performs `login` plus
//! `system.listMethods` and memoizes the session token and the capability
//! snapshot for the life of the process. Every subsequent call reuses the
//! snapshot with no extra round-trips. Methods the server does not advertise
//! are refused locally, before any request is sent.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::application::ports::ControlPlane;
use crate::domain::config::SlipwayConfig;
use crate::domain::error::ApiError;
use crate::infra::xmlrpc::{HttpTransport, RpcTransport};
use wf_api::{AppMount, Application, CodecError, Response, Value, Website, methods};

/// Memoized login state: the token injected into every call and the method
/// names the server advertises.
struct SessionState {
    token: String,
    methods: BTreeSet<String>,
}

/// Control-plane client, generic over the transport for testability.
pub struct WebfactionClient<T: RpcTransport> {
    transport: T,
    username: String,
    password: String,
    session: OnceLock<SessionState>,
}

impl WebfactionClient<HttpTransport> {
    /// Client for the endpoint and account in `config`.
    #[must_use]
    pub fn from_config(config: &SlipwayConfig) -> Self {
        Self::new(
            HttpTransport::new(config.api_url.clone()),
            config.username.clone(),
            config.password.clone(),
        )
    }
}

impl<T: RpcTransport> WebfactionClient<T> {
    #[must_use]
    pub fn new(transport: T, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            transport,
            username: username.into(),
            password: password.into(),
            session: OnceLock::new(),
        }
    }

    /// Session state, established on first use.
    fn session(&self) -> Result<&SessionState, ApiError> {
        if let Some(state) = self.session.get() {
            return Ok(state);
        }
        let state = self.establish_session()?;
        // Single-threaded callers cannot race here; get_or_init keeps the
        // first stored state regardless.
        Ok(self.session.get_or_init(|| state))
    }

    fn establish_session(&self) -> Result<SessionState, ApiError> {
        let login = self.transport.call(
            methods::LOGIN,
            &[
                Value::from(self.username.as_str()),
                Value::from(self.password.as_str()),
            ],
        )?;
        let token = match login {
            Response::Fault(fault) => return Err(ApiError::Authentication { fault }),
            Response::Success(value) => extract_token(&value).ok_or(ApiError::MalformedLogin)?,
        };

        let advertised = match self.transport.call(methods::LIST_METHODS, &[])? {
            Response::Fault(fault) => {
                return Err(ApiError::Fault {
                    method: methods::LIST_METHODS.to_string(),
                    fault,
                });
            }
            Response::Success(value) => value
                .as_array()
                .unwrap_or(&[])
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
        };

        Ok(SessionState {
            token,
            methods: advertised,
        })
    }

    /// The checked call every typed operation goes through: ensure the
    /// session, refuse unadvertised methods without forwarding anything,
    /// inject the token as the first argument, surface faults typed.
    fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value, ApiError> {
        let session = self.session()?;
        if !session.methods.contains(method) {
            return Err(ApiError::Unsupported {
                method: method.to_string(),
            });
        }
        let mut full = Vec::with_capacity(params.len() + 1);
        full.push(Value::from(session.token.as_str()));
        full.extend(params);
        match self.transport.call(method, &full)? {
            Response::Success(value) => Ok(value),
            Response::Fault(fault) => Err(ApiError::Fault {
                method: method.to_string(),
                fault,
            }),
        }
    }
}

/// `login` returns `[token, account-struct]`; some deployments return the
/// bare token string.
fn extract_token(value: &Value) -> Option<String> {
    match value {
        Value::Str(token) => Some(token.clone()),
        Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

fn as_listing(method: &'static str, value: Value) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(ApiError::Decode(CodecError::WrongType {
            record: method,
            field: "result",
        })),
    }
}

impl<T: RpcTransport> ControlPlane for WebfactionClient<T> {
    fn list_apps(&self) -> Result<Vec<Application>, ApiError> {
        let listing = self.invoke(methods::LIST_APPS, Vec::new())?;
        as_listing(methods::LIST_APPS, listing)?
            .iter()
            .map(|item| Application::from_value(item).map_err(ApiError::from))
            .collect()
    }

    fn create_app(&self, name: &str, kind: &str, extra: &str) -> Result<Application, ApiError> {
        let created = self.invoke(
            methods::CREATE_APP,
            vec![
                Value::from(name),
                Value::from(kind),
                Value::from(false),
                Value::from(extra),
            ],
        )?;
        Application::from_value(&created).map_err(ApiError::from)
    }

    fn delete_app(&self, name: &str) -> Result<(), ApiError> {
        self.invoke(methods::DELETE_APP, vec![Value::from(name)])?;
        Ok(())
    }

    fn list_websites(&self) -> Result<Vec<Website>, ApiError> {
        let listing = self.invoke(methods::LIST_WEBSITES, Vec::new())?;
        as_listing(methods::LIST_WEBSITES, listing)?
            .iter()
            .map(|item| Website::from_value(item).map_err(ApiError::from))
            .collect()
    }

    fn create_domain(&self, domain: &str, subdomain: &str) -> Result<(), ApiError> {
        self.invoke(
            methods::CREATE_DOMAIN,
            vec![Value::from(domain), Value::from(subdomain)],
        )?;
        Ok(())
    }

    fn create_website(
        &self,
        name: &str,
        ip: &str,
        https: bool,
        domains: &[String],
        mounts: &[AppMount],
    ) -> Result<Website, ApiError> {
        let mut params = vec![
            Value::from(name),
            Value::from(ip),
            Value::from(https),
            Value::from(domains.to_vec()),
        ];
        // The provider takes each mount as its own trailing positional
        // argument, not as one list of pairs.
        params.extend(mounts.iter().map(AppMount::to_value));
        let created = self.invoke(methods::CREATE_WEBSITE, params)?;
        Website::from_value(&created).map_err(ApiError::from)
    }

    fn advertised_methods(&self) -> Result<Vec<String>, ApiError> {
        Ok(self.session()?.methods.iter().cloned().collect())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
