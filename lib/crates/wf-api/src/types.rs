//! Typed records extracted from control-plane listings.
//!
//! Listings arrive as arrays of structs with provider-defined member names
//! (`type`, `extra_info`, `site_apps`). Extraction is tolerant of members
//! the provider omits and strict about members with the wrong shape.

use serde::{Deserialize, Serialize};

use crate::codec::CodecError;
use crate::value::Value;

/// A hosted application slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "extra_info", default)]
    pub extra: String,
}

impl Application {
    pub fn from_value(value: &Value) -> Result<Self, CodecError> {
        Ok(Self {
            name: require_str(value, "application", "name")?.to_owned(),
            kind: require_str(value, "application", "type")?.to_owned(),
            extra: optional_str(value, "application", "extra_info")?,
        })
    }
}

/// A website record: an IP endpoint serving a set of subdomains, with
/// applications mounted at URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub name: String,
    pub ip: String,
    #[serde(default)]
    pub https: bool,
    #[serde(default)]
    pub subdomains: Vec<String>,
    #[serde(rename = "site_apps", default)]
    pub mounts: Vec<AppMount>,
}

impl Website {
    pub fn from_value(value: &Value) -> Result<Self, CodecError> {
        let subdomains = match value.get("subdomains") {
            None => Vec::new(),
            Some(list) => list
                .as_array()
                .ok_or(CodecError::WrongType {
                    record: "website",
                    field: "subdomains",
                })?
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_owned)
                        .ok_or(CodecError::WrongType {
                            record: "website",
                            field: "subdomains",
                        })
                })
                .collect::<Result<_, _>>()?,
        };
        let mounts = match value.get("site_apps") {
            None => Vec::new(),
            Some(list) => list
                .as_array()
                .ok_or(CodecError::WrongType {
                    record: "website",
                    field: "site_apps",
                })?
                .iter()
                .map(AppMount::from_value)
                .collect::<Result<_, _>>()?,
        };
        let https = match value.get("https") {
            None => false,
            Some(flag) => flag.as_bool().ok_or(CodecError::WrongType {
                record: "website",
                field: "https",
            })?,
        };
        Ok(Self {
            name: require_str(value, "website", "name")?.to_owned(),
            ip: require_str(value, "website", "ip")?.to_owned(),
            https,
            subdomains,
            mounts,
        })
    }

    /// Whether `domain` appears in this site's subdomain set.
    #[must_use]
    pub fn serves(&self, domain: &str) -> bool {
        self.subdomains.iter().any(|d| d == domain)
    }
}

/// An application mounted at a URL path, wire shape `[app, path]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMount {
    pub app: String,
    pub path: String,
}

impl AppMount {
    #[must_use]
    pub fn new(app: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            path: path.into(),
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, CodecError> {
        let pair = value.as_array().ok_or(CodecError::WrongType {
            record: "website",
            field: "site_apps",
        })?;
        match pair {
            [app, path, ..] => Ok(Self {
                app: app
                    .as_str()
                    .ok_or(CodecError::WrongType {
                        record: "website",
                        field: "site_apps",
                    })?
                    .to_owned(),
                path: path
                    .as_str()
                    .ok_or(CodecError::WrongType {
                        record: "website",
                        field: "site_apps",
                    })?
                    .to_owned(),
            }),
            _ => Err(CodecError::WrongType {
                record: "website",
                field: "site_apps",
            }),
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(vec![
            Value::from(self.app.as_str()),
            Value::from(self.path.as_str()),
        ])
    }
}

fn require_str<'a>(
    value: &'a Value,
    record: &'static str,
    field: &'static str,
) -> Result<&'a str, CodecError> {
    value
        .get(field)
        .ok_or(CodecError::MissingField { record, field })?
        .as_str()
        .ok_or(CodecError::WrongType { record, field })
}

fn optional_str(
    value: &Value,
    record: &'static str,
    field: &'static str,
) -> Result<String, CodecError> {
    match value.get(field) {
        None => Ok(String::new()),
        Some(v) => v
            .as_str()
            .map(str::to_owned)
            .ok_or(CodecError::WrongType { record, field }),
    }
}
