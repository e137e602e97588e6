//! Wire model for WebFaction-style hosting control planes.
//!
//! The control plane speaks XML-RPC over HTTPS. This crate owns the value
//! tree, the call/response codec, and the typed resource records the CLI
//! works with. No I/O lives here — transports belong to the caller.

pub mod codec;
pub mod methods;
pub mod types;
pub mod value;

pub use codec::{CodecError, Fault, Response, decode_response, encode_call};
pub use types::{AppMount, Application, Website};
pub use value::Value;
