//! Remote method names the CLI calls on the control plane.
//!
//! The capability gate checks these against what `system.listMethods`
//! advertises before any call is forwarded.

pub const LOGIN: &str = "login";
pub const LIST_METHODS: &str = "system.listMethods";
pub const LIST_APPS: &str = "list_apps";
pub const CREATE_APP: &str = "create_app";
pub const DELETE_APP: &str = "delete_app";
pub const LIST_WEBSITES: &str = "list_websites";
pub const CREATE_DOMAIN: &str = "create_domain";
pub const CREATE_WEBSITE: &str = "create_website";

/// Methods every provisioning run depends on; `check` verifies these are
/// advertised before any mutation is attempted.
pub const REQUIRED: &[&str] = &[
    LIST_APPS,
    CREATE_APP,
    DELETE_APP,
    LIST_WEBSITES,
    CREATE_DOMAIN,
    CREATE_WEBSITE,
];
