//! Property-based tests for config validation and derived settings.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use slipway_cli::domain::config::{ProjectConfig, SlipwayConfig, valid_app_name};

// ============================================================================
// valid_app_name() property tests
// ============================================================================

proptest! {
    /// Everything the provider's naming rule allows is accepted.
    #[test]
    fn prop_wellformed_names_accepted(name in "[a-z][a-z0-9_]{0,15}") {
        prop_assert!(valid_app_name(&name), "rejected well-formed name: {name}");
    }

    /// Names longer than sixteen characters are rejected.
    #[test]
    fn prop_overlong_names_rejected(name in "[a-z][a-z0-9_]{16,24}") {
        prop_assert!(!valid_app_name(&name), "accepted overlong name: {name}");
    }

    /// Names must start with a lowercase letter.
    #[test]
    fn prop_bad_leading_char_rejected(name in "[0-9_][a-z0-9_]{0,10}") {
        prop_assert!(!valid_app_name(&name), "accepted bad leading char: {name}");
    }

    /// Uppercase is never allowed.
    #[test]
    fn prop_uppercase_rejected(name in "[A-Z][a-zA-Z0-9]{0,10}") {
        prop_assert!(!valid_app_name(&name), "accepted uppercase name: {name}");
    }

    /// Hyphens are never allowed.
    #[test]
    fn prop_hyphens_rejected(left in "[a-z]{1,5}", right in "[a-z]{1,5}") {
        let name = format!("{left}-{right}");
        prop_assert!(!valid_app_name(&name), "accepted hyphenated name: {name}");
    }
}

// ============================================================================
// Derived-settings property tests
// ============================================================================

fn config_for(username: &str, project: &str) -> SlipwayConfig {
    SlipwayConfig {
        username: username.to_string(),
        password: "pw".to_string(),
        project: ProjectConfig {
            name: project.to_string(),
            ..ProjectConfig::default()
        },
        ..SlipwayConfig::default()
    }
}

proptest! {
    /// The git site always serves `git.` under the primary domain, whether
    /// that domain is explicit or derived from the username.
    #[test]
    fn prop_git_subdomain_prefixes_primary_domain(
        username in "[a-z][a-z0-9]{0,9}",
        domain in proptest::option::of("[a-z]{1,10}\\.[a-z]{2,3}"),
    ) {
        let mut cfg = config_for(&username, "blog");
        if let Some(domain) = &domain {
            cfg.primary_domain = domain.clone();
        }
        let expected = domain.unwrap_or_else(|| format!("{username}.webfactional.com"));
        prop_assert_eq!(cfg.git_subdomain(), format!("git.{expected}"));
    }

    /// The SSH target is always `user@host`, with the host derived from the
    /// username when unset.
    #[test]
    fn prop_ssh_target_shape(username in "[a-z][a-z0-9]{0,9}") {
        let cfg = config_for(&username, "blog");
        prop_assert_eq!(
            cfg.ssh_target(),
            format!("{username}@{username}.webfactional.com")
        );
    }

    /// App names derived from a conforming project name conform themselves,
    /// so a minimal config always validates.
    #[test]
    fn prop_derived_app_names_conform(
        username in "[a-z][a-z0-9]{0,9}",
        project in "[a-z][a-z0-9_]{0,8}",
    ) {
        let cfg = config_for(&username, &project);
        prop_assert!(valid_app_name(&cfg.main_app()), "main: {}", cfg.main_app());
        prop_assert!(valid_app_name(&cfg.static_app()), "static: {}", cfg.static_app());
        prop_assert!(cfg.validate().is_ok());
    }

    /// The git remote URL always points at the hosted bare repository under
    /// the git app, addressed through the SSH target.
    #[test]
    fn prop_git_remote_url_shape(
        username in "[a-z][a-z0-9]{0,9}",
        project in "[a-z][a-z0-9_]{0,8}",
    ) {
        let cfg = config_for(&username, &project);
        let url = cfg.git_remote_url();
        prop_assert!(url.starts_with(&format!("{username}@")), "url: {url}");
        prop_assert!(url.contains(":/home/"), "url: {url}");
        prop_assert!(url.ends_with(&format!("/repos/{project}.git")), "url: {url}");
    }
}
