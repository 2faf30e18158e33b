/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use tracing_subscriber::EnvFilter;

/// Toggle-flow diagnostics are for development; release builds only keep warnings.
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    }
}

pub fn env_filter(directive: Option<&str>) -> EnvFilter {
    let directive = directive
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(default_filter());
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(default_filter()))
}

/// Installs the global fmt subscriber. Calling it twice is harmless.
pub fn init_tracing(directive: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_directive_falls_back() {
        let fallback = EnvFilter::new(default_filter()).to_string();
        assert_eq!(env_filter(Some("corgi_core=notalevel")).to_string(), fallback);
        assert_eq!(env_filter(Some("  ")).to_string(), fallback);
        assert_eq!(env_filter(None).to_string(), fallback);
    }

    #[test]
    fn explicit_directive_is_used() {
        let filter = env_filter(Some("corgi_core=trace"));
        assert!(filter.to_string().contains("corgi_core=trace"));
    }
}
