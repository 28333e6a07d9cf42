//! Feature flag handling for the Shield Support backend.
//!
//! Collaborators are gated twice: at compile time via cargo features on the
//! backend crate, and at runtime via the `use_*` flags in `AppConfig`. This
//! module covers the runtime half.

use shield_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// A feature counts as enabled when its `use_*` flag is set and its
/// configuration section is present.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Google Calendar collaborator is enabled at runtime.
pub fn is_gcal_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_gcal, config.gcal.as_ref())
}

/// Check if the mailer collaborator is enabled at runtime.
pub fn is_mailer_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_mailer, config.mailer.as_ref())
}
