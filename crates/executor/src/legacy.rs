//! Legacy operation names.
//!
//! Old names stay callable on [`Client`](crate::Client) as `#[deprecated]`
//! wrappers. Each call logs a warning on the `odoo::deprecated` target and
//! delegates to the current operation.

use tracing::warn;

/// `(old name, current name)` pairs.
pub const LEGACY_ALIASES: &[(&str, &str)] = &[("get_dataset", "dataset"), ("info", "session_info")];

/// Current name of a legacy operation.
pub fn resolve_alias(old: &str) -> Option<&'static str> {
    LEGACY_ALIASES
        .iter()
        .find(|(name, _)| *name == old)
        .map(|(_, new)| *new)
}

pub(crate) fn warn_deprecated(old: &'static str) {
    let new = resolve_alias(old).unwrap_or("<removed>");
    warn!(
        target: "odoo::deprecated",
        old,
        new,
        "'{}' is deprecated, use '{}' instead",
        old,
        new
    );
}
