//! # Role Resolution
//!
//! Resolves the caller's privilege tier, which selects the markup fraction
//! applied to supplier rates.
//!
//! ## Resolution Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Role Resolution (per request)                      │
//! │                                                                         │
//! │   1. Authenticated session role ── parseable? ──► USE IT               │
//! │           │                            │                                │
//! │           │                            └─ request sent a different     │
//! │           │                               role? → warn, ignore it      │
//! │           ▼ (absent / unparseable)                                      │
//! │   2. Query-string role ──────── parseable? ──► USE IT                  │
//! │           ▼ (absent / unparseable → warn if present)                    │
//! │   3. Header role ────────────── parseable? ──► USE IT                  │
//! │           ▼ (absent / unparseable → warn if present)                    │
//! │   4. GUEST (tier 1)                                                     │
//! │                                                                         │
//! │   An authenticated caller can NEVER escalate via query/header.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is total: bad input is discarded with a diagnostic, never an
//! error, and the chain continues to the next source.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use ts_rs::TS;

// =============================================================================
// Role
// =============================================================================

/// Privilege tier of the caller.
///
/// ## Why A Tier Number?
/// Tiers come from the partner/agency program: 1 is an anonymous guest,
/// higher tiers are negotiated accounts with their own markup fractions.
/// The tier is only ever used as a markup-table key, so it stays opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Role(u32);

impl Role {
    /// The anonymous guest tier. Every unresolvable request prices as guest.
    pub const GUEST: Role = Role(1);

    /// Creates a role from a raw tier number.
    ///
    /// Resolution never produces a tier below 1; this constructor is for
    /// trusted code paths (markup tables, tests).
    #[inline]
    pub const fn from_tier(tier: u32) -> Self {
        Role(tier)
    }

    /// Returns the raw tier number.
    #[inline]
    pub const fn tier(&self) -> u32 {
        self.0
    }

    /// Checks if this is the guest tier.
    #[inline]
    pub const fn is_guest(&self) -> bool {
        self.0 == Self::GUEST.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::GUEST
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the effective role for one request.
///
/// ## Arguments
/// * `session_role` - the `role` attribute of the authenticated session, if
///   a session exists. Sessions are platform-owned but the attribute is
///   stored as loose JSON and may arrive as a number or a numeric string.
/// * `query_role` - the raw `role` query-string parameter, if sent.
/// * `header_role` - the raw role header value, if sent (legacy channel).
///
/// ## Example
/// ```rust
/// use stayquote_core::role::{resolve_role, Role};
/// use serde_json::json;
///
/// // Authenticated: the session wins even when the query asks for more
/// let role = resolve_role(Some(&json!(2)), Some("7"), None);
/// assert_eq!(role, Role::from_tier(2));
///
/// // Anonymous: falls through to guest
/// assert_eq!(resolve_role(None, None, None), Role::GUEST);
/// ```
///
/// ## Rules
/// - A parseable session role always wins; a differing request role is
///   logged and ignored (privilege spoofing shows up in the logs, not in
///   the prices).
/// - Without a session, query precedes header.
/// - "Parseable" means a finite integer >= 1. Tier 0, negatives, floats
///   and junk strings are discarded with a warn diagnostic.
pub fn resolve_role(
    session_role: Option<&Value>,
    query_role: Option<&str>,
    header_role: Option<&str>,
) -> Role {
    let requested = query_role
        .and_then(parse_role_str)
        .or_else(|| header_role.and_then(parse_role_str));

    if let Some(value) = session_role {
        if let Some(session) = parse_role_value(value) {
            if let Some(asked) = requested {
                if asked != session {
                    warn!(
                        session = session.tier(),
                        requested = asked.tier(),
                        "Request role differs from session role, keeping session role"
                    );
                }
            }
            return session;
        }
        warn!(raw = %value, "Session role is unusable, falling back to request role");
    }

    if let Some(raw) = query_role {
        match parse_role_str(raw) {
            Some(role) => return role,
            None => warn!(raw = %raw, "Discarding invalid query-string role"),
        }
    }

    if let Some(raw) = header_role {
        match parse_role_str(raw) {
            Some(role) => return role,
            None => warn!(raw = %raw, "Discarding invalid header role"),
        }
    }

    Role::GUEST
}

/// Parses a role from a loose JSON value (number or numeric string).
fn parse_role_value(value: &Value) -> Option<Role> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .filter(|&tier| tier >= 1 && tier <= u32::MAX as u64)
            .map(|tier| Role(tier as u32)),
        Value::String(s) => parse_role_str(s),
        _ => None,
    }
}

/// Parses a role from a raw query/header string.
///
/// `u32::from_str` already rejects signs, decimals and junk; the only extra
/// rule is that tier 0 is not a role.
fn parse_role_str(raw: &str) -> Option<Role> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|&tier| tier >= 1)
        .map(Role)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_role_wins() {
        let role = resolve_role(Some(&json!(3)), None, None);
        assert_eq!(role, Role::from_tier(3));
    }

    /// A logged-in caller cannot escalate by sending a higher tier in the
    /// query string or header.
    #[test]
    fn test_session_role_beats_request_role() {
        let role = resolve_role(Some(&json!(2)), Some("7"), None);
        assert_eq!(role, Role::from_tier(2));

        let role = resolve_role(Some(&json!(2)), None, Some("9"));
        assert_eq!(role, Role::from_tier(2));

        // even when both channels agree on a different tier
        let role = resolve_role(Some(&json!(2)), Some("7"), Some("7"));
        assert_eq!(role, Role::from_tier(2));
    }

    #[test]
    fn test_session_role_as_numeric_string() {
        let role = resolve_role(Some(&json!("4")), None, None);
        assert_eq!(role, Role::from_tier(4));
    }

    #[test]
    fn test_query_precedes_header_without_session() {
        let role = resolve_role(None, Some("3"), Some("5"));
        assert_eq!(role, Role::from_tier(3));
    }

    #[test]
    fn test_header_used_when_query_invalid() {
        let role = resolve_role(None, Some("abc"), Some("5"));
        assert_eq!(role, Role::from_tier(5));
    }

    #[test]
    fn test_defaults_to_guest() {
        assert_eq!(resolve_role(None, None, None), Role::GUEST);
        assert!(resolve_role(None, None, None).is_guest());
    }

    #[test]
    fn test_invalid_values_are_discarded_not_defaulted() {
        // tier 0 and negatives are not roles
        assert_eq!(resolve_role(None, Some("0"), None), Role::GUEST);
        assert_eq!(resolve_role(None, Some("-2"), None), Role::GUEST);

        // floats and junk fall through
        assert_eq!(resolve_role(None, Some("2.5"), None), Role::GUEST);
        assert_eq!(resolve_role(None, Some("admin"), None), Role::GUEST);
        assert_eq!(resolve_role(None, Some(""), None), Role::GUEST);
    }

    #[test]
    fn test_unusable_session_falls_back_to_request() {
        // session exists but its role attribute is junk
        let role = resolve_role(Some(&json!("vip")), Some("3"), None);
        assert_eq!(role, Role::from_tier(3));

        let role = resolve_role(Some(&json!(null)), None, Some("2"));
        assert_eq!(role, Role::from_tier(2));

        // session tier 0 is as unusable as junk
        let role = resolve_role(Some(&json!(0)), Some("3"), None);
        assert_eq!(role, Role::from_tier(3));
    }

    #[test]
    fn test_non_integer_session_role_discarded() {
        let role = resolve_role(Some(&json!(2.5)), None, None);
        assert_eq!(role, Role::GUEST);

        let role = resolve_role(Some(&json!(-3)), None, None);
        assert_eq!(role, Role::GUEST);
    }

    #[test]
    fn test_whitespace_tolerated_in_request_channels() {
        assert_eq!(resolve_role(None, Some(" 4 "), None), Role::from_tier(4));
    }
}
