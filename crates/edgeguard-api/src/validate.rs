//! Pre-flight payload validation.
//!
//! Checks are purely syntactic (closed sets, small integer flags, length
//! ceilings). A failure short-circuits before the transport is touched and
//! names the offending wire field. The server stays the source of truth.

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::error::Error;

/// Implemented by every request payload sent with a body.
pub trait Validate {
    fn validate(&self) -> Result<(), Error>;
}

// ── Closed sets ──────────────────────────────────────────────────────

/// Certificate source for a resource or alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum SslType {
    /// Customer-supplied certificate and key.
    Custom,
    /// Let's Encrypt.
    Le,
}

/// Accepted entries of `tls_enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, VariantNames)]
pub enum TlsVersion {
    #[strum(serialize = "1")]
    Tls10,
    #[strum(serialize = "1.1")]
    Tls11,
    #[strum(serialize = "1.2")]
    Tls12,
    #[strum(serialize = "1.3")]
    Tls13,
}

/// Load-balancing role of an origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum OriginMode {
    Primary,
    Backup,
}

// ── Limits ───────────────────────────────────────────────────────────

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_COMMENT_LEN: usize = 255;
pub const MAX_HEADER_KEY_LEN: usize = 255;
pub const MAX_HEADER_VALUE_LEN: usize = 1024;

/// Highest accepted `service_geoip_mode` (0 off, 1 allow-list, 2 deny-list).
pub const MAX_GEOIP_MODE: u8 = 2;

// ── Rule helpers ─────────────────────────────────────────────────────

pub(crate) fn one_of<E>(field: &str, value: &str) -> Result<(), Error>
where
    E: FromStr + VariantNames,
{
    value.parse::<E>().map(|_| ()).map_err(|_| {
        Error::invalid_argument(field, format!("must be one of {}", E::VARIANTS.join(", ")))
    })
}

pub(crate) fn flag(field: &str, value: u8, max: u8) -> Result<(), Error> {
    if value <= max {
        Ok(())
    } else {
        let allowed: Vec<String> = (0..=max).map(|v| v.to_string()).collect();
        Err(Error::invalid_argument(
            field,
            format!("must be one of {} (got {value})", allowed.join(", ")),
        ))
    }
}

pub(crate) fn max_len(field: &str, value: &str, max: usize) -> Result<(), Error> {
    let len = value.chars().count();
    if len <= max {
        Ok(())
    } else {
        Err(Error::invalid_argument(
            field,
            format!("must be at most {max} characters (got {len})"),
        ))
    }
}

pub(crate) fn not_empty(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        Err(Error::invalid_argument(field, "cannot be empty"))
    } else {
        Ok(())
    }
}

/// Apply `check` to an optional field.
pub(crate) fn opt<T: ?Sized>(
    value: Option<&T>,
    check: impl FnOnce(&T) -> Result<(), Error>,
) -> Result<(), Error> {
    value.map_or(Ok(()), check)
}
