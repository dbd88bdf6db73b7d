//! Session-expiry record and the notice banner it drives.

/// Storage key holding the epoch-millisecond expiry of the last issued
/// session, written on successful login and read once at next startup.
pub const TOKEN_EXPIRATION_KEY: &str = "tokenExpiration";

/// The "your session has expired" banner, hidden until the stored expiry
/// is found to be in the past.
#[derive(Debug, Clone, Default)]
pub struct NoticeBanner {
    pub visible: bool,
}

impl NoticeBanner {
    pub fn hidden() -> Self {
        Self::default()
    }
}
