//! Identity

use rand::Rng;

/// Placeholder display name; there is no real identity system.
pub const GUEST_NAME: &str = "Guest User";

/// Placeholder contact email.
pub const GUEST_EMAIL: &str = "guest@example.com";

/// Device-scoped user profile.
///
/// Only the identifier is real; name and email are fixed placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Stable per-device identifier.
    pub uid: String,

    /// Display name.
    pub name: String,

    /// Contact email.
    pub email: String,
}

impl UserProfile {
    /// Build the guest profile around a device identifier.
    #[must_use]
    pub fn guest(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: GUEST_NAME.to_owned(),
            email: GUEST_EMAIL.to_owned(),
        }
    }
}

/// Generate a device token shaped `xxxx-xxxx-xxxx-xxxx`: four
/// hyphen-separated groups of four lowercase hex digits.
///
/// The token only needs to be stable and unique enough per device; it is
/// not a credential and need not be cryptographically strong.
pub fn device_token<R: Rng>(rng: &mut R) -> String {
    let mut token = String::with_capacity(19);

    for group in 0..4 {
        if group > 0 {
            token.push('-');
        }

        for _ in 0..4 {
            let digit = rng.gen_range(0..16_u32);
            token.push(char::from_digit(digit, 16).unwrap_or('0'));
        }
    }

    token
}
