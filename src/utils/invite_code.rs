use rand::Rng;

/// Allowed characters for invite codes - excludes I, O, 0, 1 for readability
pub const INVITE_CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
/// Length of generated invite codes
pub const INVITE_CODE_LENGTH: usize = 8;

/// Generate a short, readable invite code (8 upper-case alphanumeric characters)
pub fn generate_invite_code() -> String {
    let mut rng = rand::rng();
    (0..INVITE_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..INVITE_CODE_CHARSET.len());
            INVITE_CODE_CHARSET[idx] as char
        })
        .collect()
}

/// Canonical form used as the code index key
pub fn normalize_invite_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
