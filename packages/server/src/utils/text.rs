/// Maximum number of characters of a secret shown in logs.
const SECRET_PREVIEW_LENGTH: usize = 8;

/// Truncate a secret (token, client secret) for logging. At most the first
/// eight characters are ever emitted, followed by an ellipsis marker.
pub fn secret_preview(secret: &str) -> String {
    let prefix: String = secret.chars().take(SECRET_PREVIEW_LENGTH).collect();
    if secret.chars().count() > SECRET_PREVIEW_LENGTH {
        format!("{prefix}...")
    } else {
        prefix
    }
}
