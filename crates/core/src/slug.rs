//! URL-safe slug validation for product lookup paths.

/// Check that a slug is non-empty, lowercase ASCII alphanumeric with
/// single-character hyphen separators, and safe to appear in a URL path.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("Slug must not be empty".to_string());
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err("Slug must not start or end with a hyphen".to_string());
    }
    if slug.contains("--") {
        return Err("Slug must not contain consecutive hyphens".to_string());
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(format!(
            "Slug may only contain lowercase letters, digits, and hyphens, got '{slug}'"
        ));
    }
    Ok(())
}
