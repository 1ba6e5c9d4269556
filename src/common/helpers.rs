// Helper functions for safe logging and text handling

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 {
            // chars, not bytes: the local part may start multibyte
            if let Some(first) = parts[0].chars().next() {
                return format!("{}***@{}", first, parts[1]);
            }
        }
    }
    "***@***.***".to_string()
}

/// Truncates preview text to `max` characters, appending an ellipsis when
/// anything was cut. Splits on a char boundary.
pub fn truncate_preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut)
}
