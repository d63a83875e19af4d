//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_API_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._\-]{8,512}$").unwrap());
static RE_HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://[^\s/?#]+(/\S*)?$").unwrap());
static RE_MODEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._:\-]+(/[A-Za-z0-9._:\-]+)*$").unwrap());
static RE_FONT_FILE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.(ttf|otf)$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "OPENROUTER_API_KEY" => {
            if !value.is_empty() && !RE_API_KEY.is_match(value) {
                return Err("invalid API key format".into());
            }
        }
        "COPY_ENDPOINT" => {
            if !RE_HTTP_URL.is_match(value) {
                return Err("must be an http(s) URL".into());
            }
        }
        "COPY_MODEL" => {
            if !RE_MODEL.is_match(value) {
                return Err("invalid model id (expected e.g. 'vendor/model')".into());
            }
        }
        "COPY_TIMEOUT_SECS" => validate_int_range(value, 1, 120)?,
        "QR_OUTPUT_DIR" => {
            if value.trim().is_empty() || value.contains('\0') {
                return Err("must be a directory path".into());
            }
        }
        "QR_FONT_REGULAR" | "QR_FONT_BOLD" => {
            if !value.is_empty() && !RE_FONT_FILE.is_match(value) {
                return Err("must be a .ttf or .otf file".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key() {
        assert!(validate_setting("OPENROUTER_API_KEY", "").is_ok());
        assert!(validate_setting("OPENROUTER_API_KEY", "sk-or-v1-0123456789abcdef").is_ok());
        assert!(validate_setting("OPENROUTER_API_KEY", "has space inside").is_err());
        assert!(validate_setting("OPENROUTER_API_KEY", "short").is_err());
    }

    #[test]
    fn endpoint() {
        assert!(validate_setting("COPY_ENDPOINT", "https://openrouter.ai/api/v1/chat/completions").is_ok());
        assert!(validate_setting("COPY_ENDPOINT", "http://127.0.0.1:8080").is_ok());
        assert!(validate_setting("COPY_ENDPOINT", "ftp://example.com").is_err());
        assert!(validate_setting("COPY_ENDPOINT", "openrouter.ai").is_err());
    }

    #[test]
    fn model() {
        assert!(validate_setting("COPY_MODEL", "openrouter/free").is_ok());
        assert!(validate_setting("COPY_MODEL", "meta-llama/llama-3.1-8b-instruct:free").is_ok());
        assert!(validate_setting("COPY_MODEL", "bad model").is_err());
        assert!(validate_setting("COPY_MODEL", "").is_err());
    }

    #[test]
    fn timeout_range() {
        assert!(validate_setting("COPY_TIMEOUT_SECS", "1").is_ok());
        assert!(validate_setting("COPY_TIMEOUT_SECS", "120").is_ok());
        assert_eq!(
            validate_setting("COPY_TIMEOUT_SECS", "0").unwrap_err(),
            "must be between 1 and 120"
        );
        assert_eq!(
            validate_setting("COPY_TIMEOUT_SECS", "abc").unwrap_err(),
            "must be an integer"
        );
    }

    #[test]
    fn font_paths() {
        assert!(validate_setting("QR_FONT_BOLD", "").is_ok());
        assert!(validate_setting("QR_FONT_BOLD", "/fonts/Inter-Bold.TTF").is_ok());
        assert!(validate_setting("QR_FONT_REGULAR", "/fonts/Inter.woff2").is_err());
    }

    #[test]
    fn unknown_keys_pass() {
        assert!(validate_setting("SOMETHING_ELSE", "anything").is_ok());
    }
}
