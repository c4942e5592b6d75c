use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static DOCUMENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("Invalid document id regex"));

pub const MAX_PASSWORD_LENGTH: usize = 128;

/// 邮箱统一为去空白的小写形式
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_document_id(id: &str) -> Result<(), &'static str> {
    if !DOCUMENT_ID_RE.is_match(id) {
        return Err("Identifier must be 1-64 letters, digits, underscores or hyphens");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合策略
///
/// 只要求最小长度（按字符计），不限制字符种类。
pub fn validate_password(password: &str, min_length: usize) -> PasswordValidationResult {
    let mut errors = Vec::new();
    let length = password.chars().count();

    if length < min_length {
        errors.push("Password is too short");
    }

    if length > MAX_PASSWORD_LENGTH {
        errors.push("Password is too long");
    }

    if !password.is_empty() && password.trim().is_empty() {
        errors.push("Password must not be blank");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("abcdef", 6).is_valid);
        assert!(validate_password("élève1", 6).is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("abc12", 6);
        assert!(!result.is_valid);
        assert!(result.errors.contains(&"Password is too short"));
    }

    #[test]
    fn test_blank_password() {
        let result = validate_password("        ", 6);
        assert!(!result.is_valid);
        assert!(result.errors.contains(&"Password must not be blank"));
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("etudiant@univ.fr").is_ok());
        assert!(validate_email("etudiant@univ").is_err());
        assert!(validate_email("pas un email").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Awa.Diop@Univ.FR "), "awa.diop@univ.fr");
    }

    #[test]
    fn test_document_id() {
        assert!(validate_document_id("3f2a-11_b").is_ok());
        assert!(validate_document_id("").is_err());
        assert!(validate_document_id("../etc/passwd").is_err());
    }
}
