use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ClassHubError;

const MAX_CLASS_NAME_CHARS: usize = 100;
const MAX_TITLE_CHARS: usize = 200;
const MAX_DOCUMENT_LINK_CHARS: usize = 2048;

// 常见弱密码，忽略大小写比较
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "12345678",
    "123456789",
    "qwerty123",
    "abcd1234",
    "teacher123",
    "student123",
    "classhub1",
];

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
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

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 可选：特殊字符（增强安全性）
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    if COMMON_PASSWORDS
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 校验出生日期，格式 YYYY-MM-DD，且不能晚于今天
pub fn validate_birth_date(raw: &str) -> Result<NaiveDate, ClassHubError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")?;
    if date > chrono::Utc::now().date_naive() {
        return Err(ClassHubError::validation("Birth date cannot be in the future"));
    }
    Ok(date)
}

/// 班级名称去除首尾空白后不能为空
pub fn normalize_class_name(name: &str) -> Result<String, ClassHubError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ClassHubError::validation("Class name is required"));
    }
    if trimmed.chars().count() > MAX_CLASS_NAME_CHARS {
        return Err(ClassHubError::validation(format!(
            "Class name must be at most {MAX_CLASS_NAME_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// 邀请码去除空白并转为大写
pub fn normalize_class_code(code: &str) -> Result<String, ClassHubError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(ClassHubError::validation("Class code is required"));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// 必填文本字段，去除首尾空白后不能为空
pub fn require_text(field: &str, value: &str) -> Result<String, ClassHubError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClassHubError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// 标题：必填，最多 200 个字符
pub fn normalize_title(title: &str) -> Result<String, ClassHubError> {
    let title = require_text("Title", title)?;
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ClassHubError::validation(format!(
            "Title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(title)
}

/// 文档链接：必填，不含空白，最多 2048 个字符
pub fn normalize_document_link(link: &str) -> Result<String, ClassHubError> {
    let link = require_text("Document link", link)?;
    if link.chars().any(char::is_whitespace) {
        return Err(ClassHubError::validation("Document link must not contain whitespace"));
    }
    if link.chars().count() > MAX_DOCUMENT_LINK_CHARS {
        return Err(ClassHubError::validation(format!(
            "Document link must be at most {MAX_DOCUMENT_LINK_CHARS} characters"
        )));
    }
    Ok(link)
}

/// 成就进度为 0 到 100 的百分比
pub fn validate_progress(progress: i32) -> Result<i32, ClassHubError> {
    if !(0..=100).contains(&progress) {
        return Err(ClassHubError::validation("Progress must be between 0 and 100"));
    }
    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_lowercase() {
        let result = validate_password("ABCD1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("alice smith").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice@example").is_err());
    }

    #[test]
    fn test_birth_date() {
        assert_eq!(
            validate_birth_date("2001-09-30").unwrap(),
            NaiveDate::from_ymd_opt(2001, 9, 30).unwrap()
        );
        assert!(matches!(
            validate_birth_date("30/09/2001"),
            Err(ClassHubError::DateParse(_))
        ));
        assert!(matches!(
            validate_birth_date("2999-01-01"),
            Err(ClassHubError::Validation(_))
        ));
    }

    #[test]
    fn test_class_name_is_trimmed() {
        assert_eq!(normalize_class_name("  Algebra  ").unwrap(), "Algebra");
        assert!(matches!(
            normalize_class_name("   "),
            Err(ClassHubError::Validation(_))
        ));
        assert!(normalize_class_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_class_code_is_upper_cased() {
        assert_eq!(normalize_class_code(" ab12cd ").unwrap(), "AB12CD");
        assert!(normalize_class_code("").is_err());
    }

    #[test]
    fn test_required_text_fields() {
        assert_eq!(require_text("Description", "  notes ").unwrap(), "notes");
        assert!(require_text("Description", " \n ").is_err());
        assert!(normalize_title(&"t".repeat(201)).is_err());
        assert_eq!(normalize_title(" Week 1 ").unwrap(), "Week 1");
    }

    #[test]
    fn test_document_link_rules() {
        assert_eq!(
            normalize_document_link(" https://docs.example.com/a ").unwrap(),
            "https://docs.example.com/a"
        );
        assert!(normalize_document_link("").is_err());
        assert!(normalize_document_link("https://x.com/a b").is_err());
        assert!(normalize_document_link(&"a".repeat(2049)).is_err());
    }

    #[test]
    fn test_progress_range() {
        assert_eq!(validate_progress(0).unwrap(), 0);
        assert_eq!(validate_progress(100).unwrap(), 100);
        assert!(validate_progress(-1).is_err());
        assert!(validate_progress(101).is_err());
    }
}
