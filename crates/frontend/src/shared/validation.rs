//! Form field rules shared by the auth and profile pages.

use super::error::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    let domain_ok = domain
        .split_once('.')
        .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
        .unwrap_or(false);
    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Mainland mobile number: 11 digits starting with `1[3-9]`.
pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    let bytes = mobile.as_bytes();
    let ok = bytes.len() == 11
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1]);
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidMobile)
    }
}

pub fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCode)
    }
}

pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    require(password, "password")?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Medium => "Medium",
            PasswordStrength::Strong => "Strong",
        }
    }

    /// Filled segments of a three-part meter.
    pub fn level(&self) -> usize {
        *self as usize + 1
    }
}

/// One point each for length >= 8, mixed case, digits and symbols.
pub fn password_strength(password: &str) -> PasswordStrength {
    let mut score = 0;
    if password.chars().count() >= 8 {
        score += 1;
    }
    if password.chars().any(char::is_lowercase) && password.chars().any(char::is_uppercase) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 1;
    }
    match score {
        0..=1 => PasswordStrength::Weak,
        2..=3 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(validate_email("ops@example.com").is_ok());
        assert!(validate_email(" ops@example.co.uk ").is_ok());
        for bad in ["", "ops", "@example.com", "ops@", "ops@example", "o ps@example.com", "a@b@c.d"] {
            assert_eq!(validate_email(bad), Err(ValidationError::InvalidEmail), "{}", bad);
        }
    }

    #[test]
    fn mobiles() {
        assert!(validate_mobile("13800138000").is_ok());
        assert!(validate_mobile("19912345678").is_ok());
        assert!(validate_mobile("12800138000").is_err());
        assert!(validate_mobile("1380013800").is_err());
        assert!(validate_mobile("1380013800a").is_err());
    }

    #[test]
    fn codes() {
        assert!(validate_code("012345").is_ok());
        assert!(validate_code("12345").is_err());
        assert!(validate_code("12345x").is_err());
    }

    #[test]
    fn new_password_rules_apply_in_order() {
        assert_eq!(validate_new_password("", ""), Err(ValidationError::Required("password")));
        assert_eq!(
            validate_new_password("abc", "abc"),
            Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN))
        );
        assert_eq!(
            validate_new_password("abcdef", "abcdeg"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_new_password("abcdef", "abcdef").is_ok());
    }

    #[test]
    fn strength_grows_with_variety() {
        assert_eq!(password_strength("abc"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdefgh"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdefg1"), PasswordStrength::Medium);
        assert_eq!(password_strength("Abcdefg1!"), PasswordStrength::Strong);
        assert_eq!(PasswordStrength::Strong.level(), 3);
    }
}
