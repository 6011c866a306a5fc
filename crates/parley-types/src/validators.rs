use std::sync::LazyLock;

use regex::Regex;

/// Mainland mobile numbers: eleven ASCII digits, `1` then `3`..=`9`.
pub static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("phone pattern compiles"));

pub static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn validate_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn validate_password_match(password: &str, confirmPassword: &str) -> bool {
    password == confirmPassword
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_known_numbers() {
        assert!(validate_phone("13800138000"));
        assert!(validate_phone("19912345678"));
    }

    #[test]
    fn rejects_malformed_numbers() {
        for phone in [
            "",
            "1380013800",
            "138001380000",
            "12800138000",
            "10800138000",
            "23800138000",
            "1380013800a",
            "+8613800138000",
            " 13800138000",
            "13800138000\n",
            "1３800138000",
        ] {
            assert!(!validate_phone(phone), "{phone:?} should be rejected");
        }
    }

    #[test]
    fn email_examples() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("first.last@mail.example.org"));
        assert!(!validate_email("a.b.com"));
        assert!(!validate_email("a@bcom"));
        assert!(!validate_email("a@.com."));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("a@@b.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn password_match_is_exact() {
        assert!(validate_password_match("", ""));
        assert!(!validate_password_match("secret", "secret "));
        assert!(!validate_password_match("Secret", "secret"));
    }

    proptest! {
        #[test]
        fn every_accepted_leading_digit_passes(second in 3u8..=9, rest in "[0-9]{9}") {
            let phone = format!("1{second}{rest}");
            prop_assert!(validate_phone(&phone));
        }

        #[test]
        fn disallowed_second_digit_fails(second in 0u8..=2, rest in "[0-9]{9}") {
            let phone = format!("1{second}{rest}");
            prop_assert!(!validate_phone(&phone));
        }

        #[test]
        fn wrong_length_fails(digits in "1[3-9][0-9]{0,8}|1[3-9][0-9]{10,14}") {
            prop_assert!(!validate_phone(&digits));
        }

        #[test]
        fn emails_without_at_fail(email in "[^@]*") {
            prop_assert!(!validate_email(&email));
        }

        #[test]
        fn emails_without_dot_after_at_fail(local in "[a-z]{1,8}", domain in "[a-z]{1,8}") {
            let email = format!("{local}@{domain}");
            prop_assert!(!validate_email(&email));
        }

        #[test]
        fn password_matches_itself(password in ".*") {
            prop_assert!(validate_password_match(&password, &password));
        }

        #[test]
        fn different_passwords_never_match(a in ".*", b in ".*") {
            prop_assume!(a != b);
            prop_assert!(!validate_password_match(&a, &b));
        }
    }
}
