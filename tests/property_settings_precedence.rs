use influencerflow::infrastructure::config::{ConfigError, FieldKind};
use influencerflow::{LoadError, SettingsLoader};
use proptest::prelude::*;

mod common;
use common::{vars_with, write_env_file};

/// Values dotenvy reads back verbatim when single-quoted
fn plain_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./:-]{1,24}"
}

proptest! {
    /// Property: an environment value always beats the override file
    #[test]
    fn prop_environment_wins_over_file(
        env_value in plain_value(),
        file_value in plain_value(),
    ) {
        let line = format!("SMTP_HOST='{file_value}'");
        let (_dir, path) = write_env_file(&[line.as_str()]);

        let settings = SettingsLoader::from_sources(
            vars_with(&[("SMTP_HOST", env_value.as_str())]),
            Some(path.as_path()),
        )
        .unwrap();

        prop_assert_eq!(settings.smtp_host, Some(env_value));
    }

    /// Property: the override file value is used when the environment is silent
    #[test]
    fn prop_file_value_used_when_environment_silent(file_value in plain_value()) {
        let line = format!("ALGORITHM='{file_value}'");
        let (_dir, path) = write_env_file(&[line.as_str()]);

        let settings =
            SettingsLoader::from_sources(vars_with(&[]), Some(path.as_path())).unwrap();

        prop_assert_eq!(settings.algorithm, file_value);
    }

    /// Property: any 64-bit integer is accepted, sign and surrounding spaces included
    #[test]
    fn prop_integer_fields_accept_full_range(minutes in any::<i64>(), pad in 0usize..3) {
        let raw = format!("{spaces}{minutes}{spaces}", spaces = " ".repeat(pad));
        let settings = SettingsLoader::from_sources(
            vars_with(&[("ACCESS_TOKEN_EXPIRE_MINUTES", raw.as_str())]),
            None,
        )
        .unwrap();

        prop_assert_eq!(settings.access_token_expire_minutes, minutes);
    }

    /// Property: integers past the 64-bit range are rejected, never truncated
    #[test]
    fn prop_integer_overflow_rejected(digit in 0u8..10, negative in any::<bool>()) {
        let raw = if negative {
            format!("{}{digit}", i64::MIN)
        } else {
            format!("{}{digit}", i64::MAX)
        };
        let err = SettingsLoader::from_sources(
            vars_with(&[("SMTP_PORT", raw.as_str())]),
            None,
        )
        .unwrap_err();

        prop_assert!(matches!(err, LoadError::Invalid(_)));
        prop_assert_eq!(
            err.violations(),
            &[ConfigError::InvalidFieldType {
                field: "smtp_port",
                expected: FieldKind::Integer,
                value: raw,
            }][..]
        );
    }

    /// Property: a `$` in an override file value is kept, quoted or not
    #[test]
    fn prop_dollar_signs_survive_override_file(
        value in "[A-Za-z0-9_./:$-]{1,24}",
        double_quoted in any::<bool>(),
    ) {
        let line = if double_quoted {
            format!("SMTP_PASSWORD=\"{value}\"")
        } else {
            format!("SMTP_PASSWORD={value}")
        };
        let (_dir, path) = write_env_file(&[line.as_str()]);

        let settings =
            SettingsLoader::from_sources(vars_with(&[]), Some(path.as_path())).unwrap();

        prop_assert_eq!(settings.smtp_password, Some(value));
    }

    /// Property: comma-separated lists split on commas and trim each item
    #[test]
    fn prop_comma_lists_split(items in prop::collection::vec("[a-z]{2,5}", 1..6)) {
        let raw = items.join(" , ");
        let settings = SettingsLoader::from_sources(
            vars_with(&[("SUPPORTED_LANGUAGES", raw.as_str())]),
            None,
        )
        .unwrap();

        prop_assert_eq!(settings.supported_languages, items);
    }
}
