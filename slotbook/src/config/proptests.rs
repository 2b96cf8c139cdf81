//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{BookingConfig, Config, OutputFormat};
use super::validator::{ConfigValidator, MAX_ATTEMPTS_RANGE, RETRY_BACKOFF_MS_RANGE};
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
    ]
}

fn booking_strategy() -> impl Strategy<Value = BookingConfig> {
    (prop::option::of(0u32..=40), prop::option::of(0u64..=2000)).prop_map(
        |(max_attempts, retry_backoff_ms)| BookingConfig {
            max_attempts,
            retry_backoff_ms,
        },
    )
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(booking_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(0u64..=7200),
        prop::option::of(output_format_strategy()),
    )
        .prop_map(
            |(booking, disable_autoinit, maximum_lock_wait_seconds, output_format)| Config {
                booking,
                disable_autoinit,
                maximum_lock_wait_seconds,
                output_format,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));

        let attempts = |c: &Config| c.booking.as_ref().and_then(|b| b.max_attempts);
        let backoff = |c: &Config| c.booking.as_ref().and_then(|b| b.retry_backoff_ms);
        prop_assert_eq!(attempts(&result), attempts(&high).or(attempts(&low)));
        prop_assert_eq!(backoff(&result), backoff(&high).or(backoff(&low)));
    }

    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    #[test]
    fn config_merge_associative(a in config_strategy(), b in config_strategy(), c in config_strategy()) {
        let mut left = a.clone();
        ConfigMerger::merge_into(&mut left, &b);
        ConfigMerger::merge_into(&mut left, &c);

        let mut b_merge_c = b;
        ConfigMerger::merge_into(&mut b_merge_c, &c);
        let mut right = a;
        ConfigMerger::merge_into(&mut right, &b_merge_c);

        prop_assert_eq!(left, right);
    }

    #[test]
    fn validation_matches_ranges(booking in booking_strategy()) {
        let expected = booking.max_attempts.map_or(true, |n| MAX_ATTEMPTS_RANGE.contains(&n))
            && booking.retry_backoff_ms.map_or(true, |n| RETRY_BACKOFF_MS_RANGE.contains(&n));
        let config = Config { booking: Some(booking), ..Default::default() };
        prop_assert_eq!(ConfigValidator::validate(&config).is_ok(), expected);
    }

    #[test]
    fn yaml_roundtrip_preserves_config(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
