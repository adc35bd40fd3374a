// Property-based tests for turning command-line stamps into base inputs

use chrono::{Local, TimeZone};
use proptest::prelude::*;
use templatizer_cli::commands::CommandContext;
use templatizer_cli::router::{parse_key_value, StampArgs};
use templatizer_config::{DefaultsConfig, TemplatizerConfig};

fn context(defaults: DefaultsConfig) -> CommandContext {
    let config = TemplatizerConfig {
        defaults,
        ..Default::default()
    };
    CommandContext::new(config).at(Local.with_ymd_and_hms(2031, 6, 14, 9, 0, 0).unwrap())
}

proptest! {
    /// Property: `KEY=VALUE` splits at the first `=` and keeps the value intact
    #[test]
    fn prop_key_value_round_trip(
        key in "[a-z][a-z0-9_-]{0,10}",
        value in "[^\n]{0,20}",
    ) {
        let (parsed_key, parsed_value) = parse_key_value(&format!("{}={}", key, value)).unwrap();
        prop_assert_eq!(parsed_key, key);
        prop_assert_eq!(parsed_value, value);
    }

    /// Property: an explicit flag always beats the configured default
    #[test]
    fn prop_flags_override_defaults(
        flag_year in "[0-9]{4}",
        default_year in "[0-9]{4}",
        flag_month in "[A-Z][a-z]{2,8}",
        default_month in "[A-Z][a-z]{2,8}",
    ) {
        let defaults = DefaultsConfig {
            namespace: None,
            year: Some(default_year),
            month: Some(default_month),
        };
        let stamps = StampArgs {
            year: Some(flag_year.clone()),
            month: Some(flag_month.clone()),
            ..Default::default()
        };

        let inputs = context(defaults).base_inputs("Widget", &stamps);
        prop_assert_eq!(inputs.year, flag_year);
        prop_assert_eq!(inputs.month, flag_month);
    }

    /// Property: configured defaults fill in whatever the flags leave out
    #[test]
    fn prop_defaults_fill_gaps(
        segments in prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..4),
        default_year in "[0-9]{4}",
    ) {
        let defaults = DefaultsConfig {
            namespace: Some(segments.join("::")),
            year: Some(default_year.clone()),
            month: None,
        };

        let inputs = context(defaults).base_inputs("Widget", &StampArgs::default());
        prop_assert_eq!(inputs.namespace_path, segments);
        prop_assert_eq!(inputs.year, default_year);
        prop_assert_eq!(inputs.month, "June");
    }
}
