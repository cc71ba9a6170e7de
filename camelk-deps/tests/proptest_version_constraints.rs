//! Property-based tests for lenient version parsing and requirement matching

use camelk_deps::{VersionRequirement, parse_version};
use proptest::prelude::*;
use semver::Version;

prop_compose! {
    fn version()(major in 0u64..20, minor in 0u64..40, patch in 0u64..40) -> Version {
        Version::new(major, minor, patch)
    }
}

fn requirement(s: &str) -> VersionRequirement {
    VersionRequirement::parse(s).unwrap()
}

proptest! {
    #[test]
    fn prop_parse_version_full(v in version()) {
        prop_assert_eq!(parse_version(&v.to_string()).unwrap(), v.clone());
        prop_assert_eq!(parse_version(&format!("v{v}")).unwrap(), v);
    }

    #[test]
    fn prop_parse_version_pads_missing_components(major in 0u64..100, minor in 0u64..100) {
        prop_assert_eq!(parse_version(&format!("{major}.{minor}")).unwrap(), Version::new(major, minor, 0));
        prop_assert_eq!(parse_version(&major.to_string()).unwrap(), Version::new(major, 0, 0));
    }

    #[test]
    fn prop_release_qualifier_does_not_change_precedence(v in version()) {
        let qualified = parse_version(&format!("{v}.Final")).unwrap();
        prop_assert!(qualified.pre.is_empty());
        prop_assert!(requirement(&v.to_string()).matches(&qualified));
    }

    #[test]
    fn prop_lower_and_upper_bounds_partition(bound in version(), v in version()) {
        let at_least = requirement(&format!(">= {bound}")).matches(&v);
        let below = requirement(&format!("< {bound}")).matches(&v);
        prop_assert_ne!(at_least, below);
        prop_assert_eq!(at_least, v >= bound);
    }

    #[test]
    fn prop_wildcard_tracks_major_and_minor(v in version(), major in 0u64..20, minor in 0u64..40) {
        prop_assert_eq!(requirement(&format!("{major}.x")).matches(&v), v.major == major);
        prop_assert_eq!(
            requirement(&format!("{major}.{minor}")).matches(&v),
            v.major == major && v.minor == minor
        );
    }

    #[test]
    fn prop_alternatives_are_disjunction(a in version(), b in version(), v in version()) {
        let left = format!(">= {a}");
        let right = format!("<= {b}");
        let either = requirement(&format!("{left} || {right}"));
        prop_assert_eq!(
            either.matches(&v),
            requirement(&left).matches(&v) || requirement(&right).matches(&v)
        );
    }

    #[test]
    fn prop_conjunction_is_intersection(a in version(), b in version(), v in version()) {
        let both = requirement(&format!(">= {a}, <= {b}"));
        prop_assert_eq!(both.matches(&v), v >= a && v <= b);
    }

    #[test]
    fn prop_caret_stays_within_major(v in version(), base in version()) {
        prop_assume!(base.major > 0);
        let matched = requirement(&format!("^{base}")).matches(&v);
        prop_assert_eq!(matched, v >= base && v.major == base.major);
    }

    #[test]
    fn prop_prerelease_excluded_from_plain_ranges(v in version()) {
        let mut pre = v.clone();
        pre.pre = semver::Prerelease::new("SNAPSHOT").unwrap();
        prop_assert!(!requirement(">= 0.0.0").matches(&pre));
        prop_assert!(requirement(&pre.to_string()).matches(&pre));
    }

    #[test]
    fn prop_requirement_display_keeps_input(v in version()) {
        let raw = format!(">= {v}, < {}", v.major + 1);
        prop_assert_eq!(requirement(&raw).to_string(), raw);
    }
}
