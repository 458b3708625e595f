//! Option merging
//!
//! Every widget has an effective configuration struct (all fields present)
//! and an overrides struct (all fields optional). Merging is shallow: a set
//! override replaces the default wholesale, sequences included.

/// Shallow overlay of caller overrides onto a set of defaults
pub trait MergeOptions: Sized {
    /// Same fields as `Self`, each optional
    type Overrides;

    /// Fields set in `overrides` win; unset fields keep `self`'s value
    fn merge(self, overrides: Self::Overrides) -> Self;
}

/// Free-function form of [`MergeOptions::merge`]
pub fn merge_options<T: MergeOptions>(defaults: T, overrides: T::Overrides) -> T {
    defaults.merge(overrides)
}

/// Declares an effective-config struct, its overrides struct, chainable
/// setters on the overrides, and the [`MergeOptions`] impl tying them.
///
/// Overrides deserialize with camelCase keys and tolerate missing fields.
/// A field prefixed with `@serde(..)` carries that attribute on the
/// override field only.
macro_rules! widget_options {
    (
        $(#[$config_meta:meta])*
        pub struct $config:ident => $(#[$overrides_meta:meta])* pub struct $overrides:ident {
            $(
                $(#[$field_meta:meta])*
                $(@serde($($serde_attr:tt)*))?
                $field:ident: $ty:ty,
            )*
        }
    ) => {
        $(#[$config_meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $config {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        $(#[$overrides_meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct $overrides {
            $(
                $(#[$field_meta])*
                $(#[serde($($serde_attr)*)])?
                pub $field: Option<$ty>,
            )*
        }

        impl $overrides {
            $(
                #[must_use]
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }

        impl $crate::options::MergeOptions for $config {
            type Overrides = $overrides;

            fn merge(self, overrides: $overrides) -> Self {
                Self {
                    $( $field: overrides.$field.unwrap_or(self.$field), )*
                }
            }
        }
    };
}

pub(crate) use widget_options;

#[cfg(test)]
mod tests {
    use super::*;

    widget_options! {
        /// Test config
        pub struct SampleConfig => /// Test overrides
        pub struct SampleOptions {
            name: String,
            count: u32,
            tags: Vec<String>,
            @serde(deserialize_with = "null_is_off")
            enabled: bool,
        }
    }

    fn null_is_off<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        use serde::Deserialize;
        Option::<bool>::deserialize(deserializer).map(|flag| Some(flag.unwrap_or(false)))
    }

    fn defaults() -> SampleConfig {
        SampleConfig {
            name: "default".into(),
            count: 5,
            tags: vec!["a".into(), "b".into()],
            enabled: true,
        }
    }

    #[test]
    fn test_override_wins_and_unset_keeps_default() {
        let merged = merge_options(defaults(), SampleOptions::default().count(9u32).enabled(false));

        assert_eq!(merged.count, 9);
        assert!(!merged.enabled);
        assert_eq!(merged.name, "default");
        assert_eq!(merged.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_sequences_replaced_wholesale() {
        let merged = defaults().merge(SampleOptions::default().tags(vec!["z".to_string()]));
        assert_eq!(merged.tags, vec!["z".to_string()]);
    }

    #[test]
    fn test_empty_overrides_is_identity() {
        assert_eq!(defaults().merge(SampleOptions::default()), defaults());
    }

    #[test]
    fn test_overrides_do_not_touch_input() {
        let overrides = SampleOptions::default().name("custom");
        let merged = defaults().merge(overrides.clone());
        assert_eq!(merged.name, "custom");
        assert_eq!(overrides.name.as_deref(), Some("custom"));
        assert_eq!(overrides.count, None);
    }

    #[test]
    fn test_override_only_serde_attribute() {
        let overrides: SampleOptions = serde_json::from_str(r#"{"enabled":null,"count":2}"#).unwrap();
        assert_eq!(overrides.enabled, Some(false));
        assert_eq!(overrides.count, Some(2));

        let overrides: SampleOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(overrides.enabled, None);
    }
}
