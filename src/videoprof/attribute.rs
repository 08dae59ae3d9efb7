//! # Attributes
//!
//! An [`Attribute`] is a named rule that turns a file's [`TrackList`] into
//! exactly one [`Preference`]. There are two kinds:
//!
//! - [`SingleAttribute`] reads one field from the first track of a given type
//!   (e.g. the `format` of the `Video` track).
//! - [`CompositeAttribute`] concatenates the preference titles resolved by its
//!   child attributes (e.g. codec + bit depth).
//!
//! ## Resolution Grows The Preference List
//!
//! Each attribute owns an ordered list of preferences, seeded from the config.
//! [`Attribute::get_preference`] returns the first preference matching the
//! value. When none matches, a new preference is created for that literal
//! value, **appended to the list** and returned, so the next file with the
//! same value resolves to the very same `Rc<Preference>`. Resolution is a
//! read-then-append operation, which is why it takes `&mut self`.
//!
//! The list keeps insertion order: configured preferences first, then the
//! values discovered while analyzing, in the order they were first seen.

use crate::error::{Result, VideoprofError};
use crate::level::Level;
use crate::preference::Preference;
use crate::tracks::{field_string, track_type, TrackList};
use std::rc::Rc;
use tracing::debug;

pub const DEFAULT_RENDER: &str = "%s";

#[derive(Debug, Clone)]
pub enum Attribute {
    Single(SingleAttribute),
    Composite(CompositeAttribute),
}

impl Attribute {
    pub fn title(&self) -> &str {
        match self {
            Attribute::Single(a) => &a.title,
            Attribute::Composite(a) => &a.title,
        }
    }

    pub fn preferences(&self) -> &[Rc<Preference>] {
        match self {
            Attribute::Single(a) => &a.preferences,
            Attribute::Composite(a) => &a.preferences,
        }
    }

    /// Resolves the tracks to a preference, creating and registering a new
    /// one when no existing preference matches.
    ///
    /// Fails with [`VideoprofError::MissingAttribute`] when no value can be
    /// derived from the tracks.
    pub fn get_preference(&mut self, tracks: &TrackList) -> Result<Rc<Preference>> {
        match self {
            Attribute::Single(a) => a.get_preference(tracks),
            Attribute::Composite(a) => a.get_preference(tracks),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SingleAttribute {
    pub title: String,
    pub track_type: String,
    pub track_attribute: String,
    pub default_level: Level,
    pub render: String,
    pub missing_value: Option<String>,
    pub preferences: Vec<Rc<Preference>>,
}

impl SingleAttribute {
    pub fn new(
        title: impl Into<String>,
        track_type: impl Into<String>,
        track_attribute: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            track_type: track_type.into(),
            track_attribute: track_attribute.into(),
            default_level: Level::default(),
            render: DEFAULT_RENDER.to_string(),
            missing_value: None,
            preferences: Vec::new(),
        }
    }

    pub fn with_preferences(mut self, preferences: Vec<Preference>) -> Self {
        self.preferences = preferences.into_iter().map(Rc::new).collect();
        self
    }

    pub fn with_default_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_render(mut self, render: impl Into<String>) -> Self {
        self.render = render.into();
        self
    }

    pub fn with_missing_value(mut self, value: impl Into<String>) -> Self {
        self.missing_value = Some(value.into());
        self
    }

    /// Value of the configured field on the first track of the configured
    /// type. Only that first track is consulted, even when the field is
    /// absent there and present on a later track of the same type.
    pub fn get_value(&self, tracks: &TrackList) -> Option<String> {
        let track = tracks
            .iter()
            .find(|track| track_type(track) == Some(self.track_type.as_str()))?;
        track.get(&self.track_attribute).and_then(field_string)
    }

    pub fn get_preference(&mut self, tracks: &TrackList) -> Result<Rc<Preference>> {
        let value = self
            .get_value(tracks)
            .filter(|v| !v.is_empty())
            .or_else(|| self.missing_value.clone())
            .ok_or_else(|| {
                VideoprofError::missing(
                    &self.title,
                    format!("no {}:{}", self.track_type, self.track_attribute),
                )
            })?;

        resolve(
            &mut self.preferences,
            &value,
            &self.render,
            self.default_level,
        )
    }
}

#[derive(Debug, Clone)]
pub struct CompositeAttribute {
    pub title: String,
    pub default_level: Level,
    pub render: String,
    pub attributes: Vec<Attribute>,
    pub preferences: Vec<Rc<Preference>>,
}

impl CompositeAttribute {
    pub fn new(title: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            title: title.into(),
            default_level: Level::default(),
            render: DEFAULT_RENDER.to_string(),
            attributes,
            preferences: Vec::new(),
        }
    }

    pub fn with_preferences(mut self, preferences: Vec<Preference>) -> Self {
        self.preferences = preferences.into_iter().map(Rc::new).collect();
        self
    }

    pub fn with_default_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_render(mut self, render: impl Into<String>) -> Self {
        self.render = render.into();
        self
    }

    /// Concatenates the titles resolved by the children, in declaration
    /// order. Children with no value are left out; if none has a value the
    /// composite has none either.
    pub fn get_preference(&mut self, tracks: &TrackList) -> Result<Rc<Preference>> {
        let mut value = String::new();
        let mut resolved = 0;

        for child in &mut self.attributes {
            match child.get_preference(tracks) {
                Ok(preference) => {
                    value.push_str(preference.title());
                    resolved += 1;
                }
                Err(e) if e.is_missing_attribute() => {
                    debug!(composite = %self.title, child = %child.title(), "child skipped: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        if resolved == 0 {
            let children: Vec<&str> = self.attributes.iter().map(Attribute::title).collect();
            return Err(VideoprofError::missing(
                &self.title,
                format!("none of [{}] has a value", children.join(", ")),
            ));
        }

        resolve(
            &mut self.preferences,
            &value,
            &self.render,
            self.default_level,
        )
    }
}

fn resolve(
    preferences: &mut Vec<Rc<Preference>>,
    value: &str,
    render: &str,
    level: Level,
) -> Result<Rc<Preference>> {
    if let Some(existing) = preferences.iter().find(|p| p.matches(value)) {
        return Ok(Rc::clone(existing));
    }

    let created = Rc::new(Preference::literal(
        render_value(render, value),
        value,
        level,
    ));
    preferences.push(Rc::clone(&created));
    Ok(created)
}

/// printf-style rendering with a single string argument: `%s` is replaced
/// by `value` and `%%` by `%`.
pub fn render_value(format: &str, value: &str) -> String {
    let mut out = String::with_capacity(format.len() + value.len());
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            match chars.peek() {
                Some('s') => {
                    chars.next();
                    out.push_str(value);
                    continue;
                }
                Some('%') => {
                    chars.next();
                    out.push('%');
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::Track;
    use serde_json::json;

    fn track(value: serde_json::Value) -> Track {
        value.as_object().cloned().unwrap()
    }

    fn tracks() -> TrackList {
        vec![
            track(json!({"track_type": "General", "format": "Matroska"})),
            track(json!({"track_type": "Video", "format": "AVC", "height": 1080})),
            track(json!({"track_type": "Audio", "format": "AAC"})),
        ]
    }

    fn codec() -> SingleAttribute {
        SingleAttribute::new("Codec", "Video", "format")
    }

    #[test]
    fn get_value_reads_first_track_of_type() {
        let attribute = SingleAttribute::new("Test Title", "test_type", "test_attribute");
        let media = vec![track(json!({"track_type": "test_type", "test_attribute": "test_value"}))];
        assert_eq!(attribute.get_value(&media), Some("test_value".to_string()));
    }

    #[test]
    fn get_value_stringifies_numbers() {
        let attribute = SingleAttribute::new("Height", "Video", "height");
        assert_eq!(attribute.get_value(&tracks()), Some("1080".to_string()));
    }

    #[test]
    fn get_value_missing_field_or_type() {
        let missing_field = SingleAttribute::new("Depth", "Video", "bit_depth");
        assert_eq!(missing_field.get_value(&tracks()), None);

        let missing_type = SingleAttribute::new("Lang", "Text", "language");
        assert_eq!(missing_type.get_value(&tracks()), None);
    }

    #[test]
    fn synthesizes_and_reuses_preferences() {
        let mut attribute = codec().with_render("codec %s");

        let first = attribute.get_preference(&tracks()).unwrap();
        assert_eq!(first.title(), "codec AVC");
        assert_eq!(attribute.preferences.len(), 1);

        let second = attribute.get_preference(&tracks()).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(attribute.preferences.len(), 1);
    }

    #[test]
    fn synthesized_preferences_use_default_level() {
        let mut attribute = codec().with_default_level(Level::new(None, true));
        assert!(attribute.get_preference(&tracks()).unwrap().is_flagged());
    }

    #[test]
    fn configured_preferences_win_in_order() {
        let good = Preference::new("Good", "AV.", Level::default()).unwrap();
        let also = Preference::new("Also", "AVC", Level::default()).unwrap();
        let mut attribute = codec().with_preferences(vec![good, also]);

        let resolved = attribute.get_preference(&tracks()).unwrap();
        assert_eq!(resolved.title(), "Good");
        assert_eq!(attribute.preferences.len(), 2);
    }

    #[test]
    fn new_values_are_appended_after_configured_ones() {
        let hevc = Preference::new("HEVC", "HEVC", Level::default()).unwrap();
        let mut attribute = codec().with_preferences(vec![hevc]);

        attribute.get_preference(&tracks()).unwrap();
        let titles: Vec<&str> = attribute.preferences.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["HEVC", "AVC"]);
    }

    #[test]
    fn missing_value_without_fallback_fails() {
        let mut attribute = SingleAttribute::new("Depth", "Video", "bit_depth");
        let err = attribute.get_preference(&tracks()).unwrap_err();
        assert!(err.is_missing_attribute());
        assert!(attribute.preferences.is_empty());
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut attribute = SingleAttribute::new("Lang", "Audio", "language");
        let media = vec![track(json!({"track_type": "Audio", "language": ""}))];
        assert!(attribute.get_preference(&media).unwrap_err().is_missing_attribute());
    }

    #[test]
    fn missing_value_fallback_is_used() {
        let mut attribute =
            SingleAttribute::new("Depth", "Video", "bit_depth").with_missing_value("8");
        let resolved = attribute.get_preference(&tracks()).unwrap();
        assert_eq!(resolved.title(), "8");
    }

    fn child(title: &str, attr: &str) -> Attribute {
        Attribute::Single(SingleAttribute::new(title, "test_type", attr))
    }

    fn composite() -> CompositeAttribute {
        CompositeAttribute::new("Combined", vec![child("A", "a"), child("B", "b")])
    }

    #[test]
    fn composite_concatenates_child_titles() {
        let mut attribute = composite();
        let media = vec![track(json!({"track_type": "test_type", "a": "good", "b": "test"}))];

        let resolved = attribute.get_preference(&media).unwrap();
        assert_eq!(resolved.title(), "goodtest");
        assert_eq!(attribute.preferences.len(), 1);
    }

    #[test]
    fn composite_reuses_configured_preference() {
        let configured = Preference::new("All good", "goodtest", Level::default()).unwrap();
        let mut attribute = composite().with_preferences(vec![configured]);
        let media = vec![track(json!({"track_type": "test_type", "a": "good", "b": "test"}))];

        let resolved = attribute.get_preference(&media).unwrap();
        assert_eq!(resolved.title(), "All good");
        assert_eq!(attribute.preferences.len(), 1);
    }

    #[test]
    fn composite_skips_missing_children() {
        let mut attribute = composite();
        let media = vec![track(json!({"track_type": "test_type", "b": "test"}))];

        let resolved = attribute.get_preference(&media).unwrap();
        assert_eq!(resolved.title(), "test");
    }

    #[test]
    fn composite_with_all_children_missing_fails() {
        let mut attribute = composite();
        let media = vec![track(json!({"track_type": "test_type"}))];

        let err = attribute.get_preference(&media).unwrap_err();
        assert!(err.is_missing_attribute());
    }

    #[test]
    fn composite_children_grow_their_own_preferences() {
        let mut attribute = composite();
        let media = vec![track(json!({"track_type": "test_type", "a": "good", "b": "test"}))];
        attribute.get_preference(&media).unwrap();

        assert_eq!(attribute.attributes[0].preferences().len(), 1);
        assert_eq!(attribute.attributes[1].preferences()[0].title(), "test");
    }

    #[test]
    fn attribute_enum_dispatches() {
        let mut attribute = Attribute::Single(codec());
        assert_eq!(attribute.title(), "Codec");
        assert_eq!(attribute.get_preference(&tracks()).unwrap().title(), "AVC");
        assert_eq!(attribute.preferences().len(), 1);
    }

    #[test]
    fn render_value_handles_placeholders() {
        assert_eq!(render_value("%s", "AVC"), "AVC");
        assert_eq!(render_value("%sp", "1080"), "1080p");
        assert_eq!(render_value("%s%%", "50"), "50%");
        assert_eq!(render_value("fixed", "x"), "fixed");
    }

    #[test]
    fn discovered_value_does_not_absorb_longer_values() {
        let mut attribute = SingleAttribute::new("Audio codec", "Audio", "format");
        let short = vec![track(json!({"track_type": "Audio", "format": "E-AC"}))];
        let long = vec![track(json!({"track_type": "Audio", "format": "E-AC-3"}))];

        let first = attribute.get_preference(&short).unwrap();
        let second = attribute.get_preference(&long).unwrap();

        assert_eq!(first.title(), "E-AC");
        assert_eq!(second.title(), "E-AC-3");
        assert_eq!(attribute.preferences.len(), 2);
        assert!(Rc::ptr_eq(&first, &attribute.get_preference(&short).unwrap()));
    }
}
