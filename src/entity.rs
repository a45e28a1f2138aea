//! The person record every other module works on.

use std::{collections::BTreeSet, hash::Hash};

use serde::{Deserialize, Serialize};

/// Marker used by the data source for rows whose content was never collected.
pub const NOT_RECORDED: &str = "数据未收录";

/// Placeholder name left behind by empty spreadsheet cells.
pub const EMPTY_PLACEHOLDER: &str = "()";

/// Display value for a missing categorical field.
pub const NONE_DISPLAY: &str = "无";

/// A person from the dataset.
///
/// Serialized with the wire shape `{name, gender, birthDate, grade, location, hobby}`; `hobby`
/// travels as a single whitespace-joined string and is only split into tags on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Unique display name, also the identity of the record.
    pub name: String,
    /// Gender, compared as a category.
    #[serde(default)]
    pub gender: String,
    /// `YYYYMMDD`, empty when unknown.
    #[serde(default)]
    pub birth_date: String,
    /// School grade, compared as a category.
    #[serde(default)]
    pub grade: String,
    /// Home region, compared as a category.
    #[serde(default)]
    pub location: String,
    /// Whitespace separated hobby tags.
    #[serde(default)]
    pub hobby: String,
}

// identity is the only key: two records with the same name are the same person
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Entity {
    /// Builds a record from its six fields, in wire order.
    pub fn new(
        name: impl Into<String>,
        gender: impl Into<String>,
        birth_date: impl Into<String>,
        grade: impl Into<String>,
        location: impl Into<String>,
        hobby: impl Into<String>,
    ) -> Entity {
        Entity {
            name: name.into(),
            gender: gender.into(),
            birth_date: birth_date.into(),
            grade: grade.into(),
            location: location.into(),
            hobby: hobby.into(),
        }
    }

    /// True if this record may be drawn as a target or offered as a guess.
    pub fn is_valid(&self) -> bool {
        is_valid_name(&self.name)
    }

    /// Hobby tokens in written order, empty tokens dropped.
    pub fn hobby_tokens(&self) -> impl Iterator<Item = &str> {
        self.hobby.split_whitespace()
    }

    /// Hobby tokens as a set, the representation used for comparisons.
    pub fn hobby_tags(&self) -> BTreeSet<&str> {
        self.hobby_tokens().collect()
    }
}

/// A name is valid unless blank or one of the data source placeholders.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && name != NOT_RECORDED && name != EMPTY_PLACEHOLDER
}

/// Display form of a categorical value, with the explicit "none" category for blanks.
pub fn display_or_none(value: &str) -> &str {
    if value.is_empty() {
        NONE_DISPLAY
    } else {
        value
    }
}

#[cfg(test)]
mod entity_tests {
    use super::*;

    #[test]
    fn sentinel_names_are_invalid() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("   "));
        assert!(!is_valid_name(NOT_RECORDED));
        assert!(!is_valid_name(EMPTY_PLACEHOLDER));
        assert!(is_valid_name("孙瑜"));
    }

    #[test]
    fn equality_only_looks_at_name() {
        let a = Entity::new("A", "男", "20080101", "大一", "北京", "足球");
        let b = Entity::new("A", "女", "20090101", "大二", "上海", "");
        assert_eq!(a, b);
        assert_ne!(a, Entity::new("B", "男", "20080101", "大一", "北京", "足球"));
    }

    #[test]
    fn hobby_tags_are_a_set() {
        let e = Entity::new("A", "", "", "", "", "  足球 农批  足球 ");
        assert_eq!(e.hobby_tokens().collect::<Vec<_>>(), ["足球", "农批", "足球"]);
        assert_eq!(e.hobby_tags().len(), 2);
        assert!(e.hobby_tags().contains("农批"));
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let e = Entity::new("A", "男", "20081219", "大二", "安徽", "uuu 足球");
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["birthDate"], "20081219");
        assert_eq!(json["hobby"], "uuu 足球");

        let back: Entity = serde_json::from_str(r#"{"name":"B","birthDate":"20090101"}"#).unwrap();
        assert_eq!(back.birth_date, "20090101");
        assert_eq!(back.gender, "");
    }

    #[test]
    fn blank_values_display_as_none() {
        assert_eq!(display_or_none(""), NONE_DISPLAY);
        assert_eq!(display_or_none("北京"), "北京");
    }
}
