//! Front-matter parsing
//!
//! Content files open with a `---` block of YAML key/value pairs followed by a
//! closing `---` line. Every recognised key is optional; unknown keys are
//! ignored. Scalars written as numbers or booleans are accepted for string
//! fields and stored in their textual form.

use chrono::{DateTime, SecondsFormat, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use super::item::{Metadata, TeamMember};

lazy_static! {
    /// A `key:` line, which is what separates a metadata block from a
    /// markdown thematic break
    static ref YAML_KEY: Regex = Regex::new(r"^[A-Za-z0-9_-]+:(\s|$)").unwrap();
}

/// Accept any YAML scalar for a string field
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct Scalar;

    impl<'de> Visitor<'de> for Scalar {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(Scalar)
}

/// Handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            if value.trim().is_empty() {
                return Ok(Vec::new());
            }
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Team list; `team:` with no value means nobody
fn team_list<'de, D>(deserializer: D) -> Result<Vec<TeamMember>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TeamMember>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Front-matter data from a content file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub published_at: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub tag: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub link: Option<String>,
    #[serde(deserialize_with = "team_list")]
    pub team: Vec<TeamMember>,
    /// Used by service pages
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some((yaml, body)) = split_block(content) else {
            return Ok((FrontMatter::default(), content));
        };
        let body = body.trim_start_matches(['\n', '\r']);

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        // A block of prose between two thematic breaks is body text
        let has_yaml_structure = yaml.lines().any(|line| {
            let trimmed = line.trim_end();
            !trimmed.starts_with('#') && YAML_KEY.is_match(trimmed)
        });
        if !has_yaml_structure {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
        Ok((fm, body))
    }

    /// Fill in defaults for everything the file left out.
    ///
    /// `loaded_at` stands in for a missing `publishedAt`.
    pub fn into_metadata(self, loaded_at: DateTime<Utc>) -> Metadata {
        Metadata {
            title: non_empty(self.title).unwrap_or_else(|| "Untitled".to_string()),
            summary: self.summary.unwrap_or_default(),
            published_at: non_empty(self.published_at)
                .unwrap_or_else(|| loaded_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            tag: self.tag.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            images: self.images,
            link: self.link.unwrap_or_default(),
            team: self.team,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Split `---\n<yaml>\n---\n<body>` into its two halves
fn split_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let line_end = rest.find('\n')?;
    if !rest[..line_end].trim().is_empty() {
        return None;
    }
    let rest = &rest[line_end + 1..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}
