use serde::{Deserialize, Serialize};

/// One entry in the catalogue grid, flattened from the remote API by the
/// infrastructure loader. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub id: u32,
    pub name: String,
    pub image_url: String,
    pub categories: Vec<String>,
    #[serde(default)]
    pub height_dm: u32,
    #[serde(default)]
    pub weight_hg: u32,
    #[serde(default)]
    pub abilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "deserialize_task_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: u64,
}

impl Task {
    /// Extracts the millisecond stamp embedded in an id, if the id looks
    /// like one. Older stored tasks used a raw `Date.now()`-style stamp as
    /// the whole id; newer ids are `<millis>-<seq>`.
    pub fn id_millis(&self) -> Option<u64> {
        self.id.split('-').next()?.parse().ok()
    }
}

/// Stored task ids were historically numeric; everything in memory treats
/// them as strings, so both wire shapes deserialize to a string.
fn deserialize_task_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a task id as a string or an integer")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
