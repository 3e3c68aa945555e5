use serde::{Deserialize, Deserializer};

pub mod catalog;
pub mod collection;
pub mod discovery;
pub mod health;

/// Accept identifiers sent either as JSON strings or numbers; blank strings count as absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    let id = Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    });
    Ok(id.filter(|id| !id.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::lenient_id")]
        id: Option<String>,
    }

    fn probe(raw: &str) -> Option<String> {
        serde_json::from_str::<Probe>(raw).unwrap().id
    }

    #[test]
    fn ids_accept_strings_and_numbers() {
        assert_eq!(probe(r#"{"id": "3498"}"#).as_deref(), Some("3498"));
        assert_eq!(probe(r#"{"id": 3498}"#).as_deref(), Some("3498"));
        assert_eq!(probe(r#"{"id": ""}"#), None);
        assert_eq!(probe(r#"{"id": null}"#), None);
        assert_eq!(probe("{}"), None);
    }
}
