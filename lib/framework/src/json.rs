use std::fmt::Debug;
use std::fs::read_to_string;
use std::path::Path;

use serde::Serialize;
use serde::de::Deserialize;
use serde::de::DeserializeOwned;

use crate::exception::DevPulseResult;

pub fn load_file<T>(path: &Path) -> DevPulseResult<T>
where
    T: DeserializeOwned,
{
    let json = read_to_string(path).map_err(|err| {
        exception!(
            message = format!("failed to read file, path={}", path.to_string_lossy()),
            source = err
        )
    })?;
    serde_json::from_str(&json)
        .map_err(|err| exception!(message = format!("failed to deserialize, json={json}"), source = err))
}

pub fn from_json<'a, T>(json: &'a str) -> DevPulseResult<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str(json)
        .map_err(|err| exception!(message = format!("failed to deserialize, json={json}"), source = err))
}

pub fn to_json<T>(object: &T) -> DevPulseResult<String>
where
    T: Serialize + Debug,
{
    serde_json::to_string(object).map_err(|err| {
        exception!(
            message = format!("failed to serialize, object={object:?}"),
            source = err
        )
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Config {
        url: String,
    }

    #[test]
    fn from_json_deserializes() {
        let config: Config = super::from_json(r#"{"url":"http://localhost"}"#).unwrap();
        assert_eq!(config.url, "http://localhost");
    }

    #[test]
    fn from_json_reports_the_payload_on_failure() {
        let result: Result<Config, _> = super::from_json("not json");
        let exception = result.unwrap_err();
        assert!(exception.message.contains("not json"));
    }

    #[test]
    fn to_json_serializes() {
        let json = super::to_json(&Config {
            url: "http://localhost".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"url":"http://localhost"}"#);
    }
}
