use log::error;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("unable to serialize entry: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("unable to deserialize entry: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// Transforms a struct into another one through its JSON representation.
/// Used to convert between wire-level and application-level structs that
/// share a field layout.
pub fn convert<S: Serialize, T: DeserializeOwned>(entry: &S) -> Result<T, ConvertError> {
    let value = serde_json::to_value(entry).map_err(|source| {
        error!("error serializing entry: {source}");
        ConvertError::Serialize(source)
    })?;
    serde_json::from_value(value).map_err(|source| {
        error!("error deserializing entry: {source}");
        ConvertError::Deserialize(source)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Serialize)]
    struct WireApp {
        name: String,
        replicas: u32,
        internal_tag: String,
    }

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct App {
        name: String,
        replicas: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Incompatible {
        #[allow(dead_code)]
        missing_field: String,
    }

    #[test]
    fn converts_structs_with_a_shared_layout() {
        let wire = WireApp {
            name: "exporter".to_string(),
            replicas: 2,
            internal_tag: "ignored".to_string(),
        };
        let app: App = convert(&wire).unwrap();
        assert_eq!(
            app,
            App {
                name: "exporter".to_string(),
                replicas: 2,
            }
        );
    }

    #[test]
    fn fails_when_the_target_layout_does_not_match() {
        let wire = WireApp {
            name: "exporter".to_string(),
            replicas: 2,
            internal_tag: "ignored".to_string(),
        };
        let result: Result<Incompatible, _> = convert(&wire);
        assert!(matches!(result, Err(ConvertError::Deserialize(_))));
    }
}
