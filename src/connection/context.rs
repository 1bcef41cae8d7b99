use tonic::{metadata::MetadataValue, service::Interceptor, Request, Status};

/// Metadata key carrying the name of the agent sending the request.
pub const AGENT_HEADER: &str = "agent";

/// Metadata key carrying the version of the application sending the request.
pub const VERSION_HEADER: &str = "version";

/// Interceptor attaching agent and version metadata to every outgoing
/// request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    version: String,
    agent: String,
}

impl RequestContext {
    pub fn new(version: impl Into<String>, agent: impl Into<String>) -> Self {
        RequestContext {
            version: version.into(),
            agent: agent.into(),
        }
    }
}

impl Interceptor for RequestContext {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let agent = MetadataValue::try_from(self.agent.as_str())
            .map_err(|_| Status::invalid_argument("agent is not a valid header value"))?;
        let version = MetadataValue::try_from(self.version.as_str())
            .map_err(|_| Status::invalid_argument("version is not a valid header value"))?;
        request.metadata_mut().insert(AGENT_HEADER, agent);
        request.metadata_mut().insert(VERSION_HEADER, version);
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn attaches_agent_and_version_metadata() {
        let mut context = RequestContext::new("v1.2.3", "playground-cli");
        let request = context.call(Request::new(())).unwrap();

        assert_eq!(
            request
                .metadata()
                .get(AGENT_HEADER)
                .unwrap()
                .to_str()
                .unwrap(),
            "playground-cli"
        );
        assert_eq!(
            request
                .metadata()
                .get(VERSION_HEADER)
                .unwrap()
                .to_str()
                .unwrap(),
            "v1.2.3"
        );
    }

    #[test]
    fn rejects_values_that_are_not_valid_metadata() {
        let mut context = RequestContext::new("v1.0\n", "cli");
        assert!(context.call(Request::new(())).is_err());
    }
}
