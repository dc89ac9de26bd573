//! People search.

use std::sync::Arc;

use linkedin_mcp_core::{Envelope, Failure, PeoplePayload};
use linkedin_mcp_session::Session;

use crate::finish;

#[derive(Clone)]
pub struct PeopleService {
    session: Arc<Session>,
}

impl PeopleService {
    #[must_use]
    pub const fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Search people by keywords.
    pub async fn search_people(&self, keywords: &str, limit: u32) -> Envelope<PeoplePayload> {
        finish("searching people", self.search(keywords, limit).await)
    }

    async fn search(&self, keywords: &str, limit: u32) -> Result<PeoplePayload, Failure> {
        let client = self.session.client().await?;
        let people = client.search_people(keywords, limit).await?;
        Ok(PeoplePayload::new(people))
    }
}

#[cfg(test)]
mod tests {
    use linkedin_mcp_client::{MockConnector, RemoteCall};
    use serde_json::json;

    use super::*;
    use crate::{DEFAULT_PEOPLE_LIMIT, test_support::{authenticated, unauthenticated}};

    #[tokio::test]
    async fn test_search_people() {
        let people = vec![json!({ "name": "Grace" }), json!({ "name": "Barbara" })];
        let (connector, session) = authenticated(MockConnector::new().with_people(people)).await;
        let service = PeopleService::new(session);

        let payload = service
            .search_people("compilers", DEFAULT_PEOPLE_LIMIT)
            .await
            .into_result()
            .unwrap();
        assert_eq!(payload.count, 2);
        assert_eq!(payload.people[1]["name"], "Barbara");
        assert_eq!(
            connector.data_calls(),
            vec![RemoteCall::SearchPeople {
                keywords: "compilers".to_string(),
                limit: 10
            }]
        );
    }

    #[tokio::test]
    async fn test_requires_authentication() {
        let (connector, session) = unauthenticated(MockConnector::new());
        let service = PeopleService::new(session);

        let value = serde_json::to_value(service.search_people("compilers", 10).await).unwrap();
        assert_eq!(
            value,
            json!({ "success": false, "message": "Not authenticated. Please authenticate first." })
        );
        assert!(connector.data_calls().is_empty());
    }
}
