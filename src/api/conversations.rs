use crate::{
    consts,
    services::{GraphError, ImplGraphService},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw query string of the conversation list, validated into a [`PageRequest`]
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConversationsQuery {
    pub limit: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
}

/// Validated pagination input
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub limit: u32,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: consts::DEFAULT_CONVERSATIONS_LIMIT,
            before: None,
            after: None,
        }
    }
}

impl TryFrom<&ConversationsQuery> for PageRequest {
    type Error = String;

    fn try_from(query: &ConversationsQuery) -> Result<Self, Self::Error> {
        let limit = match query.limit.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            None => consts::DEFAULT_CONVERSATIONS_LIMIT,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| format!("invalid limit {raw:?}: expected a positive integer"))?,
        };

        let cursor = |c: &Option<String>| c.clone().filter(|c| !c.is_empty());

        Ok(Self {
            limit,
            before: cursor(&query.before),
            after: cursor(&query.after),
        })
    }
}

impl PageRequest {
    fn graph_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("platform".to_string(), consts::MESSAGING_PRODUCT.to_string()),
            ("fields".to_string(), consts::CONVERSATION_FIELDS.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];

        if let Some(before) = &self.before {
            params.push(("before".to_string(), before.clone()));
        }
        if let Some(after) = &self.after {
            params.push(("after".to_string(), after.clone()));
        }

        params
    }
}

/// One page of conversation threads
#[derive(Debug, Serialize, PartialEq)]
pub struct ConversationPage {
    pub data: Vec<Value>,
    /// `paging.cursors` of the upstream response, `null` when absent
    pub paging: Option<Value>,
}

/// Lists conversation threads of the linked business account.
///
/// The account id is resolved again on every call so relinking an account
/// takes effect without a restart.
pub async fn list_conversations(
    graph: &ImplGraphService,
    page: &PageRequest,
) -> Result<ConversationPage, GraphError> {
    let account_id = graph.resolve_business_account_id().await?;

    let response = graph
        .get(format!("{account_id}/conversations"), page.graph_params())
        .await?;

    let data = response
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let paging = response
        .get("paging")
        .and_then(|p| p.get("cursors"))
        .cloned();

    Ok(ConversationPage { data, paging })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockGraphService;
    use mockall::predicate::*;
    use serde_json::json;
    use std::sync::Arc;

    fn expected_params(limit: &str, extra: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut params = vec![
            ("platform".to_string(), "instagram".to_string()),
            (
                "fields".to_string(),
                "id,updated_time,participants.limit(50){id,username},link".to_string(),
            ),
            ("limit".to_string(), limit.to_string()),
        ];
        params.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        params
    }

    fn query(limit: Option<&str>, before: Option<&str>, after: Option<&str>) -> ConversationsQuery {
        ConversationsQuery {
            limit: limit.map(str::to_string),
            before: before.map(str::to_string),
            after: after.map(str::to_string),
        }
    }

    #[test]
    fn test_graph_params_defaults() {
        let page = PageRequest::try_from(&ConversationsQuery::default()).unwrap();
        assert_eq!(page, PageRequest::default());
        assert_eq!(page.graph_params(), expected_params("25", &[]));
    }

    #[test]
    fn test_graph_params_with_cursors() {
        let page = PageRequest::try_from(&query(Some("5"), Some("b1"), Some(""))).unwrap();
        assert_eq!(page.graph_params(), expected_params("5", &[("before", "b1")]));
    }

    #[test]
    fn test_invalid_limit_is_rejected() {
        for limit in ["abc", "-1", "0", "2.5", "99999999999"] {
            let err = PageRequest::try_from(&query(Some(limit), None, None)).unwrap_err();
            assert!(err.contains("invalid limit"), "{limit}: {err}");
        }
        assert_eq!(
            PageRequest::try_from(&query(Some(" "), None, None)).unwrap().limit,
            25
        );
    }

    #[ntex::test]
    async fn test_list_conversations() {
        let mut graph = MockGraphService::new();
        graph
            .expect_resolve_business_account_id()
            .times(2)
            .returning(|| Ok("ig1".to_string()));
        graph
            .expect_get()
            .with(
                eq("ig1/conversations".to_string()),
                eq(expected_params("10", &[("after", "c2")])),
            )
            .times(2)
            .returning(|_, _| {
                Ok(json!({
                    "data": [{"id": "t1", "updated_time": "2024-01-01T00:00:00+0000"}],
                    "paging": {"cursors": {"before": "c1", "after": "c2"}, "next": "https://..."}
                }))
            });
        let graph: ImplGraphService = Arc::new(graph);

        let page = PageRequest::try_from(&query(Some("10"), None, Some("c2"))).unwrap();

        let first = list_conversations(&graph, &page).await.unwrap();
        let second = list_conversations(&graph, &page).await.unwrap();

        assert_eq!(first.data.len(), 1);
        assert_eq!(first.paging, Some(json!({"before": "c1", "after": "c2"})));
        assert_eq!(first, second);
    }

    #[ntex::test]
    async fn test_list_conversations_without_paging() {
        let mut graph = MockGraphService::new();
        graph
            .expect_resolve_business_account_id()
            .returning(|| Ok("ig1".to_string()));
        graph.expect_get().returning(|_, _| Ok(json!({"data": []})));
        let graph: ImplGraphService = Arc::new(graph);

        let page = list_conversations(&graph, &PageRequest::default())
            .await
            .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.paging, None);
    }

    #[ntex::test]
    async fn test_resolution_error_is_propagated() {
        let mut graph = MockGraphService::new();
        graph
            .expect_resolve_business_account_id()
            .times(1)
            .returning(|| Err(GraphError::Resolution("no account linked".into())));
        graph.expect_get().times(0);
        let graph: ImplGraphService = Arc::new(graph);

        let result = list_conversations(&graph, &PageRequest::default()).await;

        assert!(matches!(result, Err(GraphError::Resolution(msg)) if msg == "no account linked"));
    }
}
