use async_graphql::{EmptySubscription, Schema, http::GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, response::Html};

pub use crate::modules::tracking::adapters::inbound::graphql::{MutationRoot, QueryRoot};
pub use crate::shell::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

pub async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}

#[cfg(test)]
mod graphql_endpoint_tests {
    use axum::{body::Body, http::StatusCode};
    use tower::ServiceExt;

    use crate::shell::http::router;
    use crate::tests::fixtures::{
        ProjectBuilder, app_state, json_request, read_json, snapshot_with,
    };

    #[tokio::test]
    async fn it_should_serve_graphql_over_http() {
        let state = app_state(snapshot_with(vec![ProjectBuilder::new().build()], vec![]), 0);
        let response = router(state)
            .oneshot(json_request("POST", "/gql", r#"{"query":"{ projects { name } }"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["data"]["projects"][0]["name"], "Website redesign");
    }

    #[tokio::test]
    async fn it_should_serve_graphiql_on_get() {
        let state = app_state(Default::default(), 0);
        let response = router(state)
            .oneshot(
                axum::http::Request::get("/gql")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
