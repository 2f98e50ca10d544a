//! HTTP transport for the GraphQL schema.

use actix_web::{post, web};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::inbound::graphql::AppSchema;

#[cfg(debug_assertions)]
use actix_web::{get, HttpResponse};
#[cfg(debug_assertions)]
use async_graphql::http::GraphiQLSource;

/// Execute a GraphQL request against the application schema.
#[post("/graphql")]
pub async fn graphql(schema: web::Data<AppSchema>, request: GraphQLRequest) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

/// Serve the GraphiQL IDE in debug builds only.
#[cfg(debug_assertions)]
#[get("/graphql")]
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::json;

    use crate::inbound::graphql::{build_schema, state::GqlPorts};

    #[actix_web::test]
    async fn executes_queries_over_http() {
        let schema = build_schema(GqlPorts::fixture());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(schema))
                .service(graphql),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/graphql")
            .set_json(json!({ "query": "{ getTodoList { id } }" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["getTodoList"], json!([]));
    }

    #[cfg(debug_assertions)]
    #[actix_web::test]
    async fn serves_graphiql_in_debug_builds() {
        let app = test::init_service(App::new().service(graphiql)).await;
        let req = test::TestRequest::get().uri("/graphql").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());
    }
}
