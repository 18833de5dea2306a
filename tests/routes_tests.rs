mod common;

use actix_web::{test, web, App};
use common::{counterparty, partner_row, MockDocumentSink, MockPartnerStore, MockRenderEngine};
use partner_authorization_docs::config::FailurePolicy;
use partner_authorization_docs::generators::AuthorizationGenerator;
use partner_authorization_docs::orchestrator::BatchRunner;
use partner_authorization_docs::{routes, AppState};
use std::sync::Arc;

fn app_state(store: MockPartnerStore) -> web::Data<AppState> {
    let generator = AuthorizationGenerator::new(
        Arc::new(counterparty()),
        Arc::new(MockRenderEngine::failing_on("Quebrada")),
        Arc::new(MockDocumentSink::new()),
        "/assets/logo.png",
    );
    web::Data::new(AppState {
        runner: Arc::new(BatchRunner::new(
            Arc::new(store),
            generator,
            FailurePolicy::BestEffort,
        )),
    })
}

#[actix_web::test]
async fn test_generate_returns_report() {
    let state = app_state(MockPartnerStore::with_rows(vec![
        partner_row("Boa Ltda"),
        partner_row("Quebrada Ltda"),
    ]));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/authorizations/generate")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["message"],
        "Finished generating documents with 1 failure(s): Quebrada Ltda"
    );
    assert_eq!(body["generated"][0], "Boa Ltda.pdf");
    assert_eq!(body["failed"][0]["partner"], "Quebrada Ltda");
}

#[actix_web::test]
async fn test_generate_store_failure_is_server_error() {
    let state = app_state(MockPartnerStore::failing("password authentication failed"));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/authorizations/generate")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "InternalServerError");
    assert_eq!(body["message"], "password authentication failed");
}

#[actix_web::test]
async fn test_health() {
    let app = test::init_service(
        App::new().service(web::scope("/api").configure(routes::config)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
