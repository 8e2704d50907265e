//! `RemoteStore` against a stubbed table-query API.

use carbon_path::matching::{BusinessProfile, ConsultantStatus, SubsidyType, UserId};
use carbon_path::store::{DataSource, DataSourceError, RemoteStore};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-anon-key";

fn store_for(server: &MockServer) -> RemoteStore {
    RemoteStore::new(&server.uri(), API_KEY).expect("valid base url")
}

#[tokio::test]
async fn grants_request_filters_active_rows_and_sends_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/grants"))
        .and(query_param("select", "*"))
        .and(query_param("is_active", "eq.true"))
        .and(header("apikey", API_KEY))
        .and(header("authorization", format!("Bearer {API_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "g-1",
                "name": "Green Growth Fund",
                "sectors": ["Manufacturing"],
                "location_scope": ["North West"],
                "amount_max": 25000,
                "deadline": "2026-03-31",
                "whats_covered": null,
                "is_active": true
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let grants = store_for(&server).grants().await.expect("grants fetched");

    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].name, "Green Growth Fund");
    assert_eq!(grants[0].amount_max, Some(25_000.0));
    assert!(grants[0].whats_covered.is_empty());
}

#[tokio::test]
async fn subsidies_tolerate_unknown_types() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/subsidies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "s-1", "subsidy_type": "tax_relief", "is_active": true },
            { "id": "s-2", "subsidy_type": "mystery", "is_active": true }
        ])))
        .mount(&server)
        .await;

    let subsidies = store_for(&server).subsidies().await.expect("subsidies");

    assert_eq!(subsidies[0].subsidy_type, SubsidyType::TaxRelief);
    assert_eq!(subsidies[1].subsidy_type, SubsidyType::Other);
}

#[tokio::test]
async fn consultants_are_limited_to_approved_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/consultants"))
        .and(query_param("status", "eq.approved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "c-1", "specialty": "Energy Auditors", "status": "approved" },
            { "id": "c-2", "specialty": "Grant Writers", "status": "pending" }
        ])))
        .mount(&server)
        .await;

    let consultants = store_for(&server).consultants().await.expect("consultants");

    assert_eq!(consultants.len(), 1);
    assert_eq!(consultants[0].status, ConsultantStatus::Approved);
}

#[tokio::test]
async fn missing_profile_reads_as_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/business_profiles"))
        .and(query_param("user_id", "eq.user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let profile = store_for(&server)
        .profile(&UserId("user-1".to_string()))
        .await
        .expect("lookup succeeds");

    assert!(profile.is_none());
}

#[tokio::test]
async fn save_profile_upserts_with_merge_preference() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/business_profiles"))
        .and(query_param("on_conflict", "user_id"))
        .and(header(
            "prefer",
            "resolution=merge-duplicates,return=minimal",
        ))
        .and(body_partial_json(json!({
            "user_id": "user-9",
            "sector": "Retail",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let profile = BusinessProfile {
        sector: Some("Retail".to_string()),
        ..BusinessProfile::default()
    };

    store_for(&server)
        .save_profile(&UserId("user-9".to_string()), &profile)
        .await
        .expect("upsert accepted");
}

#[tokio::test]
async fn non_success_status_is_reported_with_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/grants"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    match store_for(&server).grants().await {
        Err(DataSourceError::UnexpectedStatus { status, table }) => {
            assert_eq!(status, 401);
            assert_eq!(table, "grants");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_rows_are_decode_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/grants"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
        .mount(&server)
        .await;

    let error = store_for(&server)
        .grants()
        .await
        .expect_err("object body is not a row list");
    assert!(matches!(error, DataSourceError::Decode { .. }));
}
