//! HTTP tests for the gateway routes against an in-memory engine.

mod common;

use std::io::Write;
use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};
use tempfile::{NamedTempFile, TempDir};

use common::{api_key, cloud_id, rejected_api_key, test_context, TestContext};
use search_gateway::ServerConfig;
use search_gateway_repository::schema;

fn upload_form(file: &[u8], index_name: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("cloud_id", cloud_id())
        .add_text("api_key", api_key())
        .add_text("index_name", index_name.to_string())
        .add_part(
            "file",
            Part::bytes(file.to_vec())
                .file_name("cars.json")
                .mime_type("application/json"),
        )
}

fn config_with_upload_dir(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        upload_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    }
}

async fn search(ctx: &TestContext, index: &str, field: &str, value: &str) -> axum_test::TestResponse {
    ctx.server
        .get("/search")
        .add_query_param("cloud_id", cloud_id())
        .add_query_param("api_key", api_key())
        .add_query_param("index_name", index)
        .add_query_param("keyword", field)
        .add_query_param("mname", value)
        .await
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let ctx = test_context(ServerConfig::default());

        let response = ctx.server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
        assert_eq!(ctx.connector.connects.load(Ordering::SeqCst), 0);
    }
}

mod load_data {
    use super::*;

    #[tokio::test]
    async fn test_upload_then_search_finds_record() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(config_with_upload_dir(&dir));

        let response = ctx
            .server
            .post("/load-data")
            .multipart(upload_form(
                br#"[{"Name":"civic","Miles_per_Gallon":32.0}]"#,
                "cars2",
            ))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Data from 'cars.json' indexed successfully!");
        assert_eq!(body["index"], "cars2");
        assert_eq!(body["total"], 1);
        assert_eq!(body["succeeded"], 1);
        assert_eq!(body["failed"], 0);

        let response = search(&ctx, "cars2", "Name", "civic").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "found");
        assert_eq!(body["records"][0]["Name"], "civic");
        assert_eq!(body["records"][0]["Miles_per_Gallon"], 32.0);
    }

    #[tokio::test]
    async fn test_upload_provisions_car_mapping_once() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(config_with_upload_dir(&dir));

        for _ in 0..2 {
            ctx.server
                .post("/load-data")
                .multipart(upload_form(br#"[{"Name":"civic"}]"#, "cars"))
                .await
                .assert_status_ok();
        }

        assert_eq!(ctx.engine.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(ctx.engine.mapping("cars"), Some(schema::index_mappings()));
        assert_eq!(ctx.engine.records("cars").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_upload_indexes_nothing() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(config_with_upload_dir(&dir));

        let response = ctx
            .server
            .post("/load-data")
            .multipart(upload_form(br#"{"Name":"civic"}"#, "cars"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("JSON array"));
        assert_eq!(ctx.engine.bulk_calls.load(Ordering::SeqCst), 0);
        assert!(ctx.engine.records("cars").is_none());
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(config_with_upload_dir(&dir));

        let without_file = MultipartForm::new()
            .add_text("cloud_id", cloud_id())
            .add_text("api_key", api_key())
            .add_text("index_name", "cars");
        let response = ctx.server.post("/load-data").multipart(without_file).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Missing required field 'file'"
        );

        let without_index = MultipartForm::new()
            .add_text("cloud_id", cloud_id())
            .add_text("api_key", api_key())
            .add_part("file", Part::bytes(b"[]".to_vec()).file_name("cars.json"));
        let response = ctx.server.post("/load-data").multipart(without_index).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Missing required field 'index_name'"
        );

        assert_eq!(ctx.connector.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_multipart_body_gets_json_error() {
        let ctx = test_context(ServerConfig::default());

        let response = ctx
            .server
            .post("/load-data")
            .json(&json!({ "cloud_id": cloud_id(), "index_name": "cars" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert!(body["error"].is_string());
        assert_eq!(ctx.connector.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upload_files_are_removed_after_request() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(config_with_upload_dir(&dir));

        ctx.server
            .post("/load-data")
            .multipart(upload_form(br#"[{"Name":"civic"}]"#, "cars"))
            .await
            .assert_status_ok();
        ctx.server
            .post("/load-data")
            .multipart(upload_form(b"not json", "cars"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(config_with_upload_dir(&dir));

        let form = MultipartForm::new()
            .add_text("cloud_id", cloud_id())
            .add_text("api_key", rejected_api_key())
            .add_text("index_name", "cars")
            .add_part("file", Part::bytes(b"[]".to_vec()).file_name("cars.json"));
        let response = ctx.server.post("/load-data").multipart(form).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(ctx.engine.records("cars").is_none());
    }

    #[tokio::test]
    async fn test_malformed_cloud_id() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(config_with_upload_dir(&dir));

        let form = MultipartForm::new()
            .add_text("cloud_id", "not-a-cloud-id")
            .add_text("api_key", api_key())
            .add_text("index_name", "cars")
            .add_part("file", Part::bytes(b"[]".to_vec()).file_name("cars.json"));
        let response = ctx.server.post("/load-data").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_larger_than_limit() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(ServerConfig {
            max_upload_bytes: 64,
            ..config_with_upload_dir(&dir)
        });

        let records: Vec<Value> = (0..50).map(|i| json!({ "Name": format!("car {}", i) })).collect();
        let payload = serde_json::to_vec(&records).unwrap();
        let response = ctx
            .server
            .post("/load-data")
            .multipart(upload_form(&payload, "cars"))
            .await;

        assert!(response.status_code().is_client_error());
        assert!(ctx.engine.records("cars").is_none());
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn test_search_empty_index_returns_empty() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(config_with_upload_dir(&dir));
        ctx.server
            .post("/load-data")
            .multipart(upload_form(b"[]", "cars"))
            .await
            .assert_status_ok();

        let response = search(&ctx, "cars", "Name", "civic").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "status": "empty" }));
    }

    #[tokio::test]
    async fn test_search_missing_parameter() {
        let ctx = test_context(ServerConfig::default());

        let response = ctx
            .server
            .get("/search")
            .add_query_param("cloud_id", cloud_id())
            .add_query_param("api_key", api_key())
            .add_query_param("index_name", "cars")
            .add_query_param("keyword", "Name")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Missing required field 'mname'"
        );
    }

    #[tokio::test]
    async fn test_search_blank_parameter_is_missing() {
        let ctx = test_context(ServerConfig::default());

        let response = ctx
            .server
            .get("/search")
            .add_query_param("cloud_id", "")
            .add_query_param("api_key", api_key())
            .add_query_param("index_name", "cars")
            .add_query_param("keyword", "Name")
            .add_query_param("mname", "civic")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Missing required field 'cloud_id'"
        );
        assert_eq!(ctx.connector.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_malformed_query_gets_json_error() {
        let ctx = test_context(ServerConfig::default());

        let response = ctx
            .server
            .get("/search")
            .add_query_param("cloud_id", cloud_id())
            .add_query_param("keyword", "Name")
            .add_query_param("keyword", "Origin")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
        assert_eq!(ctx.connector.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_unknown_field() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(config_with_upload_dir(&dir));
        ctx.server
            .post("/load-data")
            .multipart(upload_form(br#"[{"Name":"civic"}]"#, "cars"))
            .await
            .assert_status_ok();

        let response = search(&ctx, "cars", "Colour", "red").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn test_search_missing_index_is_engine_error() {
        let ctx = test_context(ServerConfig::default());

        let response = search(&ctx, "nowhere", "Name", "civic").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_search_bounds_results() {
        let dir = TempDir::new().unwrap();
        let ctx = test_context(ServerConfig {
            search_max_hits: 3,
            ..config_with_upload_dir(&dir)
        });
        let records: Vec<Value> = (0..8).map(|_| json!({ "Origin": "USA" })).collect();
        ctx.server
            .post("/load-data")
            .multipart(upload_form(&serde_json::to_vec(&records).unwrap(), "cars"))
            .await
            .assert_status_ok();

        let response = search(&ctx, "cars", "Origin", "USA").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total"], 8);
        assert_eq!(body["records"].as_array().unwrap().len(), 3);
    }
}

mod catalog {
    use super::*;

    fn catalog_file(contents: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.to_string().as_bytes()).unwrap();
        file
    }

    fn catalog_config(data_file: &NamedTempFile) -> ServerConfig {
        ServerConfig {
            catalog_cloud_id: Some(cloud_id()),
            catalog_api_key: Some(api_key()),
            catalog_data_file: data_file.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_catalog_search_finds_car() {
        let data = catalog_file(&json!([
            { "Name": "chevrolet chevelle malibu", "Cylinders": 8, "Origin": "USA" },
            { "Name": "toyota corolla", "Cylinders": 4, "Origin": "Japan" }
        ]));
        let ctx = test_context(catalog_config(&data));

        let response = ctx
            .server
            .post("/")
            .json(&json!({ "searchTerm": "  corolla " }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["result"]["status"], "found");
        assert_eq!(body["result"]["records"][0]["Name"], "toyota corolla");
        assert!(ctx.engine.mapping("cars").is_some());
    }

    #[tokio::test]
    async fn test_catalog_blank_term_uses_default() {
        let data = catalog_file(&json!([{ "Name": "default-car" }, { "Name": "civic" }]));
        let ctx = test_context(catalog_config(&data));

        let response = ctx.server.post("/").json(&json!({ "searchTerm": "   " })).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["result"]["records"][0]["Name"], "default-car");
        assert_eq!(body["result"]["total"], 1);
    }

    #[tokio::test]
    async fn test_catalog_requires_search_term() {
        let data = catalog_file(&json!([]));
        let ctx = test_context(catalog_config(&data));

        let response = ctx.server.post("/").json(&json!({ "term": "civic" })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Invalid request, 'searchTerm' is required"
        );
        assert_eq!(ctx.connector.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_catalog_without_credentials() {
        let ctx = test_context(ServerConfig::default());

        let response = ctx.server.post("/").json(&json!({ "searchTerm": "civic" })).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ctx.connector.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_catalog_missing_data_file() {
        let ctx = test_context(ServerConfig {
            catalog_cloud_id: Some(cloud_id()),
            catalog_api_key: Some(api_key()),
            catalog_data_file: "/definitely/not/here.json".into(),
            ..Default::default()
        });

        let response = ctx.server.post("/").json(&json!({ "searchTerm": "civic" })).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
