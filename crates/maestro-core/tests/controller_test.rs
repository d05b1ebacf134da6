#![allow(clippy::unwrap_used)]
// End-to-end pipeline tests for `Controller` against a wiremock cloud.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use maestro_core::{
    ApplianceSelector, Controller, ControllerConfig, CoreError, OperatingMode, StoveCommand, Switch,
    TlsVerification,
};

// ── Helpers ─────────────────────────────────────────────────────────

const LOGIN: &str = "/hlapi/v1.0/Authorization/Login";
const APPLIANCES: &str = "/hlapi/v1.0/Nav/FirstVisibleObjectsPaginated";
const MODEL: &str = "/hlapi/v1.0/Model/model-1";
const PING: &str = "/mcz/v1.0/Program/Ping/stove-1";
const ACTIVATE: &str = "/mcz/v1.0/Program/ActivateProgram/stove-1";

fn controller(server: &MockServer, appliance: ApplianceSelector) -> Controller {
    Controller::new(ControllerConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        tenant_id: "tenant-test".into(),
        username: "user@example.com".into(),
        password: "hunter2".to_string().into(),
        tls: TlsVerification::SystemDefaults,
        timeout: Duration::from_secs(5),
        appliance,
    })
    .unwrap()
}

fn node(id: &str, name: &str) -> Value {
    json!({
        "Node": {
            "Id": id,
            "ModelId": "model-1",
            "SensorSetTypeId": "sst-1",
            "Name": name
        }
    })
}

async fn mount_session(server: &MockServer, appliances: Value) {
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Token": "tok" })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(APPLIANCES))
        .respond_with(ResponseTemplate::new(200).set_body_json(appliances))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(PING))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

async fn mount_model(server: &MockServer, schema: Value) {
    Mock::given(method("GET"))
        .and(path(MODEL))
        .respond_with(ResponseTemplate::new(200).set_body_json(schema))
        .mount(server)
        .await;
}

fn power_schema() -> Value {
    json!({
        "ModelName": "Test Stove",
        "ModelConfigurations": [{
            "ConfigurationId": "cfg-power",
            "ConfigurationName": "Power",
            "Configurations": [{
                "SensorId": "sensor-power",
                "SensorName": "power_enabled",
                "Type": "Int",
                "Mappings": { "on": 1, "off": 40 }
            }]
        }]
    })
}

// ── Connection ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_account_is_no_appliance() {
    let server = MockServer::start().await;
    mount_session(&server, json!([])).await;

    Mock::given(method("GET"))
        .and(path(MODEL))
        .respond_with(ResponseTemplate::new(200).set_body_json(power_schema()))
        .expect(0)
        .mount(&server)
        .await;

    let result = controller(&server, ApplianceSelector::First).connect().await;

    assert!(
        matches!(result, Err(CoreError::NoAppliance)),
        "expected NoAppliance, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connect_selects_named_appliance() {
    let server = MockServer::start().await;
    mount_session(
        &server,
        json!([node("stove-0", "Kitchen"), node("stove-1", "Living Room")]),
    )
    .await;

    let appliance = controller(&server, ApplianceSelector::Named("living room".into()))
        .connect()
        .await
        .unwrap();

    assert_eq!(appliance.id, "stove-1");
    assert_eq!(appliance.display_name(), "Living Room");
}

#[tokio::test]
async fn test_connect_unknown_name_is_not_found() {
    let server = MockServer::start().await;
    mount_session(&server, json!([node("stove-1", "Kitchen")])).await;

    let result = controller(&server, ApplianceSelector::Named("garage".into()))
        .connect()
        .await;

    assert!(matches!(result, Err(CoreError::ApplianceNotFound { .. })));
}

#[tokio::test]
async fn test_bad_credentials_are_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let result = controller(&server, ApplianceSelector::First).connect().await;

    assert!(matches!(result, Err(CoreError::AuthenticationFailed { .. })));
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_power_on_sends_mapped_value() {
    let server = MockServer::start().await;
    mount_session(&server, json!([node("stove-1", "Living Room")])).await;
    mount_model(&server, power_schema()).await;

    Mock::given(method("POST"))
        .and(path(ACTIVATE))
        .and(body_json(json!({
            "ModelId": "model-1",
            "ConfigurationId": "cfg-power",
            "SensorSetTypeId": "sst-1",
            "Commands": [{ "SensorId": "sensor-power", "Value": 1 }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Result": "OK" })))
        .expect(1)
        .mount(&server)
        .await;

    let ctrl = controller(&server, ApplianceSelector::First);
    let appliance = ctrl.connect().await.unwrap();
    let outcome = ctrl
        .execute(&appliance, &StoveCommand::Power(Switch::On))
        .await
        .unwrap();

    assert_eq!(outcome.command, "power");
    assert_eq!(outcome.argument, "on");
    assert_eq!(outcome.value, json!(1));
    assert_eq!(outcome.sensor.sensor_id, "sensor-power");
    assert_eq!(outcome.acknowledgment, json!({ "Result": "OK" }));
}

#[tokio::test]
async fn test_execute_does_not_ping() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Token": "tok" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(APPLIANCES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([node("stove-1", "Stove")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(PING))
        .respond_with(ResponseTemplate::new(500).set_body_string("stove offline"))
        .expect(0)
        .mount(&server)
        .await;
    mount_model(&server, power_schema()).await;
    Mock::given(method("POST"))
        .and(path(ACTIVATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Result": "OK" })))
        .expect(1)
        .mount(&server)
        .await;

    let ctrl = controller(&server, ApplianceSelector::First);
    let appliance = ctrl.connect().await.unwrap();
    let outcome = ctrl
        .execute(&appliance, &StoveCommand::Power(Switch::On))
        .await
        .unwrap();

    assert_eq!(outcome.value, json!(1));
    let model = ctrl.model(&appliance).await.unwrap();
    assert_eq!(model.model_name.as_deref(), Some("Test Stove"));
}

#[tokio::test]
async fn test_missing_sensor_is_sensor_not_found() {
    let server = MockServer::start().await;
    mount_session(&server, json!([node("stove-1", "Living Room")])).await;
    mount_model(&server, power_schema()).await;

    Mock::given(method("POST"))
        .and(path(ACTIVATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let ctrl = controller(&server, ApplianceSelector::First);
    let appliance = ctrl.connect().await.unwrap();
    let result = ctrl
        .execute(&appliance, &StoveCommand::Mode(OperatingMode::Comfort))
        .await;

    assert!(matches!(
        result,
        Err(CoreError::SensorNotFound { ref sensor }) if sensor == "mod_lav_att"
    ));
}

#[tokio::test]
async fn test_null_acknowledgment_is_rejected() {
    let server = MockServer::start().await;
    mount_session(&server, json!([node("stove-1", "Living Room")])).await;
    mount_model(&server, power_schema()).await;

    Mock::given(method("POST"))
        .and(path(ACTIVATE))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let ctrl = controller(&server, ApplianceSelector::First);
    let appliance = ctrl.connect().await.unwrap();
    let result = ctrl
        .execute(&appliance, &StoveCommand::Power(Switch::Off))
        .await;

    assert!(matches!(
        result,
        Err(CoreError::CommandRejected { ref command, .. }) if command == "power"
    ));
}

#[tokio::test]
async fn test_program_endpoint_error_is_rejected() {
    let server = MockServer::start().await;
    mount_session(&server, json!([node("stove-1", "Living Room")])).await;
    mount_model(&server, power_schema()).await;

    Mock::given(method("POST"))
        .and(path(ACTIVATE))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad sensor value"))
        .mount(&server)
        .await;

    let ctrl = controller(&server, ApplianceSelector::First);
    let appliance = ctrl.connect().await.unwrap();
    let result = ctrl
        .execute(&appliance, &StoveCommand::Power(Switch::On))
        .await;

    assert!(matches!(result, Err(CoreError::CommandRejected { .. })));
}

#[tokio::test]
async fn test_invalid_argument_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MODEL))
        .respond_with(ResponseTemplate::new(200).set_body_json(power_schema()))
        .expect(0)
        .mount(&server)
        .await;

    let ctrl = controller(&server, ApplianceSelector::First);
    let appliance = maestro_core::Appliance {
        id: "stove-1".into(),
        model_id: "model-1".into(),
        sensor_set_type_id: "sst-1".into(),
        name: None,
        unique_code: None,
    };
    let result = ctrl
        .execute(&appliance, &StoveCommand::Temperature(40.0))
        .await;

    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

// ── Live data ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_merges_state_and_status() {
    let server = MockServer::start().await;
    mount_session(&server, json!([node("stove-1", "Living Room")])).await;

    Mock::given(method("GET"))
        .and(path("/mcz/v1.0/Appliance/stove-1/State"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "IsConnected": true, "temp_fumi": 120 })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mcz/v1.0/Appliance/stove-1/Status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "stato_stufa": 31, "set_amb1": 21.5 })),
        )
        .mount(&server)
        .await;

    let ctrl = controller(&server, ApplianceSelector::First);
    let appliance = ctrl.connect().await.unwrap();
    let status = ctrl.status(&appliance).await.unwrap();

    assert!(status.connected);
    assert!(status.is_on);
    assert_eq!(status.state_label, "On");
    assert_eq!(status.target_temperature, Some(21.5));
    assert_eq!(status.flue_temperature, Some(120.0));
}
