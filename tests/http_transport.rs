// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP transport using wiremock.

#![cfg(feature = "http")]

mod common;

use automower_lib::protocol::{Frame, HttpConfig, HttpTransport, StaticToken, Transport};
use automower_lib::{AutomowerSession, Error, ProtocolError};
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer) -> HttpTransport<StaticToken> {
    HttpConfig::new("app-key")
        .with_base_url(server.uri())
        .into_transport(StaticToken::new("access-token"))
        .unwrap()
}

// ============================================================================
// HttpTransport Tests
// ============================================================================

mod http_transport {
    use super::*;

    #[tokio::test]
    async fn get_sends_api_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mowers"))
            .and(header("Authorization", "Bearer access-token"))
            .and(header("Authorization-Provider", "husqvarna"))
            .and(header("X-Api-Key", "app-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = transport(&mock_server).get_json("mowers").await.unwrap();
        assert_eq!(response, json!({ "data": [] }));
    }

    #[tokio::test]
    async fn post_sends_json_api_body() {
        let mock_server = MockServer::start().await;
        let body = json!({ "data": { "type": "Pause" } });

        Mock::given(method("POST"))
            .and(path("/mowers/1234/actions"))
            .and(header("Content-Type", "application/vnd.api+json"))
            .and(body_json(&body))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = transport(&mock_server)
            .post_json("mowers/1234/actions", Some(&body))
            .await
            .unwrap();
        assert_eq!(response, json!({}));
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = transport(&mock_server).get_json("mowers").await.unwrap_err();
        assert!(matches!(err, ProtocolError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn forbidden_keeps_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Application not connected"))
            .mount(&mock_server)
            .await;

        let err = transport(&mock_server).get_json("mowers").await.unwrap_err();
        assert!(matches!(err, ProtocolError::Forbidden(ref m) if m == "Application not connected"));
    }

    #[tokio::test]
    async fn server_error_carries_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let err = transport(&mock_server)
            .patch_json("mowers/1234/workAreas/1", Some(&json!({})))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::Api { status: 500, ref message } if message == "Internal Server Error"
        ));
    }

    #[tokio::test]
    async fn non_json_success_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let err = transport(&mock_server).get_json("mowers").await.unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn stream_source_is_taken_once() {
        let mock_server = MockServer::start().await;
        let (tx, rx) = mpsc::channel(4);
        let transport = transport(&mock_server).with_stream_source(rx);

        let mut stream = transport.open_stream().await.unwrap();
        tx.send(Frame::Text(String::new())).await.unwrap();
        assert_eq!(stream.next().await, Some(Frame::Text(String::new())));

        assert!(matches!(
            transport.open_stream().await,
            Err(ProtocolError::StreamUnavailable)
        ));
    }
}

// ============================================================================
// Session over HTTP
// ============================================================================

mod session_over_http {
    use super::*;

    #[tokio::test]
    async fn refresh_then_command() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mowers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(common::fleet()))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("/mowers/{}/errors/confirm", common::HIGH_ID)))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;

        let session = AutomowerSession::new(transport(&mock_server));
        session.refresh().await.unwrap();

        assert_eq!(session.data().len(), 2);
        session.confirm_error(common::HIGH_ID).await.unwrap();
    }

    #[tokio::test]
    async fn message_log_is_fetched_per_mower() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/mowers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(common::fleet()))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/mowers/{}/messages", common::LOW_ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(common::message_log(
                common::LOW_ID,
                &[json!({ "time": 1_728_034_996, "code": 3, "severity": "WARNING",
                          "latitude": 57.7, "longitude": 14.1 })],
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let session = AutomowerSession::new(transport(&mock_server));
        session.refresh().await.unwrap();
        let messages = session.messages(common::LOW_ID).await.unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].error_key().as_deref(), Some("wrong_loop_signal"));
    }

    #[tokio::test]
    async fn expired_token_surfaces_as_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let session = AutomowerSession::new(transport(&mock_server));
        let err = session.refresh().await.unwrap_err();

        assert!(err.is_auth_error());
        assert!(matches!(err, Error::Protocol(ProtocolError::AuthenticationFailed)));
    }
}
