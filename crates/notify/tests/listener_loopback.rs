//! End-to-end listener tests against loopback servers.
//!
//! A real WebSocket server stands in for the STOMP broker and an axum
//! router stands in for the REST endpoints, so the full client path
//! (handshake, subscription, message delivery, backlog, acknowledgement)
//! is exercised without any mocking layer.

use std::sync::{Arc, Mutex};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use tokio_util::sync::CancellationToken;

use ums_notify::{NotificationApi, NotificationEvent, NotificationListener};
use ums_stomp::frame::{Command, Frame};

/// Read the next STOMP frame a fake broker receives from the client.
///
/// Returns `None` when the client closes the connection.
async fn broker_next_frame(ws: &mut WebSocketStream<TcpStream>) -> Option<Frame> {
    while let Some(msg) = ws.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if text.trim_matches(['\r', '\n']).is_empty() {
                    continue;
                }
                return Some(Frame::parse(&text).expect("client frames are well-formed"));
            }
            Ok(Message::Close(_)) | Err(_) => return None,
            Ok(_) => continue,
        }
    }
    None
}

async fn broker_send(ws: &mut WebSocketStream<TcpStream>, frame: Frame) {
    ws.send(Message::Text(frame.encode()))
        .await
        .expect("broker send should succeed");
}

#[tokio::test]
async fn pushed_notification_lands_in_the_table() {
    let socket = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();

    let broker = tokio::spawn(async move {
        let (stream, _) = socket.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        let connect = broker_next_frame(&mut ws).await.expect("CONNECT frame");
        assert_eq!(connect.command, Command::Connect);
        assert_eq!(connect.header("accept-version"), Some("1.2"));
        broker_send(&mut ws, Frame::connected("1.2")).await;

        let subscribe = broker_next_frame(&mut ws).await.expect("SUBSCRIBE frame");
        assert_eq!(subscribe.command, Command::Subscribe);
        assert_eq!(
            subscribe.header("destination"),
            Some("/user/topic/exam-outcome")
        );
        let sub_id = subscribe.header("id").unwrap().to_string();

        let broadcast_sub = broker_next_frame(&mut ws).await.expect("SUBSCRIBE frame");
        assert_eq!(broadcast_sub.header("destination"), Some("/topic/notify"));
        let broadcast_sub_id = broadcast_sub.header("id").unwrap().to_string();

        broker_send(
            &mut ws,
            Frame::message("m-1", &sub_id, "/user/topic/exam-outcome", "Exam passed"),
        )
        .await;
        broker_send(
            &mut ws,
            Frame::message(
                "m-2",
                &broadcast_sub_id,
                "/topic/notify",
                r#"{"content":"Results published"}"#,
            ),
        )
        .await;
        ws.close(None).await.ok();
    });

    let api = NotificationApi::new("http://127.0.0.1:1");
    let mut listener = NotificationListener::connect(&format!("ws://{addr}/ws"), api)
        .await
        .expect("handshake should succeed");
    let mut events = listener.subscribe_events();
    listener.subscribe_exam_outcomes().await.unwrap();
    listener.subscribe_broadcast().await.unwrap();

    // The broker closes after pushing its messages, ending the loop.
    let cancel = CancellationToken::new();
    listener.run(&cancel).await;

    // The user-topic body arrives as plain text, the broadcast body as
    // JSON; both land as rows in delivery order.
    assert_eq!(listener.table().len(), 2);
    assert_eq!(listener.table().rows()[0].message, "Exam passed");
    assert_eq!(listener.table().rows()[1].message, "Results published");

    let mut received = Vec::new();
    let mut disconnected = false;
    while let Ok(event) = events.try_recv() {
        match event {
            NotificationEvent::Received { message, .. } => received.push(message),
            NotificationEvent::Disconnected { .. } => disconnected = true,
            _ => {}
        }
    }
    assert_eq!(received, vec!["Exam passed", "Results published"]);
    assert!(disconnected, "a Disconnected event should have been emitted");

    broker.await.unwrap();
}

#[tokio::test]
async fn backlog_loads_and_acknowledgement_removes_the_tagged_row() {
    // Fake broker: handshake, then drain frames until the client leaves.
    let socket = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let broker_addr = socket.local_addr().unwrap();
    let broker = tokio::spawn(async move {
        let (stream, _) = socket.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let connect = broker_next_frame(&mut ws).await.expect("CONNECT frame");
        assert_eq!(connect.command, Command::Connect);
        broker_send(&mut ws, Frame::connected("1.2")).await;

        // Drain until the client closes so its DISCONNECT + Close
        // handshake completes cleanly.
        let mut published_body = None;
        let mut saw_disconnect = false;
        while let Some(frame) = broker_next_frame(&mut ws).await {
            match frame.command {
                Command::Send => {
                    assert_eq!(frame.header("destination"), Some("/app/notify"));
                    assert_eq!(frame.header("content-type"), Some("application/json"));
                    published_body = Some(frame.body);
                }
                Command::Disconnect => saw_disconnect = true,
                _ => {}
            }
        }
        assert_eq!(
            published_body.as_deref(),
            Some(r#"{"message":"Grades received"}"#)
        );
        assert!(saw_disconnect, "client should send DISCONNECT before closing");
    });

    // Fake REST backend recording read receipts.
    let acknowledged = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&acknowledged);
    let app = Router::new()
        .route(
            "/api/v1/outcome-notifications",
            get(|| async {
                Json(serde_json::json!([
                    {"id": 5, "message": "Exam passed", "createdAt": "2025-06-01T10:15:30"},
                    {"message": "Results published"}
                ]))
            }),
        )
        .route(
            "/api/v1/notifications/{id}/read",
            post(move |Path(id): Path<i64>| {
                let recorder = Arc::clone(&recorder);
                async move {
                    recorder.lock().unwrap().push(id);
                    StatusCode::NO_CONTENT
                }
            }),
        );
    let rest_socket = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let rest_addr = rest_socket.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(rest_socket, app).await.unwrap();
    });

    let api = NotificationApi::new(format!("http://{rest_addr}"));
    let mut listener = NotificationListener::connect(&format!("ws://{broker_addr}/ws"), api)
        .await
        .expect("handshake should succeed");

    let count = listener.load_backlog().await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(listener.table().len(), 2);
    assert!(listener.table().render_html().contains("data-id=\"5\""));

    listener.acknowledge(5).await.unwrap();
    assert_eq!(*acknowledged.lock().unwrap(), vec![5]);
    assert_eq!(listener.table().len(), 1);
    assert_eq!(listener.table().rows()[0].message, "Results published");

    listener.publish("Grades received").await.unwrap();

    listener.disconnect().await.unwrap();
    broker.await.unwrap();
}

#[tokio::test]
async fn single_entry_backlog_renders_exactly_one_row() {
    let socket = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let broker_addr = socket.local_addr().unwrap();
    let broker = tokio::spawn(async move {
        let (stream, _) = socket.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        broker_next_frame(&mut ws).await.expect("CONNECT frame");
        broker_send(&mut ws, Frame::connected("1.2")).await;
        while broker_next_frame(&mut ws).await.is_some() {}
    });

    let app = Router::new().route(
        "/api/v1/outcome-notifications",
        get(|| async { Json(serde_json::json!([{"message": "Exam passed"}])) }),
    );
    let rest_socket = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let rest_addr = rest_socket.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(rest_socket, app).await.unwrap();
    });

    let api = NotificationApi::new(format!("http://{rest_addr}"));
    let mut listener = NotificationListener::connect(&format!("ws://{broker_addr}/ws"), api)
        .await
        .expect("handshake should succeed");

    assert_eq!(listener.load_backlog().await.unwrap(), 1);
    assert_eq!(listener.table().len(), 1);
    assert_eq!(listener.table().render_html(), "<tr><td>Exam passed</td></tr>");

    listener.disconnect().await.unwrap();
    broker.await.unwrap();
}
