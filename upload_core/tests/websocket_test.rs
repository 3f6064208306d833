use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use upload_core::{
    create_app, websocket::WebSocketMessage, AppState, FileDescriptor, FileStatus,
    InstantScheduler, SimulatorConfig, UploadSimulator,
};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn spawn_server() -> (SocketAddr, UploadSimulator) {
    let simulator = UploadSimulator::start(SimulatorConfig::default(), Arc::new(InstantScheduler));
    let app = create_app(AppState::new(simulator.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, simulator)
}

async fn connect(addr: SocketAddr) -> Client {
    let (client, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    client
}

async fn next_message(client: &mut Client) -> WebSocketMessage {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("message within timeout")
            .expect("stream open")
            .expect("valid frame");

        if let Message::Text(text) = frame {
            return WebSocketMessage::from_json(&text).unwrap();
        }
    }
}

#[tokio::test]
async fn test_connection_greeting_and_ping() {
    let (addr, _simulator) = spawn_server().await;
    let mut client = connect(addr).await;

    assert!(matches!(next_message(&mut client).await, WebSocketMessage::Connected { .. }));
    match next_message(&mut client).await {
        WebSocketMessage::Snapshot { files, active_stage } => {
            assert!(files.is_empty());
            assert_eq!(active_stage, None);
        }
        other => panic!("expected snapshot, got {:?}", other),
    }

    client
        .send(Message::Text(r#"{"type":"Ping"}"#.to_string()))
        .await
        .unwrap();
    assert_eq!(next_message(&mut client).await, WebSocketMessage::Pong);

    client.send(Message::Text("hello".to_string())).await.unwrap();
    assert!(matches!(next_message(&mut client).await, WebSocketMessage::Error { .. }));
}

#[tokio::test]
async fn test_snapshot_includes_existing_files() {
    let (addr, simulator) = spawn_server().await;
    let registered = simulator
        .submit(vec![FileDescriptor::new("a.txt", 1, "text/plain")])
        .unwrap();
    simulator.wait_idle().await;

    let mut client = connect(addr).await;
    assert!(matches!(next_message(&mut client).await, WebSocketMessage::Connected { .. }));
    match next_message(&mut client).await {
        WebSocketMessage::Snapshot { files, .. } => {
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].id, registered[0].id);
            assert_eq!(files[0].status, FileStatus::Success);
        }
        other => panic!("expected snapshot, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upload_events_are_forwarded() {
    let (addr, simulator) = spawn_server().await;
    let mut client = connect(addr).await;

    assert!(matches!(next_message(&mut client).await, WebSocketMessage::Connected { .. }));
    assert!(matches!(next_message(&mut client).await, WebSocketMessage::Snapshot { .. }));

    let registered = simulator
        .submit(vec![FileDescriptor::new("photo.png", 2_000_000, "image/png")])
        .unwrap();
    let id = registered[0].id.clone();

    match next_message(&mut client).await {
        WebSocketMessage::FileAdded(file) => {
            assert_eq!(file.id, id);
            assert_eq!(file.status, FileStatus::Pending);
        }
        other => panic!("expected file added, got {:?}", other),
    }

    let mut saw_transfer_stage = false;
    loop {
        match next_message(&mut client).await {
            WebSocketMessage::StageChanged { stage: Some(stage) } => {
                saw_transfer_stage |= stage == upload_core::PipelineStage::Transfer;
            }
            WebSocketMessage::FileUpdated(file) if file.status == FileStatus::Success => {
                assert_eq!(file.id, id);
                assert_eq!(file.progress, 100);
                break;
            }
            WebSocketMessage::Lagged { .. } => panic!("subscriber lagged"),
            _ => {}
        }
    }
    assert!(saw_transfer_stage);

    assert_eq!(
        next_message(&mut client).await,
        WebSocketMessage::StageChanged { stage: Some(upload_core::PipelineStage::Storage) }
    );
    assert_eq!(
        next_message(&mut client).await,
        WebSocketMessage::StageChanged { stage: None }
    );

    simulator.remove(&id).unwrap();
    assert_eq!(next_message(&mut client).await, WebSocketMessage::FileRemoved { id });
}
