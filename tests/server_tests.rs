//! End-to-end tests over a real listener.

mod common;

use kv_relay::http::HttpServer;
use kv_relay::lifecycle::Shutdown;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_serve_and_shutdown() {
    let upstream = common::start_mock_backend(common::posts_json(6)).await;
    let server = HttpServer::new(common::test_config(upstream)).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    let base = format!("http://{addr}");

    let res = client.get(format!("{base}/ping")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "pong");

    let res = client
        .post(format!("{base}/admin"))
        .basic_auth("manu", Some("123"))
        .json(&json!({ "value": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = client.get(format!("{base}/user/manu")).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "user": "manu", "value": "hello" }));

    let res = client
        .post(format!("{base}/admin"))
        .basic_auth("manu", Some("nope"))
        .json(&json!({ "value": "overwritten" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);

    let res = client.get(format!("{base}/posts")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let posts: Vec<Value> = res.json().await.unwrap();
    assert_eq!(posts.len(), 5);
    assert_eq!(posts[0]["userId"], 2);

    let res = client.get(format!("{base}/user/manu")).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["value"], "hello");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
