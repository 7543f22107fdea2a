use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use todo_server::{build_router, AppConfig, AppState, SqliteTodoRepository, SystemClock};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn start_server() -> SocketAddr {
    let repository = Arc::new(
        SqliteTodoRepository::open_in_memory(Arc::new(SystemClock)).expect("open store"),
    );

    let config = AppConfig {
        descriptions_path: concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/assets/api-descriptions.json"
        )
        .into(),
        ..AppConfig::default()
    };
    let app = build_router(AppState::new(repository, &config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    addr
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (u16, String, String) {
    let request = match body {
        Some(payload) => format!(
            "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
            payload.len()
        ),
        None => {
            format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n")
        }
    };

    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");

    let (head, payload) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");

    (status, head.to_string(), payload.to_string())
}

fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.eq_ignore_ascii_case(name).then(|| value.trim())
    })
}

fn parse_json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("invalid json body {body:?}: {e}"))
}

#[tokio::test]
async fn can_manage_todo_items_with_the_api() {
    let addr = start_server().await;

    // No items to start with.
    let (status, _, body) = send_raw(addr, "GET", "/api/items", None).await;
    assert_eq!(status, 200);
    let list = parse_json(&body);
    assert_eq!(list["items"].as_array().expect("items").len(), 0);

    // Create an item.
    let (status, head, body) =
        send_raw(addr, "POST", "/api/items", Some(r#"{"text":"Buy eggs"}"#)).await;
    assert_eq!(status, 201);
    let created = parse_json(&body);
    let id = created["id"].as_str().expect("created id").to_string();
    let item_path = format!("/api/items/{id}");
    assert_eq!(header(&head, "location"), Some(item_path.as_str()));

    // Fetch it back.
    let (status, _, body) = send_raw(addr, "GET", &item_path, None).await;
    assert_eq!(status, 200);
    let item = parse_json(&body);
    assert_eq!(item["id"], id.as_str());
    assert_eq!(item["text"], "Buy eggs");
    assert_eq!(item["isCompleted"], false);
    assert!(item["lastUpdated"].as_str().is_some_and(|s| !s.is_empty()));

    // Complete it.
    let (status, _, _) =
        send_raw(addr, "POST", &format!("{item_path}/complete"), Some("{}")).await;
    assert_eq!(status, 204);

    let (status, _, body) = send_raw(addr, "GET", &item_path, None).await;
    assert_eq!(status, 200);
    let item = parse_json(&body);
    assert_eq!(item["isCompleted"], true);

    // Completing again is a 400 with the exact detail string.
    let (status, head, body) =
        send_raw(addr, "POST", &format!("{item_path}/complete"), Some("{}")).await;
    assert_eq!(status, 400);
    assert_eq!(
        header(&head, "content-type"),
        Some("application/problem+json")
    );
    let problem = parse_json(&body);
    assert_eq!(problem["detail"], "Item already completed.");
    assert_eq!(problem["title"], "Bad Request");
    assert_eq!(problem["status"], 400);
    assert_eq!(
        problem["type"],
        "https://tools.ietf.org/html/rfc7231#section-6.5.1"
    );
    assert!(problem.get("instance").is_none());

    // The completed item is listed last.
    let (_, _, body) = send_raw(addr, "POST", "/api/items", Some(r#"{"text":"Walk dog"}"#)).await;
    let second_id = parse_json(&body)["id"].as_str().expect("second id").to_string();

    let (status, _, body) = send_raw(addr, "GET", "/api/items", None).await;
    assert_eq!(status, 200);
    let list = parse_json(&body);
    let items = list["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], second_id.as_str());
    assert_eq!(items[1]["id"], id.as_str());
    assert_eq!(items[1]["isCompleted"], true);

    // Delete it.
    let (status, _, _) = send_raw(addr, "DELETE", &item_path, None).await;
    assert_eq!(status, 204);

    // Deleting or fetching again reports not found.
    let (status, _, body) = send_raw(addr, "DELETE", &item_path, None).await;
    assert_eq!(status, 404);
    assert_eq!(parse_json(&body)["detail"], "Item not found.");

    let (status, _, body) = send_raw(addr, "GET", &item_path, None).await;
    assert_eq!(status, 404);
    let problem = parse_json(&body);
    assert_eq!(problem["detail"], "Item not found.");
    assert_eq!(
        problem["type"],
        "https://tools.ietf.org/html/rfc7231#section-6.5.4"
    );
}

#[tokio::test]
async fn creating_an_item_with_no_text_is_a_bad_request() {
    let addr = start_server().await;

    for payload in [r#"{"text":""}"#, r#"{"text":"   "}"#] {
        let (status, head, body) = send_raw(addr, "POST", "/api/items", Some(payload)).await;
        assert_eq!(status, 400);
        assert_eq!(
            header(&head, "content-type"),
            Some("application/problem+json")
        );

        let problem = parse_json(&body);
        assert_eq!(problem["detail"], "No item text specified.");
        assert_eq!(problem["title"], "Bad Request");
        assert_eq!(
            problem["type"],
            "https://tools.ietf.org/html/rfc7231#section-6.5.1"
        );
    }
}

#[tokio::test]
async fn completing_a_missing_item_is_not_found() {
    let addr = start_server().await;

    let (status, _, body) = send_raw(
        addr,
        "POST",
        "/api/items/a03952ca-880e-4af7-9cfa-630be0feb4a5/complete",
        Some("{}"),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(parse_json(&body)["detail"], "Item not found.");
}

#[tokio::test]
async fn all_three_documents_are_served() {
    let addr = start_server().await;

    for (path, backend) in [
        ("/api-docs/openapi.json", "utoipa"),
        ("/oas3/v1.json", "oas3"),
        ("/openapi/v1.json", "schemars"),
    ] {
        let (status, _, body) = send_raw(addr, "GET", path, None).await;
        assert_eq!(status, 200, "backend: {backend}");

        let document = parse_json(&body);
        let title = document["info"]["title"].as_str().expect("title");
        assert_eq!(title, format!("Todo API ({backend})"));
        assert!(
            document["paths"]["/api/items"]["get"].is_object(),
            "backend: {backend}"
        );
    }
}
