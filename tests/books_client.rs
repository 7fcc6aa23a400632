//! Book client against a mock volume search server.

use book_advisor::transport::TransportError;
use book_advisor::{Book, BookClient, BookSettings, Error, PrintType, UNKNOWN_AUTHOR};
use mockito::{Matcher, Server, ServerGuard};
use std::time::Duration;
use tokio::net::TcpListener;

const LOTR: &str = r#"{
  "kind": "books#volumes",
  "totalItems": 2,
  "items": [
    {"id": "a1", "volumeInfo": {"title": "The Fellowship of the Ring", "authors": ["J. R. R. Tolkien"]}},
    {"id": "a2", "volumeInfo": {"title": "The Lord of the Rings: Companion"}}
  ]
}"#;

async fn client_for(server: &ServerGuard) -> BookClient {
    let settings = BookSettings::new(format!("{}/books/v1/volumes", server.url()), "test-key");
    BookClient::new(&settings).expect("Failed to build client")
}

#[tokio::test]
async fn test_get_books_parses_results_in_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "The Lord of the Rings".into()),
            Matcher::UrlEncoded("key".into(), "test-key".into()),
            Matcher::UrlEncoded("printType".into(), "books".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(LOTR)
        .create_async()
        .await;

    let books = client_for(&server)
        .await
        .get_books("The Lord of the Rings")
        .await
        .expect("search failed");

    mock.assert_async().await;
    assert_eq!(
        books,
        vec![
            Book::new("The Fellowship of the Ring", "J. R. R. Tolkien"),
            Book::new("The Lord of the Rings: Companion", UNKNOWN_AUTHOR),
        ]
    );
}

#[tokio::test]
async fn test_title_reaches_server_unchanged() {
    let title = "Властелин Колец & friends?";
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::UrlEncoded("q".into(), title.into()))
        .with_status(200)
        .with_body(r#"{"items":[]}"#)
        .create_async()
        .await;

    let books = client_for(&server).await.get_books(title).await.unwrap();

    mock.assert_async().await;
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_configured_print_type_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::UrlEncoded("printType".into(), "magazines".into()))
        .with_status(200)
        .with_body(r#"{"items":[{"volumeInfo":{"title":"Wired"}}]}"#)
        .create_async()
        .await;

    let settings = BookSettings::new(format!("{}/books/v1/volumes", server.url()), "test-key")
        .with_print_type(PrintType::Magazines);
    let books = BookClient::new(&settings).unwrap().get_books("Wired").await.unwrap();

    mock.assert_async().await;
    assert_eq!(books.len(), 1);
}

#[tokio::test]
async fn test_non_ok_status_is_service_error_even_with_valid_body() {
    for status in [201, 404, 429, 500] {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/books/v1/volumes")
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(LOTR)
            .create_async()
            .await;

        let err = client_for(&server).await.get_books("Dune").await.unwrap_err();
        match err {
            Error::ApiService { status: got, .. } => assert_eq!(got, Some(status as u16)),
            other => panic!("Expected ApiService for {}, got {:?}", status, other),
        }
    }
}

#[tokio::test]
async fn test_invalid_json_is_service_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>quota page</html>")
        .create_async()
        .await;

    let err = client_for(&server).await.get_books("Dune").await.unwrap_err();
    assert!(matches!(err, Error::ApiService { status: None, .. }));
}

#[tokio::test]
async fn test_missing_title_is_book_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"items":[{"volumeInfo":{"authors":["X"]}}]}"#)
        .create_async()
        .await;

    let err = client_for(&server).await.get_books("X").await.unwrap_err();
    assert!(matches!(err, Error::Book { .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let settings = BookSettings::new("http://127.0.0.1:1/books/v1/volumes", "test-key");
    let err = BookClient::new(&settings)
        .unwrap()
        .get_books("Dune")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_silent_server_times_out_as_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _silent = tokio::spawn(async move {
        // hold the connection open without ever answering
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        drop(socket);
    });

    let settings = BookSettings::new(format!("http://{}/books/v1/volumes", addr), "test-key")
        .with_timeout(Duration::from_millis(300));
    let err = BookClient::new(&settings)
        .unwrap()
        .get_books("Dune")
        .await
        .unwrap_err();

    match err {
        Error::Transport(TransportError::Timeout(after)) => {
            assert_eq!(after, Duration::from_millis(300))
        }
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sentinel_author_for_volume_without_authors() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/books/v1/volumes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"items":[{"volumeInfo":{"title":"Dune"}}]}"#)
        .create_async()
        .await;

    let books = client_for(&server).await.get_books("Dune").await.unwrap();
    assert_eq!(books, vec![Book::new("Dune", "Автор не указан")]);
}
