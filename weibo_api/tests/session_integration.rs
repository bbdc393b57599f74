use weibo_api::{endpoints, Error, Session};
use wiremock::matchers::{header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_before_cookies_is_uninitialized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = Session::with_base_url(&mock_server.uri()).unwrap();
    for _ in 0..3 {
        let result = session.get(&endpoints::profile(5)).await;
        assert!(matches!(result, Err(Error::Uninitialized)));
    }
}

#[tokio::test]
async fn get_sends_cookie_and_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/u/1669879400"))
        .and(query_param("is_all", "1"))
        .and(header("cookie", "SUB=_2A25abc"))
        .and(header_regex("user-agent", r"^Mozilla/5\.0 \(Macintosh; Intel Mac OS X"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>feed</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = Session::with_base_url(&mock_server.uri()).unwrap();
    assert_eq!(session.load_cookies("SUB=_2A25abc"), 1);

    let body = session.get(&endpoints::profile(1669879400)).await.unwrap();
    assert_eq!(body, "<html>feed</html>");
}

#[tokio::test]
async fn get_non_200_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/u/5"))
        .respond_with(ResponseTemplate::new(414).set_body_string("<html>Request-URI Too Large</html>"))
        .mount(&mock_server)
        .await;

    let session = Session::with_base_url(&mock_server.uri()).unwrap();
    session.load_cookies("SUB=x");

    match session.get(&endpoints::profile(5)).await {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 414);
            assert_eq!(body, "<html>Request-URI Too Large</html>");
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn get_204_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/aj/v6/comment/big"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let session = Session::with_base_url(&mock_server.uri()).unwrap();
    session.load_cookies("SUB=x");

    let result = session.get(&endpoints::comments(42)).await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 204, .. })));
}

#[tokio::test]
async fn get_connection_refused() {
    // Bind then drop a listener so the port is very likely closed.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let session = Session::with_base_url(&uri).unwrap();
    session.load_cookies("SUB=x");

    let err = session.get(&endpoints::profile(5)).await.unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
    assert!(err.is_transient());
}
