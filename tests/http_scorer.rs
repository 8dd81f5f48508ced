use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use bank_ranker::{BankField, BankMetrics, HttpScorer, RankerError, Scorer};

struct Captured {
    request_line: String,
    content_type: Option<String>,
    body: String,
}

/// Answer exactly one request with `status` and `body`, handing back what
/// the client sent.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let origin = format!("http://{}", listener.local_addr().expect("local addr"));

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("read request line");

        let mut content_length = 0usize;
        let mut content_type = None;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).expect("read header");
            let header = header.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                let value = value.trim();
                match name.to_ascii_lowercase().as_str() {
                    "content-length" => content_length = value.parse().expect("length"),
                    "content-type" => content_type = Some(value.to_string()),
                    _ => {}
                }
            }
        }

        let mut raw = vec![0u8; content_length];
        reader.read_exact(&mut raw).expect("read body");

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .expect("write response");
        stream.flush().expect("flush response");

        Captured {
            request_line: request_line.trim_end().to_string(),
            content_type,
            body: String::from_utf8(raw).expect("utf-8 body"),
        }
    });

    (origin, handle)
}

fn bank(name: &str, ldr: &str) -> BankMetrics {
    let mut metrics = BankMetrics::default();
    for field in BankField::ALL {
        metrics.insert(field, "1.0");
    }
    metrics.insert(BankField::BankName, name);
    metrics.insert(BankField::Ldr, ldr);
    metrics
}

#[test]
fn posts_json_and_parses_ranking() {
    let (origin, server) = serve_once(
        "200 OK",
        r#"[{"rank":1,"name":"A","ldr":"80","total_points":95},{"rank":2,"name":"B","ldr":75.0,"total_points":88}]"#,
    );
    let scorer = HttpScorer::new(&format!("{origin}/")).expect("client");

    let ranked = scorer
        .calculate(&[bank("A", "80"), bank("B", "75")])
        .expect("ranking");

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].name, "A");
    assert_eq!(ranked[0].ldr.to_string(), "80");
    assert_eq!(ranked[1].ldr.to_string(), "75");
    assert_eq!(ranked[1].total_points, 88.0);

    let captured = server.join().expect("server thread");
    assert_eq!(captured.request_line, "POST /calculate HTTP/1.1");
    assert_eq!(captured.content_type.as_deref(), Some("application/json"));
    let sent: serde_json::Value = serde_json::from_str(&captured.body).expect("json body");
    assert_eq!(sent[0]["name"], "A");
    assert_eq!(sent[1]["ldr"], "75");
    assert_eq!(sent[1]["npl_gross"], "1.0");
}

#[test]
fn error_reply_surfaces_message() {
    let (origin, server) = serve_once("400 Bad Request", r#"{"error":"Invalid LDR value"}"#);
    let scorer = HttpScorer::new(&origin).expect("client");

    let err = scorer.calculate(&[bank("A", "oops")]).unwrap_err();

    assert_eq!(err, RankerError::Remote("Invalid LDR value".to_string()));
    assert_eq!(err.to_string(), "Error: Invalid LDR value");
    server.join().expect("server thread");
}

#[test]
fn error_reply_without_message_uses_fallback() {
    let (origin, server) = serve_once("500 Internal Server Error", "{}");
    let scorer = HttpScorer::new(&origin).expect("client");

    let err = scorer.calculate(&[bank("A", "80")]).unwrap_err();

    assert_eq!(err.to_string(), "Error: Something went wrong.");
    server.join().expect("server thread");
}

#[test]
fn malformed_success_body_is_a_transport_error() {
    let (origin, server) = serve_once("200 OK", r#"{"not":"a list"}"#);
    let scorer = HttpScorer::new(&origin).expect("client");

    let err = scorer.calculate(&[bank("A", "80")]).unwrap_err();

    assert!(matches!(err, RankerError::Transport(_)));
    assert!(err.to_string().starts_with("Error: invalid response from scorer"));
    server.join().expect("server thread");
}

#[test]
fn unreachable_scorer_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let origin = format!("http://{}", listener.local_addr().expect("local addr"));
    drop(listener);
    let scorer = HttpScorer::new(&origin).expect("client");

    let err = scorer.calculate(&[bank("A", "80")]).unwrap_err();

    assert!(matches!(err, RankerError::Transport(_)));
}
