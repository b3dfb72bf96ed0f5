//! Canned JSON-RPC responder for exercising RPC paths without a live node.
//!
//! Serves minimal HTTP/1.1 on a loopback listener: `eth_chainId` answers
//! with a fixed chain id, `eth_call` with a fixed result word. Keep-alive
//! connections are handled so the handshake and a following contract call
//! can share one connection.

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// ABI encoding of `false` (one zero word).
pub(crate) const WORD_ZERO: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// ABI encoding of `true`.
pub(crate) const WORD_ONE: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000001";

/// Spawn a responder and return its endpoint URL.
///
/// `chain_id_hex` is the `eth_chainId` answer (e.g. `"0x1"`);
/// `eth_call_result` the `eth_call` answer.
pub(crate) async fn spawn_rpc_server(
    chain_id_hex: &'static str,
    eth_call_result: &'static str,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(handle_connection(socket, chain_id_hex, eth_call_result));
        }
    });
    format!("http://{}", addr)
}

async fn handle_connection(
    mut socket: TcpStream,
    chain_id_hex: &'static str,
    eth_call_result: &'static str,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        while let Some((request, consumed)) = try_parse_request(&buf) {
            buf.drain(..consumed);
            let body = respond(&request, chain_id_hex, eth_call_result);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                body.len(),
                body
            );
            if socket.write_all(response.as_bytes()).await.is_err() {
                return;
            }
        }
    }
}

/// Extract one full request body from the buffer, if present.
fn try_parse_request(buf: &[u8]) -> Option<(Value, usize)> {
    let text = std::str::from_utf8(buf).ok()?;
    let header_end = text.find("\r\n\r\n")?;
    let content_length = text[..header_end].lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse::<usize>().ok()
        } else {
            None
        }
    })?;
    let body_start = header_end + 4;
    if buf.len() < body_start + content_length {
        return None;
    }
    let body = serde_json::from_slice(&buf[body_start..body_start + content_length]).ok()?;
    Some((body, body_start + content_length))
}

fn respond(request: &Value, chain_id_hex: &str, eth_call_result: &str) -> String {
    let id = request.get("id").cloned().unwrap_or(json!(1));
    let result = match request.get("method").and_then(Value::as_str) {
        Some("eth_chainId") => json!(chain_id_hex),
        Some("eth_call") => json!(eth_call_result),
        _ => Value::Null,
    };
    json!({"jsonrpc": "2.0", "id": id, "result": result}).to_string()
}
