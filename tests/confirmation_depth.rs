//! Confirmation behavior against a scripted JSON-RPC node.
//!
//! The stub answers `eth_chainId`, `eth_blockNumber`, and
//! `eth_getTransactionReceipt` with the head pinned at the transaction's own
//! block — the shape a demand-mined local node presents right after
//! accepting a transaction, where no follow-up block ever arrives.

use std::net::SocketAddr;

use alloy::primitives::{Address, TxHash};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use nft_deployer::chain::{RpcClient, TxPipeline};
use nft_deployer::config::ChainConfig;

fn receipt_json() -> serde_json::Value {
    serde_json::json!({
        "transactionHash": format!("0x{}", "11".repeat(32)),
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "22".repeat(32)),
        "blockNumber": "0x1",
        "from": format!("0x{}", "33".repeat(20)),
        "to": null,
        "contractAddress": format!("0x{}", "44".repeat(20)),
        "gasUsed": "0x5208",
        "cumulativeGasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "status": "0x1",
        "type": "0x2",
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
    })
}

/// Start a stub node that serves a mined transaction with the head pinned
/// at the transaction's block.
async fn start_rpc_stub() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(handle_connection(socket));
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn handle_connection(mut socket: TcpStream) {
    while let Some(request) = read_request(&mut socket).await {
        let id = request.get("id").cloned().unwrap_or(serde_json::json!(1));
        let result = match request["method"].as_str().unwrap_or_default() {
            "eth_chainId" => serde_json::json!("0x7a69"), // 31337
            "eth_blockNumber" => serde_json::json!("0x1"),
            "eth_getTransactionReceipt" => receipt_json(),
            _ => serde_json::Value::Null,
        };

        let body =
            serde_json::json!({"jsonrpc": "2.0", "id": id, "result": result}).to_string();
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        if socket.write_all(response.as_bytes()).await.is_err() {
            break;
        }
    }
}

/// Read one HTTP request and parse its JSON body.
async fn read_request(socket: &mut TcpStream) -> Option<serde_json::Value> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())?;

            let body_start = pos + 4;
            while buf.len() < body_start + content_length {
                let n = socket.read(&mut chunk).await.ok()?;
                if n == 0 {
                    return None;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            return serde_json::from_slice(&buf[body_start..body_start + content_length]).ok();
        }
    }
}

fn stub_config(addr: SocketAddr) -> ChainConfig {
    ChainConfig {
        rpc_url: format!("http://{addr}"),
        failover_urls: Vec::new(),
        chain_id: 31337,
        rpc_timeout_secs: 5,
        confirmation_blocks: 1,
        confirmation_timeout_secs: 10,
        gas_price_multiplier: 1.0,
        max_gas_price_gwei: 100,
    }
}

#[tokio::test]
async fn mined_transaction_confirms_at_depth_one() {
    let addr = start_rpc_stub().await;
    let client = RpcClient::new(stub_config(addr), None).await.unwrap();
    let pipeline = TxPipeline::new(client);

    // Receipt in block 1, head at block 1: inclusion alone must satisfy
    // the default depth of one instead of waiting out the timeout.
    let confirmed = pipeline
        .wait_for_confirmation(TxHash::repeat_byte(0x11))
        .await
        .unwrap();

    assert_eq!(confirmed.block_number, 1);
    assert_eq!(confirmed.contract_address, Some(Address::repeat_byte(0x44)));
}
