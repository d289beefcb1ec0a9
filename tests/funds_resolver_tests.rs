//! tests/funds_resolver_tests.rs
//!
//! Tests for `src/service/funds.rs` against mocked toncenter and tonapi:
//! - merged snapshot (native, jettons, NFTs) and call order
//! - malformed node answers degrade to a zero balance
//! - credentials and anonymous user agent
//! - indexing API failures propagate

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use httpmock::prelude::HttpMockRequest;
use httpmock::{Method::GET, MockServer};
use serde_json::json;
use ton_mnemonic_checker::blockchain::tonapi::ANONYMOUS_USER_AGENT;
use ton_mnemonic_checker::blockchain::{FundsSource, TonapiClient, ToncenterClient};
use ton_mnemonic_checker::core::domain::NATIVE_TOKEN_KEY;
use ton_mnemonic_checker::core::errors::CheckerError;
use ton_mnemonic_checker::core::wallet::address::to_non_bounceable;
use ton_mnemonic_checker::network::{FreeTierDelay, NoPause, Pause};
use ton_mnemonic_checker::service::funds::{UNKNOWN_NAME, UNKNOWN_SYMBOL};
use ton_mnemonic_checker::service::FundsResolver;

const WALLET: &str = "EQBvW8Z5huBkMJYdnfAEM5JqTNkuWX3diqYENkWsIL0XggGG";
const JETTON_MASTER: &str = "0:b113a994b5024a16719f69139328eb759596c38a25f59028b146fecdc3621dfe";
const JETTON_WALLET: &str = "0:3f1c29a1e2b4d86e6e5e0ac0d7e2e7c1c8f8a9b0c1d2e3f405162738495a6b7c";
const EMPTY_JETTON: &str = "0:1111111111111111111111111111111111111111111111111111111111111111";
const NFT_ITEM: &str = "0:83dfd552e63729b472fcbcc8c45ebcc6691702558b68ec7527e1ba403a0f31a8";

#[derive(Clone, Default)]
struct RecordingPause(Arc<Mutex<Vec<Duration>>>);

#[async_trait]
impl Pause for RecordingPause {
    async fn pause(&self, duration: Duration) {
        self.0.lock().unwrap().push(duration);
    }
}

fn without_authorization(req: &HttpMockRequest) -> bool {
    let is_auth = |(name, _): &(String, String)| name.eq_ignore_ascii_case("authorization");
    req.headers.as_ref().map_or(true, |headers| !headers.iter().any(is_auth))
}

fn resolver<P: Pause>(
    server: &MockServer,
    tonapi_key: Option<&str>,
    toncenter_key: Option<&str>,
    delay: FreeTierDelay<P>,
) -> FundsResolver<P> {
    let toncenter = ToncenterClient::new(
        format!("{}/api/v2", server.base_url()),
        toncenter_key.map(String::from),
    );
    let tonapi = TonapiClient::new(server.base_url(), tonapi_key).unwrap();
    FundsResolver::new(toncenter, tonapi, delay)
}

fn anonymous_resolver(server: &MockServer) -> FundsResolver<NoPause> {
    resolver(server, None, None, FreeTierDelay::with_pause(Duration::ZERO, NoPause))
}

#[tokio::test(flavor = "current_thread")]
async fn merges_native_jettons_and_nfts() {
    let server = MockServer::start_async().await;

    let nfts = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v2/accounts/{WALLET}/nfts"))
                .query_param("limit", "1000")
                .query_param("offset", "0")
                .query_param("indirect_ownership", "false")
                .header("authorization", "Bearer tonapi-key");
            then.status(200).json_body(json!({
                "nft_items": [
                    { "address": NFT_ITEM, "metadata": { "name": "Anonymous Telegram Number" } }
                ]
            }));
        })
        .await;

    let balance = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v2/getAddressBalance")
                .query_param("address", WALLET)
                .query_param("api_key", "toncenter-key");
            then.status(200).json_body(json!({ "ok": true, "result": "1500000000" }));
        })
        .await;

    let jettons = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v2/accounts/{WALLET}/jettons"))
                .header("authorization", "Bearer tonapi-key");
            then.status(200).json_body(json!({
                "balances": [
                    {
                        "balance": "2500000",
                        "wallet_address": { "address": JETTON_WALLET },
                        "jetton": {
                            "address": JETTON_MASTER,
                            "name": "Tether USD",
                            "symbol": "USD₮",
                            "decimals": 6
                        }
                    },
                    {
                        "balance": "0",
                        "wallet_address": { "address": JETTON_WALLET },
                        "jetton": { "address": EMPTY_JETTON, "symbol": "NONE" }
                    }
                ]
            }));
        })
        .await;

    let pause = RecordingPause::default();
    let resolver = resolver(
        &server,
        Some("tonapi-key"),
        Some("toncenter-key"),
        FreeTierDelay::with_pause(Duration::from_secs(4), pause.clone()),
    );

    let snapshot = resolver.resolve(WALLET).await.unwrap();

    nfts.assert_async().await;
    balance.assert_async().await;
    jettons.assert_async().await;
    assert_eq!(*pause.0.lock().unwrap(), vec![Duration::from_secs(4); 2]);

    let keys: Vec<&str> = snapshot.tokens().map(|(k, _)| k).collect();
    let jetton_key = to_non_bounceable(JETTON_MASTER);
    assert_eq!(keys, vec![NATIVE_TOKEN_KEY, jetton_key.as_str()]);
    assert_eq!(snapshot.native_balance(), Some(1_500_000_000));

    let usdt = snapshot.token(&jetton_key).unwrap();
    assert_eq!(usdt.balance, 2_500_000);
    assert_eq!(usdt.decimals, 6);
    assert_eq!(usdt.symbol, "USD₮");
    assert_eq!(usdt.wallet_address, to_non_bounceable(JETTON_WALLET));
    assert!(snapshot.token(&to_non_bounceable(EMPTY_JETTON)).is_none());

    let (nft_key, nft) = snapshot.nfts().next().unwrap();
    assert_eq!(nft_key, to_non_bounceable(NFT_ITEM));
    assert!(nft_key.starts_with("UQ"));
    assert_eq!(nft.metadata["name"], "Anonymous Telegram Number");
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_balance_degrades_to_zero() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v2/accounts/{WALLET}/nfts"));
            then.status(200).json_body(json!({ "nft_items": [] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/getAddressBalance");
            then.status(200).json_body(json!({ "result": "not-a-number" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v2/accounts/{WALLET}/jettons"));
            then.status(200).json_body(json!({ "balances": [] }));
        })
        .await;

    let resolver = anonymous_resolver(&server);
    let snapshot = resolver.resolve(WALLET).await.unwrap();

    assert_eq!(snapshot.native_balance(), Some(0));
    assert_eq!(snapshot.tokens().count(), 1);
    assert_eq!(snapshot.nfts().count(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn rate_limited_node_answer_degrades_to_zero() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v2/accounts/{WALLET}/nfts"));
            then.status(200).json_body(json!({ "nft_items": [] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/getAddressBalance");
            then.status(429)
                .json_body(json!({ "ok": false, "error": "Ratelimit exceed", "code": 429 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v2/accounts/{WALLET}/jettons"));
            then.status(200).json_body(json!({ "balances": [] }));
        })
        .await;

    let resolver = anonymous_resolver(&server);
    assert_eq!(resolver.resolve(WALLET).await.unwrap().native_balance(), Some(0));
}

#[tokio::test(flavor = "current_thread")]
async fn anonymous_requests_carry_client_user_agent() {
    let server = MockServer::start_async().await;
    let nfts = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/v2/accounts/{WALLET}/nfts"))
                .header("user-agent", ANONYMOUS_USER_AGENT)
                .matches(without_authorization);
            then.status(200).json_body(json!({ "nft_items": [] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/getAddressBalance");
            then.status(200).json_body(json!({ "result": 7 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v2/accounts/{WALLET}/jettons"));
            then.status(200).json_body(json!({
                "balances": [{
                    "balance": "9",
                    "wallet_address": { "address": JETTON_WALLET },
                    "jetton": { "address": JETTON_MASTER, "symbol": "", "name": "" }
                }]
            }));
        })
        .await;

    let resolver = anonymous_resolver(&server);
    let snapshot = resolver.resolve(WALLET).await.unwrap();

    nfts.assert_async().await;
    assert_eq!(snapshot.native_balance(), Some(7));
    let jetton = snapshot.token(&to_non_bounceable(JETTON_MASTER)).unwrap();
    assert_eq!(jetton.symbol, UNKNOWN_SYMBOL);
    assert_eq!(jetton.name, UNKNOWN_NAME);
    assert_eq!(jetton.decimals, 9);
}

#[tokio::test(flavor = "current_thread")]
async fn indexing_api_failure_propagates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v2/accounts/{WALLET}/nfts"));
            then.status(500).body("upstream down");
        })
        .await;
    let balance = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/getAddressBalance");
            then.status(200).json_body(json!({ "result": "1" }));
        })
        .await;

    let resolver = anonymous_resolver(&server);
    let err = resolver.resolve(WALLET).await.unwrap_err();

    assert!(matches!(err, CheckerError::Http(_)), "got {err}");
    assert!(!err.is_retryable());
    assert_eq!(balance.hits_async().await, 0);
}

#[tokio::test(flavor = "current_thread")]
async fn undecodable_indexing_body_is_unexpected_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v2/accounts/{WALLET}/nfts"));
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let resolver = anonymous_resolver(&server);
    let err = resolver.resolve(WALLET).await.unwrap_err();
    assert!(
        matches!(err, CheckerError::UnexpectedResponse { service: "tonapi", .. }),
        "got {err}"
    );
}
