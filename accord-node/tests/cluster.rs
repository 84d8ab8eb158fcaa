use accord_common::AccountRecord;
use accord_consensus::SyncOutcome;
use accord_ledger::{GENESIS_ADDRESS, GENESIS_BALANCE};
use accord_node::{build_runtime, AccordRuntime, Config};

fn config(peers: Vec<String>) -> Config {
    Config {
        port: 0,
        peers,
        peer_timeout_secs: 1,
    }
}

async fn spawn_node(peers: Vec<String>) -> AccordRuntime {
    build_runtime(config(peers)).await.unwrap()
}

fn base_url(node: &AccordRuntime) -> String {
    format!("http://127.0.0.1:{}", node.addr.port())
}

async fn seed(node: &AccordRuntime, entries: &[(&str, u64)]) {
    let records = entries
        .iter()
        .map(|(address, balance)| AccountRecord {
            address: address.to_string(),
            balance: *balance,
        })
        .collect();
    node.state.ledger.write().await.load(records);
}

async fn balance(client: &reqwest::Client, url: &str, address: &str) -> String {
    client
        .get(format!("{url}/{address}"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

async fn fingerprint(client: &reqwest::Client, url: &str) -> String {
    client
        .get(format!("{url}/hash"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

#[tokio::test]
async fn lone_node_starts_from_genesis() {
    let node = spawn_node(Vec::new()).await;
    let url = base_url(&node);
    let client = reqwest::Client::new();

    let accounts: Vec<AccountRecord> = client
        .get(format!("{url}/all"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].address, GENESIS_ADDRESS);
    assert_eq!(accounts[0].balance, GENESIS_BALANCE);
    node.shutdown();
}

#[tokio::test]
async fn second_node_bootstraps_from_a_running_peer() {
    let node1 = spawn_node(Vec::new()).await;
    let node2 = spawn_node(vec![base_url(&node1)]).await;
    let client = reqwest::Client::new();

    assert_eq!(node1.sync_outcome, SyncOutcome::Genesis);
    assert!(matches!(
        node2.sync_outcome,
        SyncOutcome::SeededFromPeer { accounts: 1, .. }
    ));
    assert_eq!(
        fingerprint(&client, &base_url(&node1)).await,
        fingerprint(&client, &base_url(&node2)).await
    );
    assert_eq!(
        balance(&client, &base_url(&node2), GENESIS_ADDRESS).await,
        GENESIS_BALANCE.to_string()
    );

    node1.shutdown();
    node2.shutdown();
}

#[tokio::test]
async fn transfer_commits_across_a_two_node_network() {
    let node2 = spawn_node(Vec::new()).await;
    seed(&node2, &[("alice", 100)]).await;

    // node1 bootstraps alice's account straight from node2.
    let node1 = spawn_node(vec![base_url(&node2)]).await;
    let client = reqwest::Client::new();
    let url1 = base_url(&node1);
    let url2 = base_url(&node2);

    let response = client
        .post(format!("{url1}/alice/bob/30"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let committed = response.text().await.unwrap();
    assert_eq!(committed, fingerprint(&client, &url1).await);
    assert_eq!(committed, fingerprint(&client, &url2).await);

    for url in [&url1, &url2] {
        assert_eq!(balance(&client, url, "alice").await, "70");
        assert_eq!(balance(&client, url, "bob").await, "30");
    }

    node1.shutdown();
    node2.shutdown();
}

#[tokio::test]
async fn offline_peer_rolls_the_transfer_back() {
    // Nothing listens on the discard port, so the single configured peer
    // never answers and the round must revert.
    let node = spawn_node(vec!["http://127.0.0.1:9".to_string()]).await;
    seed(&node, &[("alice", 100)]).await;
    let client = reqwest::Client::new();
    let url = base_url(&node);
    let before = fingerprint(&client, &url).await;

    let response = client
        .post(format!("{url}/alice/bob/30"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    assert_eq!(fingerprint(&client, &url).await, before);
    assert_eq!(balance(&client, &url, "alice").await, "100");
    node.shutdown();
}

#[tokio::test]
async fn peer_submission_applies_without_rebroadcast() {
    let node = spawn_node(Vec::new()).await;
    let client = reqwest::Client::new();
    let url = base_url(&node);

    let response = client
        .put(format!("{url}/{GENESIS_ADDRESS}/alice/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let returned = response.text().await.unwrap();
    assert_eq!(returned, fingerprint(&client, &url).await);
    assert_eq!(balance(&client, &url, "alice").await, "5");
    node.shutdown();
}

#[tokio::test]
async fn admission_failures_map_to_bad_request() {
    let node = spawn_node(Vec::new()).await;
    let client = reqwest::Client::new();
    let url = base_url(&node);

    let unknown_sender = client
        .post(format!("{url}/nobody/alice/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown_sender.status(), 400);

    let overdraft = client
        .post(format!("{url}/{GENESIS_ADDRESS}/alice/{}", GENESIS_BALANCE + 1))
        .send()
        .await
        .unwrap();
    assert_eq!(overdraft.status(), 400);

    let malformed_amount = client
        .post(format!("{url}/{GENESIS_ADDRESS}/alice/lots"))
        .send()
        .await
        .unwrap();
    assert_eq!(malformed_amount.status(), 400);
    node.shutdown();
}

#[tokio::test]
async fn unknown_address_is_not_found() {
    let node = spawn_node(Vec::new()).await;
    let client = reqwest::Client::new();
    let url = base_url(&node);

    let response = client
        .get(format!("{url}/nobody"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    node.shutdown();
}

#[tokio::test]
async fn root_listing_matches_all() {
    let node = spawn_node(Vec::new()).await;
    let client = reqwest::Client::new();
    let url = base_url(&node);

    let root: Vec<AccountRecord> = client
        .get(format!("{url}/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let all: Vec<AccountRecord> = client
        .get(format!("{url}/all"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(root, all);
    node.shutdown();
}
