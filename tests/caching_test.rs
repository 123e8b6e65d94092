mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mockito::ServerGuard;
use pluginlab_admin::{Error, KeyResolver, TokenVerifier, VerifyToken};

use common::{create_admin_token, key_set_json, primary_keypair, secondary_keypair, TestClaims, TestKeyPair};

const AUDIENCE: &str = "plugin:plg_123:admin";

fn verifier_for(cert_url: &str) -> TokenVerifier {
    let resolver = KeyResolver::new(cert_url, reqwest::Client::new(), Duration::from_secs(5))
        .expect("cert url should be accepted");

    TokenVerifier::new(resolver)
}

async fn setup_mock_server_with_counter(counter: Arc<AtomicU32>) -> (ServerGuard, TestKeyPair) {
    let keypair = primary_keypair();
    let mut server = mockito::Server::new_async().await;

    let body = key_set_json(&[&keypair]);
    let counter_clone = Arc::clone(&counter);
    server
        .mock("GET", "/cert")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
            body.clone().into()
        })
        .create_async()
        .await;

    (server, keypair)
}

#[tokio::test]
async fn key_set_cached_between_verifications() {
    let fetch_counter = Arc::new(AtomicU32::new(0));
    let (server, keypair) = setup_mock_server_with_counter(Arc::clone(&fetch_counter)).await;

    let verifier = verifier_for(&format!("{}/cert", server.url()));

    // First verification fetches the key set
    let token1 = create_admin_token(&TestClaims::valid(AUDIENCE), &keypair);
    verifier.verify_token(&token1, AUDIENCE).await.unwrap();
    assert_eq!(fetch_counter.load(Ordering::SeqCst), 1);

    // Later verifications reuse it
    let token2 = create_admin_token(&TestClaims::valid(AUDIENCE), &keypair);
    verifier.verify_token(&token2, AUDIENCE).await.unwrap();

    let token3 = create_admin_token(&TestClaims::valid(AUDIENCE), &keypair);
    verifier.verify_token(&token3, AUDIENCE).await.unwrap();

    assert_eq!(
        fetch_counter.load(Ordering::SeqCst),
        1,
        "Verifications after the first should use the cached key set"
    );
}

#[tokio::test]
async fn refresh_fetches_a_fresh_key_set() {
    let fetch_counter = Arc::new(AtomicU32::new(0));
    let (server, keypair) = setup_mock_server_with_counter(Arc::clone(&fetch_counter)).await;

    let verifier = verifier_for(&format!("{}/cert", server.url()));

    let token = create_admin_token(&TestClaims::valid(AUDIENCE), &keypair);
    verifier.verify_token(&token, AUDIENCE).await.unwrap();
    assert_eq!(fetch_counter.load(Ordering::SeqCst), 1);

    verifier.key_resolver().refresh().await.unwrap();
    assert_eq!(fetch_counter.load(Ordering::SeqCst), 2, "Refresh should refetch");

    // The refreshed set is cached again
    verifier.verify_token(&token, AUDIENCE).await.unwrap();
    assert_eq!(fetch_counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn refresh_picks_up_rotated_keys() {
    let keypair = primary_keypair();
    let rotated = secondary_keypair();

    let fetch_counter = Arc::new(AtomicU32::new(0));
    let mut server = mockito::Server::new_async().await;

    // The endpoint publishes the rotated key only from the second fetch on
    let initial_body = key_set_json(&[&keypair]);
    let rotated_body = key_set_json(&[&keypair, &rotated]);
    let counter_clone = Arc::clone(&fetch_counter);
    server
        .mock("GET", "/cert")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            let fetch = counter_clone.fetch_add(1, Ordering::SeqCst);
            if fetch == 0 {
                initial_body.clone().into()
            } else {
                rotated_body.clone().into()
            }
        })
        .create_async()
        .await;

    let verifier = verifier_for(&format!("{}/cert", server.url()));

    let token = create_admin_token(&TestClaims::valid(AUDIENCE), &rotated);

    // The cached set predates the rotation
    let result = verifier.verify_token(&token, AUDIENCE).await;
    assert!(matches!(result.unwrap_err(), Error::KeyResolution(_)));

    verifier.key_resolver().refresh().await.unwrap();

    let result = verifier.verify_token(&token, AUDIENCE).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn concurrent_verifications_share_one_verifier() {
    let fetch_counter = Arc::new(AtomicU32::new(0));
    let (server, keypair) = setup_mock_server_with_counter(Arc::clone(&fetch_counter)).await;

    let verifier = Arc::new(verifier_for(&format!("{}/cert", server.url())));

    let mut handles = vec![];

    for _ in 0..10 {
        let verifier_clone = Arc::clone(&verifier);
        let token = create_admin_token(&TestClaims::valid(AUDIENCE), &keypair);

        let handle =
            tokio::spawn(async move { verifier_clone.verify_token(&token, AUDIENCE).await });

        handles.push(handle);
    }

    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.is_ok(), "Concurrent verification failed");
    }
}
