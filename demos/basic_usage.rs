use pluginlab_admin::App;
use pluginlab_admin::AppConfig;
use pluginlab_admin::Webhook;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example 1: Verify an end-user bearer token
    println!("=== Example 1: Bearer Token Verification ===");
    let config = AppConfig::new("your-plugin-id", "your-admin-secret");
    let app = App::new(config)?;
    let auth = app.auth()?;

    // Example JWT token (this is just a placeholder - use a real token in practice)
    let token = "eyJhbGciOiJQUzI1NiIsInR5cCI6IkpXVCJ9...";

    match auth.verify_token(token).await {
        Ok(claims) => {
            println!("✓ Token verified successfully!");
            println!("  Member: {}", claims.uid);
            println!("  Email: {}", claims.user.email);
        }
        Err(e) => {
            eprintln!("✗ Token verification failed: {}", e);
        }
    }

    println!();

    // Example 2: Custom key-fetch transport and timeout
    println!("=== Example 2: Custom Configuration ===");
    let custom_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let config = AppConfig::new("your-plugin-id", "your-admin-secret")
        .with_key_fetch_timeout(Duration::from_secs(3))
        .with_http_client(custom_client);

    let app = App::new(config)?;
    let auth = app.auth()?;

    match auth.get_member_by_email("jane@example.com").await {
        Ok(Some(member)) => {
            println!("✓ Member found!");
            println!("  Id: {}", member.id);
            println!("  Signed up via: {:?}", member.auth.sign_in_method);
        }
        Ok(None) => println!("No member with that email"),
        Err(e) => eprintln!("✗ Member lookup failed: {}", e),
    }

    println!();

    // Example 3: Authenticate a webhook delivery
    println!("=== Example 3: Webhook Signature Verification ===");
    let webhook = Webhook::new("s3cr3t");
    let body = r#"{"event":"member.created"}"#;
    let signature = "333067b2621040415b21b4742f3dac8295c735465ec69b35e0333069f32f4e1a";

    match webhook.verify_signature(body, signature) {
        Ok(()) => println!("✓ Delivery is authentic"),
        Err(e) => eprintln!("✗ Rejected delivery: {}", e),
    }

    Ok(())
}
