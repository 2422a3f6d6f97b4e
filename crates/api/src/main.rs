use fleetdesk_auth::Role;
use fleetdesk_infra::{DirectoryAccount, InMemoryAccountDirectory};

#[tokio::main]
async fn main() {
    fleetdesk_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let directory = InMemoryAccountDirectory::arc();
    seed_root_account(&directory);

    let app = fleetdesk_api::app::build_app_with(jwt_secret, directory);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

/// Seed the initial superadmin so a fresh process is administrable.
fn seed_root_account(directory: &InMemoryAccountDirectory) {
    let root = DirectoryAccount::new("root@fleetdesk.local", Role::Superadmin, None);
    let id = root.id;
    if directory.insert(root).is_ok() {
        tracing::info!(account = %id, "seeded root superadmin account");
    }
}
