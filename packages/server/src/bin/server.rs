//! Realtime storefront server with live catalog and chat broadcast.
//!
//! Pushes the full product catalog to every connected client on change and
//! relays chat messages between logged-in users.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin akinai-server
//! cargo run --bin akinai-server -- --host 0.0.0.0 --port 3000 --data-dir ./data
//! ```

use std::{collections::HashMap, io::ErrorKind, path::PathBuf, sync::Arc};

use akinai_server::{
    domain::UserName,
    infrastructure::{
        pusher::WebSocketEventPusher,
        repository::{JsonFileCatalogStore, JsonFileChatLog},
        session::InMemorySessionGate,
    },
    ui::Server,
    usecase::{
        AddProductUseCase, ConnectClientUseCase, DisconnectClientUseCase,
        GetProductDetailUseCase, ListProductsUseCase, SendChatMessageUseCase,
    },
};
use akinai_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "akinai-server")]
#[command(about = "Realtime storefront server with catalog and chat broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Directory holding the JSON data files
    #[arg(short = 'd', long, default_value = "data")]
    data_dir: PathBuf,
}

/// Loads sessions provisioned by the outer login layer, if any.
///
/// The file maps session tokens to user names. A missing file just means
/// every connection is anonymous.
async fn load_sessions(gate: &InMemorySessionGate, path: &std::path::Path) {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return;
        }
    };
    let sessions: HashMap<String, String> = match serde_json::from_slice(&bytes) {
        Ok(sessions) => sessions,
        Err(e) => {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            return;
        }
    };
    let mut loaded = 0usize;
    for (token, name) in sessions {
        match UserName::new(name) {
            Ok(user_name) => {
                gate.insert_session(token, user_name).await;
                loaded += 1;
            }
            Err(e) => tracing::warn!("Skipping session with invalid user name: {}", e),
        }
    }
    tracing::info!("Loaded {} sessions from {}", loaded, path.display());
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Stores
    // 2. SessionGate
    // 3. EventPusher
    // 4. UseCases
    // 5. Server

    if let Err(e) = tokio::fs::create_dir_all(&args.data_dir).await {
        tracing::error!("Failed to create {}: {}", args.data_dir.display(), e);
        std::process::exit(1);
    }

    // 1. Create Stores (JSON file persistence)
    let catalog_store =
        match JsonFileCatalogStore::load(args.data_dir.join("products.json")).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("Failed to load catalog: {}", e);
                std::process::exit(1);
            }
        };
    let chat_log = match JsonFileChatLog::load(
        args.data_dir.join("messages.json"),
        Arc::new(SystemClock),
    )
    .await
    {
        Ok(log) => Arc::new(log),
        Err(e) => {
            tracing::error!("Failed to load chat log: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Create SessionGate (sessions provisioned by the outer login layer)
    let session_gate = Arc::new(InMemorySessionGate::new());
    load_sessions(&session_gate, &args.data_dir.join("sessions.json")).await;

    // 3. Create EventPusher (WebSocket implementation)
    let event_pusher = Arc::new(WebSocketEventPusher::new());

    // 4. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        session_gate.clone(),
        catalog_store.clone(),
        event_pusher.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(event_pusher.clone()));
    let add_product_usecase = Arc::new(AddProductUseCase::new(
        session_gate.clone(),
        catalog_store.clone(),
        event_pusher.clone(),
    ));
    let send_chat_message_usecase = Arc::new(SendChatMessageUseCase::new(
        session_gate.clone(),
        chat_log.clone(),
        event_pusher.clone(),
    ));
    let list_products_usecase = Arc::new(ListProductsUseCase::new(catalog_store.clone()));
    let get_product_detail_usecase =
        Arc::new(GetProductDetailUseCase::new(catalog_store.clone()));

    // 5. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        add_product_usecase,
        send_chat_message_usecase,
        list_products_usecase,
        get_product_detail_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
