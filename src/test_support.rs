//! Test helpers: throwaway HTTP servers for exercising the blocking clients.

use axum::Router;

/// Serve `router` on an ephemeral localhost port from a dedicated thread.
///
/// The blocking reqwest clients cannot run inside a tokio runtime, so the
/// stub server gets its own current-thread runtime and the test thread stays
/// synchronous. Returns the base URL. The server lives until the process exits.
pub fn spawn_stub_server(router: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    format!("http://{addr}")
}

/// A base URL nothing listens on.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
