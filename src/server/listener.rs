use tokio::net::TcpListener;
use tracing::info;
use crate::http::connection::Connection;
use crate::config::Config;
use crate::routes::ResponderChain;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", cfg.listen_addr);

    let chain = ResponderChain::standard(cfg.files_dir.clone());

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let chain = chain.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, chain);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
