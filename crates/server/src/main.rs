use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::time::Duration;
use tracing::{error, info};

use burnbox_common::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RATE_LIMIT_PER_MINUTE, DEFAULT_SWEEP_INTERVAL_SECS,
    DEFAULT_TTL_SECS, MAX_CONTENT_BYTES,
};
use burnbox_server::{AppState, RateLimiter, serve};
use burnbox_storage::SecretStore;

#[derive(Parser, Debug)]
#[command(name = "burnbox-server", about = "Burnbox — segredos de leitura única")]
struct Args {
    #[arg(long, env = "BURNBOX_HOST", default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, env = "BURNBOX_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Tempo de vida de um segredo não lido
    #[arg(long, env = "BURNBOX_TTL_SECS", default_value_t = DEFAULT_TTL_SECS, value_parser = parse_positive_secs)]
    ttl_secs: u64,
    /// Período da varredura de expirados
    #[arg(long, env = "BURNBOX_SWEEP_INTERVAL_SECS", default_value_t = DEFAULT_SWEEP_INTERVAL_SECS, value_parser = parse_positive_secs)]
    sweep_interval_secs: u64,
    #[arg(long, env = "BURNBOX_MAX_CONTENT_BYTES", default_value_t = MAX_CONTENT_BYTES)]
    max_content_bytes: usize,
    /// Base dos links gerados (padrão: http://HOST:PORT)
    #[arg(long, env = "BURNBOX_PUBLIC_URL")]
    public_url: Option<String>,
    /// Requisições por minuto por IP; 0 desliga
    #[arg(long, env = "BURNBOX_RATE_LIMIT", default_value_t = DEFAULT_RATE_LIMIT_PER_MINUTE)]
    rate_limit: u32,
}

fn parse_positive_secs(s: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("valor deve ser maior que zero".into()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("valor inválido: '{s}'. Use um número de segundos")),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("falha ao instalar handler de Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("falha ao instalar handler de SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal recebido");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "burnbox_server=info,burnbox_storage=info,tower_http=info".into()
            }),
        )
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    let public_url = args
        .public_url
        .unwrap_or_else(|| format!("http://{addr}"))
        .trim_end_matches('/')
        .to_string();

    let state = AppState {
        store: SecretStore::new(Duration::from_secs(args.ttl_secs)),
        max_content_bytes: args.max_content_bytes,
        public_url,
        limiter: (args.rate_limit > 0).then(|| RateLimiter::new(args.rate_limit)),
    };

    let listener = TcpListener::bind(&addr).await?;
    info!(
        ttl_secs = args.ttl_secs,
        sweep_interval_secs = args.sweep_interval_secs,
        "Burnbox escutando em {addr}"
    );

    serve(
        listener,
        state,
        Duration::from_secs(args.sweep_interval_secs),
        shutdown_signal(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_secs() {
        assert_eq!(parse_positive_secs("3600"), Ok(3600));
        assert!(parse_positive_secs("0").is_err());
        assert!(parse_positive_secs("-1").is_err());
        assert!(parse_positive_secs("1h").is_err());
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["burnbox-server"]);
        assert_eq!(args.port, DEFAULT_PORT);
        assert_eq!(args.ttl_secs, 86_400);
        assert_eq!(args.sweep_interval_secs, 3_600);
        assert_eq!(args.max_content_bytes, 100_000);
        assert!(args.public_url.is_none());
    }
}
