use std::io::{self, Read};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use burnbox_common::{DEFAULT_SERVER_URL, looks_like_id};
use burnbox_protocol::{
    CreateSecretRequest, CreateSecretResponse, ErrorResponse, HEALTH_PATH, HealthResponse,
    RevealSecretResponse, SECRETS_PATH, SHARE_PATH_PREFIX,
};

#[derive(Parser, Debug)]
#[command(name = "burnbox", about = "Burnbox CLI client")]
struct Args {
    #[arg(long, env = "BURNBOX_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cria um segredo a partir do argumento ou, se omitido, do stdin
    Create { text: Option<String> },
    /// Revela (e destrói) um segredo a partir do id ou do link
    Reveal { target: String },
    /// Mostra quantos segredos estão vivos no servidor
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let base = args.server.trim_end_matches('/');
    let client = reqwest::Client::new();

    match args.command {
        Command::Create { text } => {
            let content = match text {
                Some(t) => t,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("falha ao ler stdin")?;
                    buf
                }
            };

            let response = client
                .post(format!("{base}{SECRETS_PATH}"))
                .json(&CreateSecretRequest { content })
                .send()
                .await?;
            if !response.status().is_success() {
                bail!("{}", error_message(response).await);
            }

            let created: CreateSecretResponse = response.json().await?;
            println!("{}", created.url);
            println!("expira em {}", created.expires_in);
        }
        Command::Reveal { target } => {
            let Some(id) = extract_id(&target) else {
                bail!("id inválido: '{target}'");
            };

            let response = client
                .get(format!("{base}{SECRETS_PATH}/{id}"))
                .send()
                .await?;
            if !response.status().is_success() {
                bail!("{}", error_message(response).await);
            }

            let revealed: RevealSecretResponse = response.json().await?;
            println!("{}", revealed.content);
        }
        Command::Health => {
            let health: HealthResponse = client
                .get(format!("{base}{HEALTH_PATH}"))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            println!("{} ({} segredos)", health.status, health.secrets);
        }
    }

    Ok(())
}

/// Aceita um id puro ou um link `…/s/{id}` (com ou sem query/fragmento).
fn extract_id(target: &str) -> Option<&str> {
    let target = target.trim();
    let candidate = match target.rfind(SHARE_PATH_PREFIX) {
        Some(pos) => &target[pos + SHARE_PATH_PREFIX.len()..],
        None => target,
    };
    let candidate = candidate
        .split(['?', '#', '/'])
        .next()
        .unwrap_or_default();

    looks_like_id(candidate).then_some(candidate)
}

async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(err) => err.error,
        Err(_) => format!("servidor respondeu {status}"),
    }
}
