use clap::{Parser, Subcommand};
use futures_util::StreamExt;
use reqwest::redirect::Policy;
use tokio_tungstenite::{connect_async, tungstenite::Message};

#[derive(Parser)]
#[command(name = "probe-cli")]
#[command(about = "Inspect and flip a running liveness probe demo", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the health endpoint
    Status,
    /// Flip the health flag
    Toggle,
    /// Stream status changes until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let base = cli.url.trim_end_matches('/');
    let client = reqwest::Client::builder().redirect(Policy::none()).build()?;

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/health", base)).send().await?;
            let status = res.status();
            println!("{} {}", status.as_u16(), res.text().await?);
        }
        Commands::Toggle => {
            let res = client.put(format!("{}/toggle", base)).send().await?;
            if res.status().is_redirection() {
                let res = client.get(format!("{}/health", base)).send().await?;
                println!("toggled, now {}", res.text().await?);
            } else {
                eprintln!("Error: toggle returned status {}", res.status());
            }
        }
        Commands::Watch => {
            let ws_url = format!("{}/liveness-probe-demo-ws", to_ws_scheme(base));
            let (mut stream, _) = connect_async(ws_url.as_str()).await?;
            while let Some(frame) = stream.next().await {
                match frame? {
                    Message::Text(text) => {
                        let enabled: bool = serde_json::from_str(text.as_str())?;
                        println!("{}", if enabled { "healthy" } else { "unhealthy" });
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn to_ws_scheme(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        url.to_string()
    }
}
