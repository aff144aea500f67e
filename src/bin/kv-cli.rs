use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use url::Url;

#[derive(Parser)]
#[command(name = "kv-cli")]
#[command(about = "Command-line client for the kv-relay service", long_about = None)]
struct Cli {
    #[arg(long, default_value = "http://localhost:8080")]
    url: Url,

    /// Basic-auth username for protected routes
    #[arg(short, long, default_value = "foo")]
    user: String,

    /// Basic-auth password for protected routes
    #[arg(short, long, default_value = "bar")]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the service is alive
    Ping,
    /// Read the value stored for a user
    Get { name: String },
    /// Store a value under the authenticated user
    Set { value: String },
    /// Show the first upstream posts
    Posts,
    /// Send a name/password pair to the validation route
    Test { name: String, password: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = &cli.url;

    match cli.command {
        Commands::Ping => {
            let res = client.get(endpoint(base, &["ping"])?).send().await?;
            println!("{} {}", res.status(), res.text().await?);
        }
        Commands::Get { name } => {
            let res = client.get(endpoint(base, &["user", name.as_str()])?).send().await?;
            print_response(res).await?;
        }
        Commands::Set { value } => {
            let res = client
                .post(endpoint(base, &["admin"])?)
                .basic_auth(&cli.user, Some(&cli.password))
                .json(&json!({ "value": value }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Posts => {
            let res = client.get(endpoint(base, &["posts"])?).send().await?;
            print_response(res).await?;
        }
        Commands::Test { name, password } => {
            let res = client
                .post(endpoint(base, &["test"])?)
                .json(&json!({ "name": name, "password": password }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// Append `segments` to the base URL, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("base URL cannot have a path: {base}"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
