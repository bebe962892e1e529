use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "cards-cli")]
#[command(about = "Command-line client for the Cards API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[arg(short, long, env = "API_TOKEN")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all cards
    Cards,
    /// Show one card
    Card { id: String },
    /// Create a card
    CreateCard {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Delete a card and remove it from every list
    DeleteCard { id: String },
    /// List all lists
    Lists,
    /// Show one list
    List { id: String },
    /// Create a list referencing existing cards
    CreateList {
        #[arg(long)]
        header: String,
        /// Card id to include (repeatable)
        #[arg(long = "card-id")]
        card_ids: Vec<String>,
    },
    /// Delete a list
    DeleteList { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.token))?,
    );

    let request = |method: Method, path: String| -> RequestBuilder {
        client
            .request(method, format!("{}{}", cli.url, path))
            .headers(headers.clone())
    };

    let res = match cli.command {
        Commands::Cards => request(Method::GET, "/card".into()).send().await?,
        Commands::Card { id } => request(Method::GET, format!("/card/{id}")).send().await?,
        Commands::CreateCard { title, content } => {
            request(Method::POST, "/card".into())
                .json(&json!({ "title": title, "content": content }))
                .send()
                .await?
        }
        Commands::DeleteCard { id } => {
            request(Method::DELETE, format!("/card/{id}")).send().await?
        }
        Commands::Lists => request(Method::GET, "/list".into()).send().await?,
        Commands::List { id } => request(Method::GET, format!("/list/{id}")).send().await?,
        Commands::CreateList { header, card_ids } => {
            request(Method::POST, "/list".into())
                .json(&json!({ "header": header, "cardIds": card_ids }))
                .send()
                .await?
        }
        Commands::DeleteList { id } => {
            request(Method::DELETE, format!("/list/{id}")).send().await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Some(location) = res.headers().get(reqwest::header::LOCATION) {
        println!("Location: {}", location.to_str()?);
    }

    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    if status == StatusCode::NO_CONTENT {
        println!("Deleted");
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
