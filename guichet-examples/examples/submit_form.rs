//! Submit one form against a running endpoint and print the outcome.
//!
//! Start an endpoint first (`guichet serve --keep-alive`), then:
//! `cargo run -p guichet-examples --example submit_form -- "plan a trip"`

use guichet::{AgentClient, Console, FormSpec};

#[tokio::main]
async fn main() {
    let objective = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "plan a trip".to_string());

    let base_url = std::env::var("GUICHET_REMOTE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    let mut console = Console::new(AgentClient::new(base_url));
    let planner = console.bind(FormSpec::new("planner", "Lancer le Planificateur"));

    let outcome = planner
        .submit(&[("objective".to_string(), objective)])
        .await;

    println!("--- outcome ---");
    println!("{}", outcome.text());
    println!("--- region ---");
    let (hidden, content) = console.results().snapshot();
    println!("hidden: {hidden}");
    println!("{content}");
}
