//! Guichet CLI binary: submit agent forms against an agent-execution endpoint.
//!
//! Subcommands: `list` (configured forms), `submit` (one-shot submission),
//! `serve` (run the endpoint with echo executors); `-i/--interactive` for the
//! REPL.

mod logging;
mod repl;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use cli::{
    forms, print_outcome, BackendError, FormsFile, LocalBackend, RemoteBackend, SubmitBackend,
};
use config::Settings;

#[derive(Parser, Debug)]
#[command(name = "guichet")]
#[command(about = "Guichet — submit agent forms from the CLI")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Interactive: pick forms and fill fields at a prompt
    #[arg(short, long)]
    interactive: bool,

    /// Remote endpoint base URL (default: http://127.0.0.1:8000 or GUICHET_REMOTE_URL)
    #[arg(long, value_name = "URL")]
    remote: Option<String>,

    /// Run executors in-process instead of calling a remote endpoint
    #[arg(long)]
    local: bool,

    /// Do not auto-start a local endpoint when the remote refuses connections
    #[arg(long)]
    no_auto_start: bool,

    /// Bounded request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Forms definition file (default: embedded forms or GUICHET_FORMS)
    #[arg(long, value_name = "PATH")]
    forms: Option<PathBuf>,

    /// Print the rendered results-region HTML instead of raw markdown
    #[arg(long)]
    html: bool,

    /// Print the outcome as one JSON object
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the agent-execution endpoint (echo executors for every configured form)
    Serve(ServeArgs),
    /// List configured forms and their fields
    List,
    /// Submit one form: guichet submit planner -f objective="..."
    Submit(SubmitArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ServeArgs {
    /// Listen address (default 127.0.0.1:8000)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
    /// Keep serving after the first answered submission (default: exit after one)
    #[arg(long)]
    keep_alive: bool,
    /// Persist successful outputs as markdown reports in this directory
    #[arg(long, value_name = "DIR")]
    history_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
struct SubmitArgs {
    /// Form to submit (agent identifier, see `guichet list`)
    form: String,
    /// Field value, repeatable: -f objective="plan a trip"
    #[arg(short = 'f', long = "field", value_name = "NAME=VALUE")]
    fields: Vec<String>,
}

fn resolve_remote_url(args: &Args, settings: &Settings) -> String {
    args.remote
        .clone()
        .unwrap_or_else(|| settings.remote_url.clone())
}

fn resolve_timeout(args: &Args, settings: &Settings) -> Option<u64> {
    args.timeout.or(settings.timeout_secs)
}

fn resolve_auto_start(args: &Args, settings: &Settings) -> bool {
    !(args.no_auto_start || settings.no_auto_start)
}

fn load_forms(args: &Args, settings: &Settings) -> Result<FormsFile, forms::FormsError> {
    match args.forms.as_ref().or(settings.forms.as_ref()) {
        Some(path) => forms::load_from_path(path),
        None => forms::load_default(),
    }
}

/// Parses one `-f NAME=VALUE` argument. The value may be empty (`NAME=`),
/// like an untouched input field.
fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("invalid field '{raw}', expected NAME=VALUE"))
}

fn make_backend(
    args: &Args,
    settings: &Settings,
    forms_file: &FormsFile,
) -> Result<Arc<dyn SubmitBackend>, BackendError> {
    if args.local {
        Ok(Arc::new(LocalBackend::new(forms_file)))
    } else {
        Ok(Arc::new(RemoteBackend::new(
            resolve_remote_url(args, settings),
            resolve_timeout(args, settings),
            resolve_auto_start(args, settings),
            forms_file,
        )?))
    }
}

fn list_forms(forms_file: &FormsFile) {
    for form in &forms_file.forms {
        println!("{} — {}", form.agent, form.title());
        for field in &form.fields {
            let required = if field.required { " (requis)" } else { "" };
            println!("  - {}: {}{}", field.name, field.label(), required);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init()?;

    let args = Args::parse();
    let settings = match Settings::load(None) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "settings load failed, using defaults");
            Settings::default()
        }
    };

    let forms_file = match load_forms(&args, &settings) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("forms error: {e}");
            std::process::exit(2);
        }
    };

    if let Some(Command::Serve(sa)) = &args.cmd {
        let mut registry = serve::AgentRegistry::new();
        for form in &forms_file.forms {
            registry.register(Arc::new(serve::EchoExecutor::new(form.agent.clone())));
        }
        let history_dir = sa.history_dir.clone().or_else(|| settings.history_dir.clone());
        if let Err(e) = serve::run_serve(sa.addr.as_deref(), registry, history_dir, !sa.keep_alive).await {
            eprintln!("serve error: {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    if args.interactive && args.cmd.is_none() {
        let backend = make_backend(&args, &settings, &forms_file)?;
        return repl::run_repl_loop(&backend, &forms_file, args.html, args.json).await;
    }

    match &args.cmd {
        None | Some(Command::List) => {
            list_forms(&forms_file);
            Ok(())
        }
        Some(Command::Submit(sub)) => {
            let mut fields = Vec::with_capacity(sub.fields.len());
            for raw in &sub.fields {
                match parse_field(raw) {
                    Ok(pair) => fields.push(pair),
                    Err(msg) => {
                        eprintln!("{msg}");
                        std::process::exit(2);
                    }
                }
            }

            let Some(form) = forms_file.get(&sub.form) else {
                eprintln!("forme inconnue: {}", sub.form);
                std::process::exit(2);
            };
            let missing = form.missing_required(&fields);
            if !missing.is_empty() {
                eprintln!("champs requis manquants: {}", missing.join(", "));
                std::process::exit(2);
            }

            let backend = make_backend(&args, &settings, &forms_file)?;
            match backend.submit(&form.agent, &fields).await {
                Ok(outcome) => {
                    print_outcome(&outcome, args.html, args.json);
                    if !outcome.is_success() {
                        std::process::exit(1);
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Command::Serve(_)) => unreachable!("serve handled above"),
    }
}
