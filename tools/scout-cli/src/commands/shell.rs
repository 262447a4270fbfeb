//! Interactive search session.

use anyhow::{Context as _, Result};
use dialoguer::Input;
use scout_commerce::catalog::Product;
use scout_session::{HttpBackend, ProductView, SearchSession, SessionPhase, SubmitOutcome};

use super::{product, search, ShellArgs};
use crate::context::Context;

const HELP: &str = "\
Type a query to search. Commands:
  :open N   show product N with offers
  :new      start a new search
  :state    show session state
  :help     show this help
  :quit     leave";

/// A parsed line of shell input.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Search(String),
    Open(usize),
    New,
    State,
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(input: &str) -> Line {
    let input = input.trim();
    let Some(command) = input.strip_prefix(':') else {
        return Line::Search(input.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("open" | "o"), Some(n)) => match n.parse() {
            Ok(n) if n > 0 => Line::Open(n),
            _ => Line::Unknown(input.to_string()),
        },
        (Some("new" | "n"), None) => Line::New,
        (Some("state"), None) => Line::State,
        (Some("help" | "h" | "?"), None) => Line::Help,
        (Some("quit" | "q" | "exit"), None) => Line::Quit,
        _ => Line::Unknown(input.to_string()),
    }
}

/// Run the shell command.
pub async fn run(args: ShellArgs, ctx: &Context) -> Result<()> {
    let session = ctx.search_session();
    ctx.output.info(&format!(
        "Searching {} (locale: {}, {})",
        ctx.config.api.base_url,
        session.locale_strategy().as_str(),
        session.ambient_locale()
    ));
    ctx.output.info("Type :help for commands");

    if let Some(query) = args.query {
        run_search(&session, &query, ctx).await;
    }

    loop {
        let prompt = match session.state().phase() {
            SessionPhase::Idle => "search",
            _ => "refine",
        };
        let Some(input) = read_line(prompt).await? else {
            break;
        };

        match parse_line(&input) {
            Line::Search(query) if query.is_empty() => continue,
            Line::Search(query) => run_search(&session, &query, ctx).await,
            Line::Open(n) => {
                let state = session.state();
                match state.results.get(n - 1) {
                    Some(product) => open(product, ctx).await,
                    None => ctx.output.warn(&format!("No result #{}", n)),
                }
            }
            Line::New => {
                session.reset();
                ctx.output.info("Start a new search");
            }
            Line::State => {
                let state = session.state();
                ctx.output.kv("phase", state.phase().as_str());
                ctx.output.kv("query", state.query.as_deref().unwrap_or("-"));
                ctx.output.kv("results", &state.results.len().to_string());
                if let Some(locale) = &state.locale {
                    ctx.output.kv("locale", &locale.to_string());
                }
                if let Some(error) = &state.last_error {
                    ctx.output.kv("last error", error);
                }
            }
            Line::Help => println!("{}", HELP),
            Line::Quit => break,
            Line::Unknown(line) => ctx.output.warn(&format!("Unknown command: {}", line)),
        }
    }

    session.close();
    Ok(())
}

async fn run_search(session: &SearchSession<HttpBackend>, query: &str, ctx: &Context) {
    let outcome = search::submit(session, query, &ctx.output).await;
    if !matches!(outcome, SubmitOutcome::Ignored(_)) {
        search::render(&session.state(), None, &ctx.output);
    }
}

async fn open(product: &Product, ctx: &Context) {
    let view = ProductView::new(ctx.backend(), product.id.clone());
    if let Err(e) = product::show(&view, true, &ctx.output).await {
        ctx.output.error(&format!("{:#}", e));
    }
}

/// Prompt for a line off the async runtime. `None` on EOF or interrupt.
async fn read_line(prompt: &'static str) -> Result<Option<String>> {
    let line = tokio::task::spawn_blocking(move || {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    })
    .await
    .context("Prompt task failed")?;

    match line {
        Ok(line) => Ok(Some(line)),
        Err(e) => {
            tracing::debug!(error = %e, "prompt closed");
            Ok(None)
        }
    }
}
