//! One-shot product search.

use anyhow::{bail, Result};
use scout_session::{HttpBackend, IgnoreReason, SearchSession, SessionState, SubmitOutcome};

use super::SearchArgs;
use crate::context::Context;
use crate::output::Output;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let session = ctx.search_session();
    let outcome = submit(&session, &args.text(), &ctx.output).await;

    if outcome == SubmitOutcome::Ignored(IgnoreReason::EmptyQuery) {
        bail!("Search query is empty");
    }

    render(&session.state(), args.limit, &ctx.output);
    Ok(())
}

/// Submit behind a spinner and report the outcome in verbose mode.
pub async fn submit(
    session: &SearchSession<HttpBackend>,
    query: &str,
    output: &Output,
) -> SubmitOutcome {
    let spinner = output.spinner(&format!("Searching for \"{}\"...", query.trim()));
    let outcome = session.submit(query).await;
    spinner.finish_and_clear();

    match &outcome {
        SubmitOutcome::Failed { reason } => output.debug(&format!("Search failed: {}", reason)),
        SubmitOutcome::Ignored(reason) => output.debug(&format!("Search ignored: {:?}", reason)),
        other => output.debug(&format!("{:?}", other)),
    }
    if let Some(locale) = &session.state().locale {
        output.debug(&format!("Locale: {}", locale));
    }
    outcome
}

/// Print the results of a settled session.
pub fn render(state: &SessionState, limit: Option<usize>, output: &Output) {
    if output.is_json() {
        output.json(state);
        return;
    }

    if state.results.is_empty() {
        output.info("No products found");
        return;
    }

    let shown = limit.unwrap_or(state.results.len()).min(state.results.len());
    output.header(&format!("{} products", state.results.len()));
    for (i, product) in state.results.iter().take(shown).enumerate() {
        output.product(i + 1, product);
    }
    if shown < state.results.len() {
        output.info(&format!("{} more not shown", state.results.len() - shown));
    }
}
