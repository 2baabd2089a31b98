//! `run` and `matches` subcommands: the same core, printed instead of drawn

use anyhow::{anyhow, Result};
use std::io::Write;
use std::sync::Arc;

use crate::api::JobMatcherApi;
use crate::cli::RunArgs;
use crate::config::WorkflowSettings;
use crate::dag;
use crate::matches::{self, MatchList, ResultsEntry};
use crate::orchestrator::{Orchestrator, EXECUTE_FAILED};
use crate::upload::{ResumeSource, UPLOAD_FAILED};

fn print_graph(out: &mut impl Write, orchestrator: &Orchestrator) -> Result<()> {
    let graph = dag::layout(Some(orchestrator.status()));
    writeln!(out, "Pipeline ({})", graph.status)?;
    for line in dag::describe(&graph) {
        writeln!(out, "  {}", line)?;
    }
    Ok(())
}

pub async fn run(
    out: &mut impl Write,
    api: Arc<dyn JobMatcherApi>,
    settings: &WorkflowSettings,
    args: &RunArgs,
) -> Result<()> {
    let upload = args.to_upload()?;
    let mut settings = settings.clone();
    if args.no_email {
        settings.send_email = false;
    }
    let mut orchestrator = Orchestrator::new(api, &settings);

    let kind = match &upload.source {
        ResumeSource::Text(_) => "text".to_string(),
        ResumeSource::Pdf(file) => file.file_name.clone(),
    };
    writeln!(out, "Uploading resume ({}) for {}", kind, upload.user_email)?;
    let resume_id = orchestrator
        .upload(&upload)
        .await
        .map_err(|e| anyhow!(e.user_message(UPLOAD_FAILED)))?;
    writeln!(out, "Resume uploaded: {}", resume_id)?;

    writeln!(out, "Running workflow, this can take a few minutes...")?;
    let outcome = orchestrator.execute().await;

    print_graph(out, &orchestrator)?;
    if let Some(found) = orchestrator.jobs_found() {
        writeln!(out, "Jobs found:   {}", found)?;
    }
    if let Some(matched) = orchestrator.jobs_matched() {
        writeln!(out, "Jobs matched: {}", matched)?;
    }

    let handoff = outcome.map_err(|e| anyhow!(e.user_message(EXECUTE_FAILED)))?;
    writeln!(out)?;
    write!(out, "{}", MatchList::new(handoff.matched_jobs).render_text())?;
    Ok(())
}

pub async fn matches(out: &mut impl Write, api: Arc<dyn JobMatcherApi>, email: &str) -> Result<()> {
    let entry = ResultsEntry::from_parts(None, Some(email));
    let (list, error) = matches::load(api.as_ref(), entry).await;
    if let Some(error) = error {
        return Err(anyhow!("Error fetching job matches: {}", error));
    }
    write!(out, "{}", list.render_text())?;
    Ok(())
}
