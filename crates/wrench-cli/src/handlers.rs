//! Command handlers: call the desk or the workflow, render what comes back.

use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use wrench_core::{
    assist::{interpret, suggestions_for, KeywordClassifier, RepairReply},
    display::{CreateResult, DeleteResult, OperationStatus, Suggestions, UpdateResult},
    models::SessionContext,
    params::{DeleteRequest, Id, ListRequests, SetStatus},
    store::{MemoryBlobStore, MemoryRecordStore},
    submit::{SubmitOptions, Submitter},
    workflow::{RequestWorkflow, StepId},
    Desk,
};

use crate::{
    cli::{AnalyzeArgs, ClassifyArgs, InviteCommands, NewRequestArgs, RequestCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    desk: Desk,
    renderer: TerminalRenderer,
    session: SessionContext,
}

impl Cli {
    pub fn new(desk: Desk, renderer: TerminalRenderer, session: SessionContext) -> Self {
        Self {
            desk,
            renderer,
            session,
        }
    }

    pub async fn handle_request_command(&self, command: RequestCommands) -> Result<()> {
        match command {
            RequestCommands::New(args) => self.new_request(args).await,
            RequestCommands::List(args) => self.list_requests(&args.into()).await,
            RequestCommands::Show(args) => self.show_request(&args.into()).await,
            RequestCommands::Cancel(args) => self.cancel_request(&args.into()).await,
            RequestCommands::Delete(args) => self.delete_request(&args.into()).await,
            RequestCommands::Status(args) => self.set_status(&args.into()).await,
        }
    }

    pub async fn handle_invite_command(&self, command: InviteCommands) -> Result<()> {
        match command {
            InviteCommands::Add(args) => {
                let invite = self
                    .desk
                    .add_invite(&args.into())
                    .await
                    .context("Failed to add invite")?;
                self.renderer.render(&CreateResult::new(invite));
            }
            InviteCommands::Show(args) => {
                match self
                    .desk
                    .resolve_invite(&args.code)
                    .await
                    .context("Failed to look up invite")?
                {
                    Some(invite) => self.renderer.render(&invite),
                    None => bail!("Unknown invite code '{}'", args.code),
                }
            }
        }
        Ok(())
    }

    pub fn classify(&self, args: &ClassifyArgs) {
        match KeywordClassifier::new().classify_text(&args.description) {
            Some(found) => {
                self.renderer
                    .render(&format!("# Suggested category\n\n{found}\n\n"));
                self.renderer.render(&Suggestions {
                    category: &found.category,
                    items: suggestions_for(&found.category),
                });
            }
            None => self.renderer.render(&OperationStatus::failure(
                "No category matched. Pick one with --category.",
            )),
        }
    }

    pub async fn analyze(&self, args: &AnalyzeArgs) -> Result<()> {
        let reply = match (&args.reply, &args.file) {
            (Some(reply), _) => reply.clone(),
            (None, Some(path)) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => bail!("Pass the reply as an argument or with --file"),
        };

        let outcome = interpret(reply.trim());
        match &outcome {
            RepairReply::Invalid { reason } => {
                self.renderer.render(&OperationStatus::failure(format!(
                    "Error processing repair analysis: {reason}"
                )));
                bail!("Repair analysis was rejected")
            }
            RepairReply::Action { analysis, action } => {
                debug!("Next action {action:?} for complexity {}", analysis.complexity);
                self.renderer.render(&outcome);
                Ok(())
            }
            RepairReply::Raw(_) => {
                self.renderer.render(&outcome);
                Ok(())
            }
        }
    }

    /// Walks a new request through every step, then submits it.
    async fn new_request(&self, args: NewRequestArgs) -> Result<()> {
        let mut workflow = self
            .desk
            .start_request(self.session.clone(), args.invite.as_deref())
            .await
            .context("Failed to start request")?;
        workflow.update(args.draft_patch());

        for path in &args.photos {
            attach_photo(&mut workflow, path).await?;
        }

        if workflow.draft().category.is_none() {
            if let Some(found) = workflow
                .suggest_category(&KeywordClassifier::new())
                .await
                .context("Failed to classify description")?
            {
                if workflow.draft().category.is_some() {
                    self.renderer.render(&OperationStatus::success(format!(
                        "Using suggested category {found}"
                    )));
                }
            }
        }

        while workflow.current_step() != StepId::Submission {
            if workflow.current_step() == StepId::Review {
                self.renderer.render(&workflow.review());
            }
            if let Err(e) = workflow.advance() {
                self.renderer.render(&OperationStatus::failure(e.to_string()));
                bail!("Request was not submitted");
            }
            debug!("Now on {}", workflow.current_step());
        }

        let options = if args.skip_failed_photos {
            SubmitOptions::skip_failed_photos()
        } else {
            SubmitOptions::default()
        };

        let outcome = if args.dry_run {
            info!("Dry run, nothing will be saved");
            let submitter = Submitter::with_config(
                MemoryRecordStore::new(),
                MemoryBlobStore::new(),
                self.desk.submitter().config().clone(),
            );
            workflow.submit(&submitter, &options).await
        } else {
            workflow.submit(self.desk.submitter(), &options).await
        };

        match outcome {
            Ok(result) => {
                self.renderer.render(&result);
                Ok(())
            }
            Err(e) => {
                self.renderer.render(&OperationStatus::failure(e.user_message()));
                for failure in e.failed_attachments() {
                    self.renderer.render(&format!(
                        "- {}: {}\n",
                        failure.file_name, failure.reason
                    ));
                }
                Err(e).context("Submission failed")
            }
        }
    }

    pub async fn list_requests(&self, params: &ListRequests) -> Result<()> {
        let requests = self
            .desk
            .list_requests(&self.session, params)
            .await
            .context("Failed to list requests")?;
        self.renderer.render(&requests);
        Ok(())
    }

    async fn show_request(&self, params: &Id) -> Result<()> {
        match self
            .desk
            .get_request(params)
            .await
            .context("Failed to load request")?
        {
            Some(request) => self.renderer.render(&request),
            None => bail!("Request {} not found", params.id),
        }
        Ok(())
    }

    async fn cancel_request(&self, params: &Id) -> Result<()> {
        let request = self
            .desk
            .cancel_request(&self.session, params)
            .await
            .with_context(|| format!("Failed to cancel request {}", params.id))?;
        self.renderer.render(&UpdateResult::with_changes(
            request,
            vec!["Status: cancelled".to_string()],
        ));
        Ok(())
    }

    async fn delete_request(&self, params: &DeleteRequest) -> Result<()> {
        match self
            .desk
            .delete_request(params)
            .await
            .context("Failed to delete request")?
        {
            Some(request) => self.renderer.render(&DeleteResult::new(request)),
            None => bail!("Request {} not found", params.id),
        }
        Ok(())
    }

    async fn set_status(&self, params: &SetStatus) -> Result<()> {
        let request = self
            .desk
            .update_status(params)
            .await
            .with_context(|| format!("Failed to update request {}", params.id))?;
        let change = format!("Status: {}", request.status);
        self.renderer
            .render(&UpdateResult::with_changes(request, vec![change]));
        Ok(())
    }
}

async fn attach_photo(workflow: &mut RequestWorkflow, path: &Path) -> Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read photo {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    workflow
        .attach(file_name, content_type_for(path), bytes)
        .with_context(|| format!("Cannot attach {}", path.display()))?;
    Ok(())
}

/// MIME type from the file extension. Unknown extensions are rejected by the
/// attachment validator.
fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}
