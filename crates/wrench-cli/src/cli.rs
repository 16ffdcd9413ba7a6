//! Subcommand argument definitions.
//!
//! Each clap struct converts into the plain parameter type from
//! `wrench_core::params` (or a `DraftPatch` for a new request), so the core
//! never sees clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Desk / Workflow
//! ```

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use wrench_core::{
    models::{ContactPreference, DraftPatch, Urgency},
    params::{AddInvite, DeleteRequest, Id, ListRequests, SetStatus},
};

/// File a new maintenance request
///
/// The request is walked through every step of the form in order. If a step
/// is missing something the command stops there and says why. When
/// `--category` is left out, a category is suggested from the description
/// and used if the match is strong enough.
#[derive(Args)]
pub struct NewRequestArgs {
    #[arg(short, long, help = "Issue category, e.g. plumbing, electrical, hvac")]
    pub category: Option<String>,
    #[arg(long, help = "Narrower type within the category, e.g. faucet")]
    pub subcategory: Option<String>,
    #[arg(
        short,
        long,
        help = "What is wrong, in at least 10 characters"
    )]
    pub description: String,
    #[arg(short, long, value_enum, help = "How soon this needs attention")]
    pub urgency: Option<UrgencyArg>,
    #[arg(short, long, help = "Where in the home the issue is, e.g. Kitchen")]
    pub location: Option<String>,
    #[arg(
        short,
        long = "photo",
        value_name = "PATH",
        help = "Photo of the issue (repeat for up to 5 photos)"
    )]
    pub photos: Vec<PathBuf>,
    #[arg(long, value_enum, help = "Preferred contact channel")]
    pub contact: Option<ContactArg>,
    #[arg(long, help = "Best time to reach you, e.g. 'after 5pm'")]
    pub best_time: Option<String>,
    #[arg(long, help = "Allow staff to enter when nobody is home")]
    pub allow_entry: bool,
    #[arg(long, help = "Invite code of the property this request is for")]
    pub invite: Option<String>,
    #[arg(
        long,
        help = "Submit without photos that fail to upload instead of aborting"
    )]
    pub skip_failed_photos: bool,
    #[arg(
        long,
        help = "Run the whole flow against in-memory stores without saving anything"
    )]
    pub dry_run: bool,
}

impl NewRequestArgs {
    /// Field values as a single draft patch. Photos are attached separately.
    pub fn draft_patch(&self) -> DraftPatch {
        DraftPatch {
            property_id: None,
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            description: Some(self.description.clone()),
            urgency: self.urgency.map(Urgency::from),
            location: self.location.clone(),
            contact_preference: self.contact.map(ContactPreference::from),
            best_time_to_contact: self.best_time.clone(),
            allow_entry_without_tenant: self.allow_entry.then_some(true),
        }
    }
}

/// List your requests, newest first
#[derive(Args)]
pub struct ListRequestsArgs {
    #[arg(
        short,
        long,
        help = "Only show requests in this status (submitted, in_progress, completed, cancelled)"
    )]
    pub status: Option<String>,
    #[arg(short = 'n', long, help = "Show at most this many requests")]
    pub limit: Option<usize>,
}

impl From<ListRequestsArgs> for ListRequests {
    fn from(val: ListRequestsArgs) -> Self {
        ListRequests {
            status: val.status,
            limit: val.limit,
        }
    }
}

#[derive(Args)]
pub struct RequestIdArgs {
    #[arg(help = "Request number")]
    pub id: u64,
}

impl From<RequestIdArgs> for Id {
    fn from(val: RequestIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Delete a request permanently
#[derive(Args)]
pub struct DeleteRequestArgs {
    #[arg(help = "Request number to permanently delete")]
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteRequestArgs> for DeleteRequest {
    fn from(val: DeleteRequestArgs) -> Self {
        DeleteRequest {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Move a request to another status
///
/// Used by maintenance staff to record progress. Accepts submitted,
/// in_progress, completed and cancelled.
#[derive(Args)]
pub struct SetStatusArgs {
    #[arg(help = "Request number")]
    pub id: u64,
    #[arg(help = "New status")]
    pub status: String,
}

impl From<SetStatusArgs> for SetStatus {
    fn from(val: SetStatusArgs) -> Self {
        SetStatus {
            id: val.id,
            status: val.status,
        }
    }
}

#[derive(Subcommand)]
pub enum RequestCommands {
    /// File a new maintenance request
    #[command(alias = "n")]
    New(NewRequestArgs),
    /// List your requests
    #[command(aliases = ["l", "ls"])]
    List(ListRequestsArgs),
    /// Show one request in full
    #[command(alias = "s")]
    Show(RequestIdArgs),
    /// Cancel a request that has not been picked up yet
    Cancel(RequestIdArgs),
    /// Delete a request permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteRequestArgs),
    /// Move a request to another status
    Status(SetStatusArgs),
}

/// Register an invite code for a property
#[derive(Args)]
pub struct AddInviteArgs {
    #[arg(help = "Invite code handed to tenants (case-insensitive)")]
    pub code: String,
    #[arg(help = "Identifier of the property")]
    pub property_id: String,
    #[arg(help = "Display name of the property")]
    pub property_name: String,
}

impl From<AddInviteArgs> for AddInvite {
    fn from(val: AddInviteArgs) -> Self {
        AddInvite {
            code: val.code,
            property_id: val.property_id,
            property_name: val.property_name,
        }
    }
}

#[derive(Args)]
pub struct ShowInviteArgs {
    #[arg(help = "Invite code to look up")]
    pub code: String,
}

#[derive(Subcommand)]
pub enum InviteCommands {
    /// Register an invite code for a property
    #[command(alias = "a")]
    Add(AddInviteArgs),
    /// Show the property an invite code belongs to
    #[command(alias = "s")]
    Show(ShowInviteArgs),
}

#[derive(Args)]
pub struct ClassifyArgs {
    #[arg(help = "Description of the problem")]
    pub description: String,
}

/// Decide the next step from a repair assistant's analysis
///
/// The analysis is a JSON object with `parts_needed`, `complexity_level`
/// (low, medium or high) and `further_inquiry`, plus optional
/// `further_questions` and `instructions`. A reply that is not JSON is
/// printed as written.
#[derive(Args)]
pub struct AnalyzeArgs {
    #[arg(
        help = "Assistant reply, JSON or plain text",
        required_unless_present = "file",
        conflicts_with = "file"
    )]
    pub reply: Option<String>,
    #[arg(short, long, value_name = "PATH", help = "Read the reply from a file")]
    pub file: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum UrgencyArg {
    /// Cosmetic or can wait a week
    Low,
    /// Should be looked at within a few days
    Medium,
    /// Affects daily living
    High,
    /// Safety risk or active damage
    Urgent,
}

impl From<UrgencyArg> for Urgency {
    fn from(val: UrgencyArg) -> Self {
        match val {
            UrgencyArg::Low => Urgency::Low,
            UrgencyArg::Medium => Urgency::Medium,
            UrgencyArg::High => Urgency::High,
            UrgencyArg::Urgent => Urgency::Urgent,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ContactArg {
    Phone,
    Email,
    Text,
}

impl From<ContactArg> for ContactPreference {
    fn from(val: ContactArg) -> Self {
        match val {
            ContactArg::Phone => ContactPreference::Phone,
            ContactArg::Email => ContactPreference::Email,
            ContactArg::Text => ContactPreference::Text,
        }
    }
}
