//! Alcove command-line client
//!
//! Drives the API client against a configured backend. Authenticated
//! commands read the bearer token from `ALCOVE_TOKEN` (and the account
//! email from `ALCOVE_EMAIL`); `alcove login` prints a token to export.

use std::path::PathBuf;
use std::sync::Arc;

use alcove_api::{
    ApiClient, AuthApi, FeedApi, InvitationsApi, MembersApi, SpacesApi, UsersApi,
};
use alcove_core::config::Config;
use alcove_core::core_session::{AccountRole, ProfileField, Session};
use alcove_core::core_space::{InvitationId, PostId, SpaceId};
use alcove_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "alcove")]
#[command(author, version, about = "Client for the Alcove backend", long_about = None)]
struct Args {
    /// Set the log level (trace, debug, info, warn, error), overriding the
    /// configured one
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    /// Path to a TOML config file (environment variables still override)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with email and password, printing a bearer token
    Login { email: String, password: String },

    /// List the spaces I belong to
    Spaces,

    /// Create a new space
    CreateSpace {
        name: String,
        #[arg(default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        avatar_url: String,
    },

    /// Show one space's details and my role in it
    Space { space_id: u64 },

    /// Dissolve a space (admin only, irreversible)
    Dissolve { space_id: u64 },

    /// Invite a user to a space
    Invite { space_id: u64, invitee_email: String },

    /// List my pending invitations
    Invitations,

    /// Accept a pending invitation
    Accept { invitation_id: u64 },

    /// List users who can be invited to a space
    Invitable {
        space_id: u64,
        /// Filter by name or email
        #[arg(long)]
        query: Option<String>,
    },

    /// List a space's members
    Members { space_id: u64 },

    /// Remove a member from a space (admin only)
    RemoveMember { space_id: u64, email: String },

    /// List one page of a space's posts
    Posts {
        space_id: u64,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Create a post in a space
    Post {
        space_id: u64,
        content: String,
        #[arg(long)]
        file_url: Option<String>,
    },

    /// Delete a post
    DeletePost { post_id: u64 },

    /// Comment on a post
    Comment { post_id: u64, content: String },

    /// List a post's comments
    Comments { post_id: u64 },

    /// Update one field of my profile
    SetProfile {
        #[arg(value_enum)]
        field: FieldName,
        value: String,
    },

    /// List accounts awaiting approval (admin)
    PendingUsers,

    /// List approved accounts (admin)
    ApprovedUsers,

    /// Approve a pending account (admin)
    ApproveUser { email: String },

    /// Delete an account (admin)
    DeleteUser { email: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FieldName {
    Name,
    Username,
    School,
}

impl FieldName {
    fn into_profile_field(self, value: String) -> ProfileField {
        match self {
            FieldName::Name => ProfileField::Name(value),
            FieldName::Username => ProfileField::Username(value),
            FieldName::School => ProfileField::School(value),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    let level_str = args.log_level.as_deref().unwrap_or(&config.logging.level);
    let log_level = level_str.parse::<LogLevel>().unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', using 'warn'", level_str);
        LogLevel::Warn
    });
    init_logging_with_config(
        LogConfig::new(log_level)
            .with_target(config.logging.with_target)
            .json_format(args.json_logs || config.logging.json_format),
    )?;
    alcove_api::init_metrics();
    tracing::debug!(base_url = %config.api.base_url, "configuration loaded");

    run(args.command, &config).await
}

async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let client = Arc::new(ApiClient::new(&config.api)?);
            let outcome = AuthApi::new(client).login(&email, &password).await?;

            if outcome.requires_2fa {
                eprintln!("Note: this account requires a one-time passcode before the token is usable.");
            }
            println!("export ALCOVE_TOKEN={}", outcome.token);
            println!("export ALCOVE_EMAIL={}", outcome.user.email);
            Ok(())
        }

        Command::Spaces => {
            let spaces = SpacesApi::new(client(config)?);
            print_json(&spaces.list_my_spaces().await?)
        }

        Command::CreateSpace {
            name,
            description,
            avatar_url,
        } => {
            let spaces = SpacesApi::new(client(config)?);
            print_json(&spaces.create_space(&name, &description, &avatar_url).await?)
        }

        Command::Space { space_id } => {
            let spaces = SpacesApi::new(client(config)?);
            print_json(&spaces.space_details(SpaceId(space_id)).await?)
        }

        Command::Dissolve { space_id } => {
            let spaces = SpacesApi::new(client(config)?);
            print_message(spaces.dissolve_space(SpaceId(space_id)).await?)
        }

        Command::Invite {
            space_id,
            invitee_email,
        } => {
            let invitations = InvitationsApi::new(client(config)?);
            print_message(
                invitations
                    .invite_user(SpaceId(space_id), &invitee_email)
                    .await?,
            )
        }

        Command::Invitations => {
            let invitations = InvitationsApi::new(client(config)?);
            print_json(&invitations.pending_invitations().await?)
        }

        Command::Accept { invitation_id } => {
            let invitations = InvitationsApi::new(client(config)?);
            print_message(
                invitations
                    .accept_invitation(InvitationId(invitation_id))
                    .await?,
            )
        }

        Command::Invitable { space_id, query } => {
            let invitations = InvitationsApi::new(client(config)?);
            let users = match query {
                Some(query) => {
                    invitations
                        .search_invitable_users(SpaceId(space_id), &query)
                        .await?
                }
                None => invitations.invitable_users(SpaceId(space_id)).await?,
            };
            print_json(&users)
        }

        Command::Members { space_id } => {
            let members = MembersApi::new(client(config)?);
            print_json(&members.list_members(SpaceId(space_id)).await?)
        }

        Command::RemoveMember { space_id, email } => {
            let members = MembersApi::new(client(config)?);
            print_message(members.remove_member(SpaceId(space_id), &email).await?)
        }

        Command::Posts {
            space_id,
            page,
            limit,
        } => {
            let feed = FeedApi::new(client(config)?);
            let limit = limit.unwrap_or(config.api.page_limit);
            print_json(&feed.list_posts(SpaceId(space_id), page, limit).await?)
        }

        Command::Post {
            space_id,
            content,
            file_url,
        } => {
            let feed = FeedApi::new(client(config)?);
            print_json(
                &feed
                    .create_post(SpaceId(space_id), &content, file_url.as_deref())
                    .await?,
            )
        }

        Command::DeletePost { post_id } => {
            let feed = FeedApi::new(client(config)?);
            // A one-page scratch feed; the CLI holds no cross-command state
            let mut scratch = alcove_core::core_feed::FeedAccumulator::new(config.api.page_limit);
            print_message(feed.delete_post(&mut scratch, PostId(post_id)).await?)
        }

        Command::Comment { post_id, content } => {
            let feed = FeedApi::new(client(config)?);
            print_json(&feed.add_comment(PostId(post_id), &content).await?)
        }

        Command::Comments { post_id } => {
            let feed = FeedApi::new(client(config)?);
            print_json(&feed.list_comments(PostId(post_id)).await?)
        }

        Command::SetProfile { field, value } => {
            let users = UsersApi::new(client(config)?);
            print_message(
                users
                    .update_profile_field(&field.into_profile_field(value))
                    .await?,
            )
        }

        Command::PendingUsers => {
            let users = UsersApi::new(client(config)?);
            print_json(&users.pending_users().await?)
        }

        Command::ApprovedUsers => {
            let users = UsersApi::new(client(config)?);
            print_json(&users.approved_users().await?)
        }

        Command::ApproveUser { email } => {
            let users = UsersApi::new(client(config)?);
            print_message(users.approve_user(&email).await?)
        }

        Command::DeleteUser { email } => {
            let users = UsersApi::new(client(config)?);
            print_message(users.delete_user(&email).await?)
        }
    }
}

/// Build an authenticated client from the environment
fn client(config: &Config) -> Result<Arc<ApiClient>> {
    let token = std::env::var("ALCOVE_TOKEN")
        .context("ALCOVE_TOKEN is not set; run `alcove login` first")?;
    let email = std::env::var("ALCOVE_EMAIL").unwrap_or_default();

    // The account role only gates the login flow; authenticated commands
    // rely on the server's own checks
    let session = Arc::new(Session::new(
        token,
        email.clone(),
        email,
        AccountRole::Approved,
    ));
    Ok(Arc::new(ApiClient::with_session(&config.api, session)?))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_message(message: String) -> Result<()> {
    println!("{}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_basic_commands() {
        let args = Args::try_parse_from(["alcove", "spaces"]).unwrap();
        assert!(matches!(args.command, Command::Spaces));

        let args = Args::try_parse_from(["alcove", "invite", "3", "bob@x.com"]).unwrap();
        match args.command {
            Command::Invite {
                space_id,
                invitee_email,
            } => {
                assert_eq!(space_id, 3);
                assert_eq!(invitee_email, "bob@x.com");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_posts_defaults_page_but_not_limit() {
        let args = Args::try_parse_from(["alcove", "posts", "7"]).unwrap();
        match args.command {
            Command::Posts {
                space_id,
                page,
                limit,
            } => {
                assert_eq!(space_id, 7);
                assert_eq!(page, 1);
                assert!(limit.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_set_profile_field_values() {
        let args =
            Args::try_parse_from(["alcove", "set-profile", "school", "Northwood"]).unwrap();
        match args.command {
            Command::SetProfile { field, value } => {
                let field = field.into_profile_field(value);
                assert_eq!(field, ProfileField::School("Northwood".to_string()));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_log_level_gracefully() {
        assert!("not-a-level".parse::<LogLevel>().is_err());
    }
}
