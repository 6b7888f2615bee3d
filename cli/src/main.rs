//! Command-line client for the classifieds marketplace API.
//!
//! Runs the same session store and route guard as the browser client, with
//! the session blob kept in a file between invocations.

mod http;
mod report;
mod store;


use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use marketplace::api::RestAuthApi;
use marketplace::fetch::{FetchClient, HttpTransport};
use marketplace::guard::evaluate_path;
use marketplace::market::listings_path;
use marketplace::models::{Listing, ListingFilters};
use marketplace::user::SellerType;
use marketplace::validate::{
    RegisterForm, validate_email, validate_password_reset, validate_registration, validate_verification,
};
use marketplace::{AuthError, Permission, Session, SessionStorage};
use serde::Serialize;

use crate::http::ReqwestTransport;
use crate::report::TerminalEvents;
use crate::store::{DEFAULT_SESSION_FILE, FileStorage};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("not signed in; run `login` first")]
    NotSignedIn,
    #[error("unknown permission `{0}`")]
    UnknownPermission(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "marketplace-cli", about = "Classifieds marketplace API client")]
struct Cli {
    #[arg(long, env = "MARKETPLACE_BASE_URL", default_value = "http://localhost:3000/api")]
    base_url: String,

    #[arg(long, env = "MARKETPLACE_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    session_file: String,

    /// Log HTTP traffic and session transitions to stderr.
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Restore and refresh the stored session, then describe it.
    Status,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MARKETPLACE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register(RegisterArgs),
    /// Confirm the emailed one-time code and sign in.
    Verify {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
    },
    Logout,
    /// Print the signed-in user as JSON.
    Whoami,
    /// Evaluate the route guard for a path, or check one permission.
    Can {
        path: String,
        #[arg(long, help = "Check a permission (e.g. messages.access) instead of a route")]
        permission: bool,
    },
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
        #[arg(long, env = "MARKETPLACE_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Listings(ListingArgs),
    Categories,
    /// Print the signed-in user's profile as JSON.
    Profile,
    Messages(MessagesCommand),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AccountKind {
    Buyer,
    Seller,
    Pro,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    username: String,
    #[arg(long, env = "MARKETPLACE_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, value_enum, default_value_t = AccountKind::Buyer)]
    account: AccountKind,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    whatsapp: Option<String>,
    #[arg(long)]
    company_name: Option<String>,
}

impl RegisterArgs {
    fn form(&self) -> RegisterForm {
        let seller_type = match self.account {
            AccountKind::Buyer => None,
            AccountKind::Seller => Some(SellerType::Particular),
            AccountKind::Pro => Some(SellerType::Professional),
        };
        RegisterForm {
            email: self.email.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            password_confirm: self.password.clone(),
            wants_to_sell: self.account != AccountKind::Buyer,
            seller_type,
            phone: self.phone.clone().unwrap_or_default(),
            whatsapp: self.whatsapp.clone().unwrap_or_default(),
            company_name: self.company_name.clone().unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug)]
struct ListingArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    subcategory: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    min_price: Option<String>,
    #[arg(long)]
    max_price: Option<String>,
    #[arg(long, help = "achat or location")]
    transaction_type: Option<String>,
}

impl ListingArgs {
    fn filters(&self) -> ListingFilters {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        ListingFilters {
            category: text(&self.category),
            subcategory: text(&self.subcategory),
            city: text(&self.city),
            region: text(&self.region),
            min_price: text(&self.min_price),
            max_price: text(&self.max_price),
            transaction_type: text(&self.transaction_type),
        }
    }
}

#[derive(Args, Debug)]
struct MessagesCommand {
    #[command(subcommand)]
    command: MessagesSubcommand,
}

#[derive(Subcommand, Debug)]
enum MessagesSubcommand {
    Conversations,
    Unread,
    /// Show one conversation and mark it read.
    Thread {
        user_id: String,
    },
    Send {
        user_id: String,
        content: String,
    },
    Delete {
        message_id: String,
    },
}

/// Everything a command needs, built once per run.
struct CliContext {
    session: Arc<Session>,
    fetch: FetchClient,
    events: Arc<TerminalEvents>,
}

impl CliContext {
    fn new(base_url: &str, session_file: &str) -> Self {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(base_url));
        let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::new(session_file));
        let events = Arc::new(TerminalEvents::new());
        let session = Arc::new(Session::new(
            Arc::new(RestAuthApi::new(Arc::clone(&transport))),
            Arc::clone(&storage),
            events.clone(),
        ));
        Self { session, fetch: FetchClient::new(transport, storage), events }
    }

    fn require_user(&self) -> Result<marketplace::AuthUser, CliError> {
        self.session.user().ok_or(CliError::NotSignedIn)
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = CliContext::new(&cli.base_url, &cli.session_file);
    ctx.session.initialize().await;

    match cli.command {
        Command::Status => {
            println!("{}", report::render_status(&ctx.session.snapshot()));
            Ok(())
        }
        Command::Login { email, password } => {
            ctx.session.login(&email, &password).await?;
            println!("{}", report::render_status(&ctx.session.snapshot()));
            Ok(())
        }
        Command::Register(args) => run_register(&ctx, &args).await,
        Command::Verify { email, code } => run_verify(&ctx, &email, &code).await,
        Command::Logout => {
            ctx.session.logout().await;
            Ok(())
        }
        Command::Whoami => print_json(&ctx.require_user()?),
        Command::Can { path, permission } => run_can(&ctx, &path, permission),
        Command::ForgotPassword { email } => {
            let email = validate_email(&email)?;
            ctx.session.api().forgot_password(&email).await?;
            println!("reset code sent to {email}");
            Ok(())
        }
        Command::ResetPassword { email, code, password } => {
            let (email, code) = validate_password_reset(&email, &code, &password, &password)?;
            let api = ctx.session.api();
            api.verify_reset_code(&email, &code).await?;
            api.reset_password(&email, &code, &password).await?;
            println!("password updated; sign in with `login`");
            Ok(())
        }
        Command::Listings(args) => {
            let listings: Vec<Listing> = ctx.fetch.get_json(&listings_path(&args.filters(), args.page)).await?;
            for listing in &listings {
                println!("{}", report::render_listing(listing));
            }
            Ok(())
        }
        Command::Categories => {
            for category in &ctx.fetch.categories().await? {
                println!("{}", report::render_category(category));
            }
            Ok(())
        }
        Command::Profile => {
            ctx.require_user()?;
            print_json(&ctx.fetch.profile().await?)
        }
        Command::Messages(messages) => run_messages(&ctx, messages.command).await,
    }
}

async fn run_register(ctx: &CliContext, args: &RegisterArgs) -> Result<(), CliError> {
    let payload = validate_registration(&args.form())?;
    ctx.session.register(&payload).await?;
    if let Some(next) = ctx.events.last_navigation() {
        println!("check your inbox, then run `verify` (web: {next})");
    }
    Ok(())
}

async fn run_verify(ctx: &CliContext, email: &str, code: &str) -> Result<(), CliError> {
    let (email, code) = validate_verification(email, code)?;
    let res = ctx.session.api().verify_email(&email, &code).await?;
    ctx.session.complete_verification(res)?;
    println!("{}", report::render_status(&ctx.session.snapshot()));
    Ok(())
}

fn run_can(ctx: &CliContext, target: &str, permission: bool) -> Result<(), CliError> {
    if permission {
        let parsed = Permission::parse(target).ok_or_else(|| CliError::UnknownPermission(target.to_owned()))?;
        let verdict = if ctx.session.has_permission(parsed) { "granted" } else { "denied" };
        println!("{target}: {verdict}");
        return Ok(());
    }
    let decision = evaluate_path(&ctx.session.snapshot(), target);
    println!("{}", report::render_decision(target, &decision));
    Ok(())
}

async fn run_messages(ctx: &CliContext, command: MessagesSubcommand) -> Result<(), CliError> {
    let me = ctx.require_user()?;
    match command {
        MessagesSubcommand::Conversations => {
            for conversation in &ctx.fetch.conversations().await? {
                println!("{}", report::render_conversation(conversation));
            }
        }
        MessagesSubcommand::Unread => println!("{}", ctx.fetch.unread_count().await?),
        MessagesSubcommand::Thread { user_id } => {
            for message in &ctx.fetch.conversation(&user_id).await? {
                println!("{}", report::render_message(message, Some(&me.id)));
            }
            ctx.fetch.mark_conversation_read(&user_id).await?;
        }
        MessagesSubcommand::Send { user_id, content } => {
            let sent = ctx.fetch.send_message(&user_id, content.trim()).await?;
            println!("{}", report::render_message(&sent, Some(&me.id)));
        }
        MessagesSubcommand::Delete { message_id } => {
            ctx.fetch.delete_message(&message_id).await?;
            println!("deleted {message_id}");
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
