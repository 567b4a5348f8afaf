//! HQ Console CLI
//!
//! Command-line front end for the console operations:
//! - Log in and out, show the signed-in user
//! - Show the dashboard
//! - List, filter, browse and add centers and clients

pub mod output;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{
    Address, CenterPage, ClientFilter, ConsoleApi, ConsoleClient, Level, NewClientInput,
    RowsPerPage,
};
use crate::config::{generate_default_config, Config};
use crate::countries;
use crate::dashboard::{DashboardHeader, DashboardSummary, Referrer};
use crate::session::{Session, SessionStore};
use crate::table::{ListController, ListState};
use crate::validation::{LoginForm, NewCenterForm};

#[derive(Parser)]
#[command(name = "hq-console")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Admin console for HQ centers and clients")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        #[arg(short, long)]
        email: String,
        /// Password (or set HQ_CONSOLE_PASSWORD)
        #[arg(short, long, env = "HQ_CONSOLE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the session
    Logout,

    /// Show the signed-in user
    Me,

    /// Show the center dashboard
    Dashboard {
        /// Only commissions from this referrer (1, 2 or 3)
        #[arg(long)]
        referrer: Option<String>,
    },

    /// HQ clients (centers)
    #[command(subcommand)]
    Centers(CenterCommands),

    /// Clients
    #[command(subcommand)]
    Clients(ClientCommands),

    /// List country filter options
    Countries {
        /// Only countries whose name contains this text
        filter: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CenterCommands {
    /// One page of centers
    List(ListArgs),

    /// Page through centers interactively
    Browse(ListArgs),

    /// Create a center
    Add {
        #[arg(long)]
        center_id: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        referer: Option<String>,
        #[arg(long, default_value = "bronze")]
        level: String,
    },
}

#[derive(Subcommand)]
pub enum ClientCommands {
    /// Every client
    List,

    /// One page of clients
    Filter {
        #[command(flatten)]
        list: ListArgs,
        /// Center ID
        #[arg(long, default_value = "")]
        center: String,
    },

    /// Create a client
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        center_id: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: u32,
    /// Rows per page: 5, 10, 25 or all (default from config)
    #[arg(long)]
    pub rows: Option<String>,
    /// Country name or code
    #[arg(long)]
    pub country: Option<String>,
    /// bronze, silver, gold or platinum
    #[arg(long)]
    pub level: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
}

impl ListArgs {
    /// Table state described by the flags
    pub fn to_state(&self, default_rows: RowsPerPage) -> anyhow::Result<ListState> {
        let mut state = ListState::new();

        state.set_rows_per_page(match &self.rows {
            Some(rows) => parse_rows(rows)?,
            None => default_rows,
        });
        if let Some(country) = &self.country {
            state.set_country(resolve_country(country));
        }
        if let Some(level) = &self.level {
            state.set_level(Some(level.parse::<Level>().map_err(anyhow::Error::msg)?));
        }
        if let Some(search) = &self.search {
            state.set_search(search.clone());
        }
        state.set_page(self.page.saturating_sub(1));

        Ok(state)
    }
}

fn ensure_page_in_range(state: &ListState, filtered: u64) -> anyhow::Result<()> {
    if state.is_past_end(filtered) {
        anyhow::bail!(
            "Page {} is past the last page ({})",
            state.page + 1,
            state.page_count(filtered)
        );
    }
    Ok(())
}

fn parse_rows(value: &str) -> anyhow::Result<RowsPerPage> {
    if value.eq_ignore_ascii_case("all") {
        return Ok(RowsPerPage::All);
    }
    let n: i64 = value
        .parse()
        .with_context(|| format!("Invalid rows per page: {}", value))?;
    RowsPerPage::from_wire(n).with_context(|| format!("Invalid rows per page: {}", value))
}

/// Country filter value for a name or code; "all" clears the filter
fn resolve_country(input: &str) -> String {
    match countries::find(input) {
        Some(option) => option.filter_value().to_string(),
        None => input.trim().to_string(),
    }
}

/// Entry point used by the binary
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    crate::logging::init(&config.logging);

    let store = SessionStore::new(&config.session.file);
    let session = store.load()?;
    let client = ConsoleClient::new(&config.api)?
        .with_cookies(session.as_ref().map(|s| s.cookies.clone()).unwrap_or_default());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let format = cli.format;

    match cli.command {
        Commands::Login { email, password } => {
            login(&client, &store, &email, &password, &mut out).await
        }
        Commands::Logout => {
            let result = client.logout().await;
            store.clear()?;
            result?;
            writeln!(out, "Logged out")?;
            Ok(())
        }
        Commands::Me => show_me(&client, format, &mut out).await,
        Commands::Dashboard { referrer } => {
            let referrer = match referrer {
                Some(value) => Some(
                    Referrer::from_value(&value)
                        .with_context(|| format!("Unknown referrer: {}", value))?,
                ),
                None => None,
            };
            let user = session.and_then(|s| s.user);
            show_dashboard(user.as_ref(), referrer, format, &mut out)
        }
        Commands::Centers(CenterCommands::List(args)) => {
            let state = args.to_state(config.table.rows_per_page())?;
            list_centers(&client, &state, format, &mut out).await
        }
        Commands::Centers(CenterCommands::Browse(args)) => {
            let state = args.to_state(config.table.rows_per_page())?;
            browse_centers(&client, state, &mut out).await
        }
        Commands::Centers(CenterCommands::Add {
            center_id,
            city,
            country,
            referer,
            level,
        }) => {
            let form = NewCenterForm {
                center_id,
                city,
                country,
                referer_center_id: referer.unwrap_or_default(),
                level,
            };
            let input = form.validate()?;
            let reply = client.add_center(&input).await?;
            writeln!(out, "{}", non_empty(reply.message, "Center created"))?;
            Ok(())
        }
        Commands::Clients(ClientCommands::List) => {
            let clients = client.get_clients().await?;
            match format {
                OutputFormat::Json => print_json(&clients, &mut out),
                OutputFormat::Table => {
                    write!(out, "{}", output::render_clients(&clients))?;
                    Ok(())
                }
            }
        }
        Commands::Clients(ClientCommands::Filter { list, center }) => {
            let state = list.to_state(config.table.rows_per_page())?;
            let filter = ClientFilter {
                page: state.page,
                rows_per_page: state.rows_per_page,
                country: state.country.clone(),
                center,
                search: state.search.clone(),
            };
            let page = client.filter_clients(&filter).await?;
            ensure_page_in_range(&state, page.filtered_counts)?;
            match format {
                OutputFormat::Json => print_json(&page, &mut out),
                OutputFormat::Table => {
                    write!(out, "{}", output::render_client_page(&page, &state))?;
                    Ok(())
                }
            }
        }
        Commands::Clients(ClientCommands::Add {
            name,
            center_id,
            city,
            country,
            email,
            phone,
        }) => {
            let input = NewClientInput {
                name,
                email,
                phone,
                center_id,
                address: Address { city, country },
            };
            let reply = client.add_client(&input).await?;
            writeln!(out, "{}", non_empty(reply.message, "Client created"))?;
            Ok(())
        }
        Commands::Countries { filter } => {
            for option in countries::matching(filter.as_deref().unwrap_or("")) {
                writeln!(out, "{:<4}{}", option.code, option.label)?;
            }
            Ok(())
        }
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    writeln!(out, "Config written to {:?}", path)?;
                }
                None => write!(out, "{}", content)?,
            }
            Ok(())
        }
    }
}

fn non_empty(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

fn print_json<T: Serialize>(value: &T, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

async fn login(
    client: &ConsoleClient,
    store: &SessionStore,
    email: &str,
    password: &str,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let request = LoginForm::new(email, password).validate()?;
    let reply = client.login(&request).await?;

    let mut session = Session::new(client.cookies().await);
    match client.me().await {
        Ok(user) => session.user = Some(user),
        Err(e) => tracing::warn!(error = %e, "logged in but could not load the user"),
    }
    store.save(&session)?;

    writeln!(out, "{}", non_empty(reply.message, "Logged in"))?;
    Ok(())
}

pub async fn show_me(
    api: &dyn ConsoleApi,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let user = api.me().await?;
    match format {
        OutputFormat::Json => print_json(&user, out),
        OutputFormat::Table => {
            writeln!(out, "Name       {}", user.name)?;
            writeln!(out, "Email      {}", user.email)?;
            writeln!(out, "Role       {}", user.role)?;
            let header = DashboardHeader::for_user(Some(&user));
            writeln!(out, "Center ID  {}", header.center_id)?;
            writeln!(out, "Level      {}", header.level)?;
            Ok(())
        }
    }
}

pub fn show_dashboard(
    user: Option<&crate::api::User>,
    referrer: Option<Referrer>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let summary = DashboardSummary::sample();
    match format {
        OutputFormat::Json => print_json(&summary, out),
        OutputFormat::Table => {
            let header = DashboardHeader::for_user(user);
            write!(out, "{}", output::render_dashboard(&header, &summary, referrer))?;
            Ok(())
        }
    }
}

pub async fn list_centers(
    api: &dyn ConsoleApi,
    state: &ListState,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let page = api.filter_centers(&state.query()).await?;
    ensure_page_in_range(state, page.filtered_counts)?;
    match format {
        OutputFormat::Json => print_json(&page, out),
        OutputFormat::Table => {
            write!(out, "{}", output::render_centers(&page, state))?;
            Ok(())
        }
    }
}

const BROWSE_HELP: &str = "n next · p prev · f first · l last · s <text> search · \
c <country|all> country · v <level|none> level · r <5|10|25|all> rows · q quit";

async fn browse_centers(
    api: &dyn ConsoleApi,
    state: ListState,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut list: ListController<CenterPage> = ListController::new(state);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        refresh(api, &mut list, out).await?;
        writeln!(out, "{}", BROWSE_HELP)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if !apply_browse_command(&mut list, line.trim(), out)? {
            break;
        }
    }

    Ok(())
}

async fn refresh(
    api: &dyn ConsoleApi,
    list: &mut ListController<CenterPage>,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if let Some(query) = list.begin() {
        let result = api.filter_centers(&query).await;
        list.finish(&query, result);
    }

    if let Some(error) = list.error() {
        for message in error.toasts() {
            writeln!(out, "error: {}", message)?;
        }
    }
    if let Some(page) = list.data() {
        write!(out, "{}", output::render_centers(page, &list.state))?;
    }
    Ok(())
}

/// Apply one pager command. Returns false when the user quits.
pub fn apply_browse_command(
    list: &mut ListController<CenterPage>,
    input: &str,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    let filtered = list.data().map(|p| p.filtered_counts).unwrap_or(0);
    let (cmd, arg) = input
        .split_once(' ')
        .map(|(c, a)| (c, a.trim()))
        .unwrap_or((input, ""));

    match cmd {
        "q" | "quit" => return Ok(false),
        "n" => {
            list.state.next(filtered);
        }
        "p" => {
            list.state.prev();
        }
        "f" => {
            list.state.first();
        }
        "l" => {
            list.state.last(filtered);
        }
        "s" => {
            list.state.set_search(arg);
        }
        "c" => {
            list.state.set_country(resolve_country(arg));
        }
        "v" => {
            let level = match arg {
                "" | "none" | "all" => None,
                other => match other.parse::<Level>() {
                    Ok(level) => Some(level),
                    Err(e) => {
                        writeln!(out, "error: {}", e)?;
                        return Ok(true);
                    }
                },
            };
            list.state.set_level(level);
        }
        "r" => match parse_rows(arg) {
            Ok(rows) => {
                list.state.set_rows_per_page(rows);
            }
            Err(e) => writeln!(out, "error: {}", e)?,
        },
        "" => {}
        other => writeln!(out, "Unknown command: {}", other)?,
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_args_to_state() {
        let args = ListArgs {
            page: 3,
            rows: Some("10".to_string()),
            country: Some("fr".to_string()),
            level: Some("gold".to_string()),
            search: Some("lyon".to_string()),
        };

        let state = args.to_state(RowsPerPage::Count(5)).unwrap();
        assert_eq!(state.page, 2);
        assert_eq!(state.rows_per_page, RowsPerPage::Count(10));
        assert_eq!(state.country, "France");
        assert_eq!(state.level, Some(Level::Gold));
        assert_eq!(state.search, "lyon");
    }

    #[test]
    fn test_list_args_defaults_and_errors() {
        let state = ListArgs { page: 1, ..Default::default() }
            .to_state(RowsPerPage::All)
            .unwrap();
        assert_eq!(state.rows_per_page, RowsPerPage::All);
        assert_eq!(state.page, 0);

        let bad = ListArgs {
            rows: Some("0".to_string()),
            ..Default::default()
        };
        assert!(bad.to_state(RowsPerPage::Count(5)).is_err());
    }

    #[test]
    fn test_all_country_clears_filter() {
        assert_eq!(resolve_country("all"), "");
        assert_eq!(resolve_country("US"), "United States");
        assert_eq!(resolve_country(" Atlantis "), "Atlantis");
    }

    #[test]
    fn test_browse_commands() {
        let mut list: ListController<CenterPage> = ListController::default();
        let query = list.begin().unwrap();
        list.finish(
            &query,
            Ok(CenterPage {
                total_counts: 30,
                filtered_counts: 12,
                centers: vec![],
            }),
        );

        let mut out = Vec::new();
        assert!(apply_browse_command(&mut list, "n", &mut out).unwrap());
        assert_eq!(list.state.page, 1);
        assert!(list.begin().is_some());

        apply_browse_command(&mut list, "l", &mut out).unwrap();
        assert_eq!(list.state.page, 2);

        apply_browse_command(&mut list, "s  lyon ", &mut out).unwrap();
        assert_eq!(list.state.search, "lyon");
        assert_eq!(list.state.page, 0);

        apply_browse_command(&mut list, "v diamond", &mut out).unwrap();
        assert!(String::from_utf8(out.clone()).unwrap().contains("Unknown level"));

        apply_browse_command(&mut list, "r all", &mut out).unwrap();
        assert_eq!(list.state.rows_per_page, RowsPerPage::All);

        assert!(!apply_browse_command(&mut list, "q", &mut out).unwrap());
    }
}
