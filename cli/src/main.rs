mod config;
mod storage;
mod transport;

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use staffdesk_client::net::api::{ApiClient, ApiError};
use staffdesk_client::net::types::{ComplaintDraft, DepartmentDraft, EmployeeDraft, PermissionDraft, ReminderDraft};
use staffdesk_client::services::complaints::{self, ComplaintQuery};
use staffdesk_client::services::departments::{self, DepartmentQuery};
use staffdesk_client::services::employees::{self, EmployeeQuery};
use staffdesk_client::services::permissions;
use staffdesk_client::services::reminders::{self, DEFAULT_UPCOMING_DAYS, ReminderQuery};
use staffdesk_client::state::auth::{AuthError, AuthMachine};
use staffdesk_client::state::session_store::SessionStore;
use staffdesk_client::util::storage::StorageError;

use crate::config::{ConfigError, DEFAULT_API_URL, DEFAULT_LOG_FILTER, DEFAULT_TIMEOUT_SECS, Settings};
use crate::storage::FileStorage;
use crate::transport::ReqwestTransport;

type Machine = AuthMachine<ReqwestTransport, FileStorage>;
type Api = ApiClient<ReqwestTransport, FileStorage>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("could not read password: {0}")]
    Io(#[from] io::Error),
    #[error("password is required; pass --password, set STAFFDESK_PASSWORD, or pipe it on stdin")]
    MissingPassword,
    #[error("not signed in; run `staffdesk login` first")]
    NotSignedIn,
}

#[derive(Parser, Debug)]
#[command(name = "staffdesk", about = "Workplace dashboard client")]
struct Cli {
    #[arg(long, env = "STAFFDESK_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Credential file; defaults to `$HOME/.staffdesk/session.json`.
    #[arg(long, env = "STAFFDESK_STORE")]
    store: Option<PathBuf>,

    #[arg(long, env = "STAFFDESK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange credentials for a session and store it.
    Login {
        username: String,
        #[arg(long, env = "STAFFDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Print the stored user and role flags.
    Whoami,
    Employees(EmployeesCommand),
    Departments(DepartmentsCommand),
    Complaints(ComplaintsCommand),
    Reminders(RemindersCommand),
    Permissions(PermissionsCommand),
}

#[derive(Args, Debug)]
struct EmployeesCommand {
    #[command(subcommand)]
    command: EmployeesSubcommand,
}

#[derive(Subcommand, Debug)]
enum EmployeesSubcommand {
    List {
        #[arg(long)]
        skip: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        department_id: Option<i64>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        order: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct DepartmentsCommand {
    #[command(subcommand)]
    command: DepartmentsSubcommand,
}

#[derive(Subcommand, Debug)]
enum DepartmentsSubcommand {
    List {
        #[arg(long)]
        skip: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct ComplaintsCommand {
    #[command(subcommand)]
    command: ComplaintsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ComplaintsSubcommand {
    List {
        #[arg(long)]
        skip: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        severity: Option<String>,
        #[arg(long)]
        department: Option<i64>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
    Status {
        id: i64,
        status: String,
    },
    Assign {
        id: i64,
        user_id: i64,
    },
    Privacy {
        id: i64,
        #[arg(action = clap::ArgAction::Set)]
        is_private: bool,
    },
    ByDepartment {
        department_id: i64,
    },
    Handlers {
        department_id: i64,
    },
}

#[derive(Args, Debug)]
struct RemindersCommand {
    #[command(subcommand)]
    command: RemindersSubcommand,
}

#[derive(Subcommand, Debug)]
enum RemindersSubcommand {
    List {
        #[arg(long)]
        skip: Option<u64>,
        #[arg(long)]
        limit: Option<u64>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        order: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
    Complete {
        id: i64,
    },
    Upcoming {
        #[arg(long, default_value_t = DEFAULT_UPCOMING_DAYS)]
        days: u32,
    },
    Today,
}

#[derive(Args, Debug)]
struct PermissionsCommand {
    #[command(subcommand)]
    command: PermissionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PermissionsSubcommand {
    List,
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
    Roles,
}

#[derive(Serialize)]
struct Whoami<'a> {
    user: &'a staffdesk_client::net::types::User,
    role: &'static str,
    is_admin: bool,
    is_manager: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let settings = Settings::resolve(&cli.api_url, cli.store, cli.timeout_secs, home.as_deref())?;
    let machine = build_machine(&settings)?;
    machine.initialize();

    match cli.command {
        Command::Login { username, password } => run_login(&machine, &username, password).await,
        Command::Logout => {
            machine.logout();
            Ok(())
        }
        Command::Whoami => run_whoami(&machine),
        Command::Employees(cmd) => run_employees(signed_in(&machine)?, cmd).await,
        Command::Departments(cmd) => run_departments(signed_in(&machine)?, cmd).await,
        Command::Complaints(cmd) => run_complaints(signed_in(&machine)?, cmd).await,
        Command::Reminders(cmd) => run_reminders(signed_in(&machine)?, cmd).await,
        Command::Permissions(cmd) => run_permissions(signed_in(&machine)?, cmd).await,
    }
}

/// Diagnostics go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

fn build_machine(settings: &Settings) -> Result<Machine, CliError> {
    let transport = ReqwestTransport::new(&settings.api, settings.timeout)?;
    let store = SessionStore::new(FileStorage::new(&settings.store_path));
    Ok(AuthMachine::new(ApiClient::new(transport, store)))
}

fn signed_in(machine: &Machine) -> Result<&Api, CliError> {
    if !machine.session().is_authenticated() {
        return Err(CliError::NotSignedIn);
    }
    Ok(machine.api())
}

async fn run_login(machine: &Machine, username: &str, password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(password) => password,
        None => read_password_line(io::stdin().lock())?,
    };
    machine.login(username, &password).await?;
    run_whoami(machine)
}

fn read_password_line(mut input: impl BufRead) -> Result<String, CliError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(CliError::MissingPassword);
    }
    Ok(password.to_owned())
}

fn run_whoami(machine: &Machine) -> Result<(), CliError> {
    let session = machine.session();
    let user = session.user.as_ref().ok_or(CliError::NotSignedIn)?;
    print_json(&Whoami {
        user,
        role: user.role_kind().label(),
        is_admin: user.is_admin(),
        is_manager: user.is_manager(),
    })
}

async fn run_employees(api: &Api, cmd: EmployeesCommand) -> Result<(), CliError> {
    match cmd.command {
        EmployeesSubcommand::List { skip, limit, department_id, status, position, sort, order, search } => {
            let query = EmployeeQuery { skip, limit, department_id, status, position, sort, order, search };
            print_json(&employees::list(api, &query).await?)
        }
        EmployeesSubcommand::Get { id } => print_json(&employees::get(api, id).await?),
        EmployeesSubcommand::Create { data } => {
            let draft: EmployeeDraft = parse_data(&data)?;
            print_json(&employees::create(api, &draft).await?)
        }
        EmployeesSubcommand::Update { id, data } => {
            let draft: EmployeeDraft = parse_data(&data)?;
            print_json(&employees::update(api, id, &draft).await?)
        }
        EmployeesSubcommand::Delete { id } => print_json(&employees::delete(api, id).await?),
    }
}

async fn run_departments(api: &Api, cmd: DepartmentsCommand) -> Result<(), CliError> {
    match cmd.command {
        DepartmentsSubcommand::List { skip, limit } => {
            print_json(&departments::list(api, &DepartmentQuery { skip, limit }).await?)
        }
        DepartmentsSubcommand::Get { id } => print_json(&departments::get(api, id).await?),
        DepartmentsSubcommand::Create { data } => {
            let draft: DepartmentDraft = parse_data(&data)?;
            print_json(&departments::create(api, &draft).await?)
        }
        DepartmentsSubcommand::Update { id, data } => {
            let draft: DepartmentDraft = parse_data(&data)?;
            print_json(&departments::update(api, id, &draft).await?)
        }
        DepartmentsSubcommand::Delete { id } => print_json(&departments::delete(api, id).await?),
    }
}

async fn run_complaints(api: &Api, cmd: ComplaintsCommand) -> Result<(), CliError> {
    match cmd.command {
        ComplaintsSubcommand::List { skip, limit, status, severity, department } => {
            let query = ComplaintQuery { skip, limit, status, severity, department_involved: department };
            print_json(&complaints::list(api, &query).await?)
        }
        ComplaintsSubcommand::Get { id } => print_json(&complaints::get(api, id).await?),
        ComplaintsSubcommand::Create { data } => {
            let draft: ComplaintDraft = parse_data(&data)?;
            print_json(&complaints::create(api, &draft).await?)
        }
        ComplaintsSubcommand::Update { id, data } => {
            let draft: ComplaintDraft = parse_data(&data)?;
            print_json(&complaints::update(api, id, &draft).await?)
        }
        ComplaintsSubcommand::Delete { id } => print_json(&complaints::delete(api, id).await?),
        ComplaintsSubcommand::Status { id, status } => print_json(&complaints::update_status(api, id, &status).await?),
        ComplaintsSubcommand::Assign { id, user_id } => print_json(&complaints::assign(api, id, user_id).await?),
        ComplaintsSubcommand::Privacy { id, is_private } => {
            print_json(&complaints::set_privacy(api, id, is_private).await?)
        }
        ComplaintsSubcommand::ByDepartment { department_id } => {
            print_json(&complaints::by_department(api, department_id).await?)
        }
        ComplaintsSubcommand::Handlers { department_id } => {
            print_json(&complaints::department_handlers(api, department_id).await?)
        }
    }
}

async fn run_reminders(api: &Api, cmd: RemindersCommand) -> Result<(), CliError> {
    match cmd.command {
        RemindersSubcommand::List { skip, limit, sort, order, completed, priority, search } => {
            let query = ReminderQuery { skip, limit, sort, order, completed, priority, search };
            print_json(&reminders::list(api, &query).await?)
        }
        RemindersSubcommand::Get { id } => print_json(&reminders::get(api, id).await?),
        RemindersSubcommand::Create { data } => {
            let draft: ReminderDraft = parse_data(&data)?;
            print_json(&reminders::create(api, &draft).await?)
        }
        RemindersSubcommand::Update { id, data } => {
            let draft: ReminderDraft = parse_data(&data)?;
            print_json(&reminders::update(api, id, &draft).await?)
        }
        RemindersSubcommand::Delete { id } => print_json(&reminders::delete(api, id).await?),
        RemindersSubcommand::Complete { id } => print_json(&reminders::complete(api, id).await?),
        RemindersSubcommand::Upcoming { days } => print_json(&reminders::upcoming(api, days).await?),
        RemindersSubcommand::Today => print_json(&reminders::today(api).await?),
    }
}

async fn run_permissions(api: &Api, cmd: PermissionsCommand) -> Result<(), CliError> {
    match cmd.command {
        PermissionsSubcommand::List => print_json(&permissions::list(api).await?),
        PermissionsSubcommand::Get { id } => print_json(&permissions::get(api, id).await?),
        PermissionsSubcommand::Create { data } => {
            let draft: PermissionDraft = parse_data(&data)?;
            print_json(&permissions::create(api, &draft).await?)
        }
        PermissionsSubcommand::Update { id, data } => {
            let draft: PermissionDraft = parse_data(&data)?;
            print_json(&permissions::update(api, id, &draft).await?)
        }
        PermissionsSubcommand::Delete { id } => print_json(&permissions::delete(api, id).await?),
        PermissionsSubcommand::Roles => print_json(&permissions::roles(api).await?),
    }
}

fn parse_data<T: DeserializeOwned>(data: &str) -> Result<T, CliError> {
    Ok(serde_json::from_str(data)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
