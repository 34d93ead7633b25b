// Entrypoint for the CLI application.
// Loads the config, builds the API client, dispatches the subcommand and
// reports errors with a login hint where one applies.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use envoy_cli::api::ApiClient;
use envoy_cli::cli::{Cli, Command, EnvironmentsCommand, ProjectsCommand, VariablesCommand};
use envoy_cli::commands::{auth, environments, projects, variables};
use envoy_cli::config::Config;
use envoy_cli::error::ApiError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::NoToken) => eprintln!("Please login first using 'envoy login'"),
            Some(ApiError::ExpiredToken) => {
                eprintln!("Your session has expired. Please login again using 'envoy login'");
            }
            _ => {}
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut client = ApiClient::new(config)?;

    match cli.command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Register => auth::register(&mut client),
        Command::Login => auth::login(&mut client),
        Command::Logout => auth::logout(client.config_mut()),
        Command::Profile => auth::profile(&mut client),
        Command::Projects(command) => match command {
            ProjectsCommand::Create => projects::create(&mut client),
            ProjectsCommand::List => projects::list(&mut client),
            ProjectsCommand::Get { id } => projects::get(&mut client, &id),
            ProjectsCommand::Update { id } => projects::update(&mut client, &id),
            ProjectsCommand::Delete { id } => projects::delete(&mut client, &id),
            ProjectsCommand::Use { id } => projects::use_project(&mut client, &id),
            ProjectsCommand::Unset => projects::unset(&mut client),
        },
        Command::Environments(command) => match command {
            EnvironmentsCommand::Create { project_id } => {
                environments::create(&mut client, project_id)
            }
            EnvironmentsCommand::List { project_id } => environments::list(&mut client, project_id),
            EnvironmentsCommand::Get {
                environment_id,
                project_id,
            } => environments::get(&mut client, &environment_id, project_id),
            EnvironmentsCommand::Update {
                environment_id,
                project_id,
            } => environments::update(&mut client, &environment_id, project_id),
            EnvironmentsCommand::Delete {
                environment_id,
                project_id,
            } => environments::delete(&mut client, &environment_id, project_id),
            EnvironmentsCommand::Use { id } => environments::use_environment(&mut client, &id),
            EnvironmentsCommand::Unset => environments::unset(&mut client),
        },
        Command::Variables(command) => match command {
            VariablesCommand::Import { file } => variables::import(&mut client, &file),
            VariablesCommand::Export { file } => variables::export(&mut client, file),
            VariablesCommand::Create {
                project_id,
                environment_id,
            } => variables::create(&mut client, &project_id, &environment_id),
            VariablesCommand::List {
                project_id,
                environment_id,
            } => variables::list(&mut client, &project_id, &environment_id),
            VariablesCommand::Get {
                variable_id,
                project_id,
                environment_id,
            } => variables::get(&mut client, &variable_id, &project_id, &environment_id),
            VariablesCommand::Update {
                variable_id,
                project_id,
                environment_id,
            } => variables::update(&mut client, &variable_id, &project_id, &environment_id),
            VariablesCommand::Delete {
                variable_id,
                project_id,
                environment_id,
            } => variables::delete(&mut client, &variable_id, &project_id, &environment_id),
        },
    }
}
