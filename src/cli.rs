// Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "envoy")]
#[command(about = "Envoy CLI client")]
#[command(long_about = "Envoy CLI client for managing projects and environments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a new account
    Register,

    /// Login to your account
    Login,

    /// Logout from your account (clears stored token)
    Logout,

    /// Show your profile information
    Profile,

    /// Print the version number
    Version,

    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Manage environments
    #[command(subcommand)]
    Environments(EnvironmentsCommand),

    /// Manage environment variables
    #[command(subcommand)]
    Variables(VariablesCommand),
}

#[derive(Subcommand)]
pub enum ProjectsCommand {
    /// Create a new project
    Create,

    /// List all projects
    List,

    /// Get project details
    Get {
        /// Project ID
        id: String,
    },

    /// Update a project
    Update {
        /// Project ID
        id: String,
    },

    /// Delete a project
    Delete {
        /// Project ID
        id: String,
    },

    /// Set as current project
    Use {
        /// Project ID
        id: String,
    },

    /// Unset current project
    Unset,
}

#[derive(Subcommand)]
pub enum EnvironmentsCommand {
    /// Create a new environment in a project
    Create {
        /// Project ID (defaults to the current project)
        project_id: Option<String>,
    },

    /// List environments of a project
    List {
        /// Project ID (defaults to the current project)
        project_id: Option<String>,
    },

    /// Get environment details
    Get {
        /// Environment ID
        environment_id: String,
        /// Project ID (defaults to the current project)
        project_id: Option<String>,
    },

    /// Update an environment
    Update {
        /// Environment ID
        environment_id: String,
        /// Project ID (defaults to the current project)
        project_id: Option<String>,
    },

    /// Delete an environment
    Delete {
        /// Environment ID
        environment_id: String,
        /// Project ID (defaults to the current project)
        project_id: Option<String>,
    },

    /// Set current environment
    Use {
        /// Environment ID
        id: String,
    },

    /// Unset current environment
    Unset,
}

#[derive(Subcommand)]
pub enum VariablesCommand {
    /// Import variables from a .env file
    Import {
        /// Path to the .env file to import
        #[arg(short, long, default_value = ".env")]
        file: PathBuf,
    },

    /// Export variables to a .env file
    Export {
        /// Path to the export file (default: .env.<environment name>)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Create a new variable
    Create {
        /// Project ID
        project_id: String,
        /// Environment ID
        environment_id: String,
    },

    /// List variables of an environment
    List {
        /// Project ID
        project_id: String,
        /// Environment ID
        environment_id: String,
    },

    /// Get variable details
    Get {
        /// Variable ID
        variable_id: String,
        /// Project ID
        project_id: String,
        /// Environment ID
        environment_id: String,
    },

    /// Update a variable
    Update {
        /// Variable ID
        variable_id: String,
        /// Project ID
        project_id: String,
        /// Environment ID
        environment_id: String,
    },

    /// Delete a variable
    Delete {
        /// Variable ID
        variable_id: String,
        /// Project ID
        project_id: String,
        /// Environment ID
        environment_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_nested_subcommands() {
        let cli = Cli::try_parse_from(["envoy", "projects", "get", "p-1"]).unwrap();
        match cli.command {
            Command::Projects(ProjectsCommand::Get { id }) => assert_eq!(id, "p-1"),
            _ => panic!("parsed into the wrong command"),
        }

        let cli = Cli::try_parse_from(["envoy", "variables", "import", "-f", "dev.env"]).unwrap();
        match cli.command {
            Command::Variables(VariablesCommand::Import { file }) => {
                assert_eq!(file, PathBuf::from("dev.env"));
            }
            _ => panic!("parsed into the wrong command"),
        }
    }

    #[test]
    fn import_file_defaults_to_dot_env() {
        let cli = Cli::try_parse_from(["envoy", "variables", "import"]).unwrap();
        match cli.command {
            Command::Variables(VariablesCommand::Import { file }) => {
                assert_eq!(file, PathBuf::from(".env"));
            }
            _ => panic!("parsed into the wrong command"),
        }
    }
}
