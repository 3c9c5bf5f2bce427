use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output mode shared by all commands
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "estate-portal", version, about = "Real-estate portal API client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides ESTATE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse and manage property listings
    Properties {
        #[command(subcommand)]
        command: PropertyCommand,
    },
    /// Show a single apartment
    Apartment { id: String },
    /// Browse and manage developers
    Developers {
        #[command(subcommand)]
        command: DeveloperCommand,
    },
    /// Browse and manage promotions
    Promotions {
        #[command(subcommand)]
        command: PromotionCommand,
    },
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ESTATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, env = "ESTATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update the signed-in user's profile
    Profile(ProfileArgs),
    /// Change the signed-in user's password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long = "new")]
        new_password: String,
    },
    /// Password reset flow
    ResetPassword {
        #[command(subcommand)]
        command: ResetPasswordCommand,
    },
    /// Ask for a call back
    Callback(CallbackArgs),
    /// Mortgage calculator, banks and applications
    Mortgage {
        #[command(subcommand)]
        command: MortgageCommand,
    },
    /// Manage user accounts (admin)
    Users {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Delete every locally stored value
    ClearData,
}

#[derive(Debug, Subcommand)]
pub enum PropertyCommand {
    List(PropertyListArgs),
    Get {
        id: String,
    },
    /// Apartments of a property
    Apartments {
        id: String,
        #[command(flatten)]
        filters: ApartmentArgs,
    },
    /// Create from a JSON file
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Update from a JSON file
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    Delete {
        id: String,
    },
    /// Upload gallery images
    UploadImages {
        id: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct PropertyListArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    #[arg(long)]
    pub developer: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub min_price: Option<i64>,
    #[arg(long)]
    pub max_price: Option<i64>,
    #[arg(long)]
    pub min_area: Option<f64>,
    #[arg(long)]
    pub max_area: Option<f64>,
    #[arg(long)]
    pub rooms: Option<u32>,
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Args)]
pub struct ApartmentArgs {
    #[arg(long)]
    pub rooms: Option<u32>,
    #[arg(long)]
    pub floor: Option<i32>,
    #[arg(long)]
    pub min_price: Option<i64>,
    #[arg(long)]
    pub max_price: Option<i64>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum DeveloperCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PromotionCommand {
    List {
        #[arg(long)]
        developer: Option<String>,
        #[arg(long)]
        property: Option<String>,
        /// Only running offers
        #[arg(long)]
        active: bool,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub avatar: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ResetPasswordCommand {
    /// E-mail a reset link
    Request {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the token from the e-mail
    Confirm {
        #[arg(long)]
        token: String,
        #[arg(long = "new")]
        new_password: String,
    },
}

#[derive(Debug, Args)]
pub struct CallbackArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long)]
    pub property: Option<String>,
    #[arg(long)]
    pub preferred_time: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum MortgageCommand {
    /// Estimate the monthly payment
    Calculate {
        #[arg(long)]
        price: f64,
        #[arg(long, default_value_t = 0.0)]
        down_payment: f64,
        #[arg(long)]
        years: u32,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        bank: Option<String>,
    },
    /// List partner banks
    Banks,
    /// Send a mortgage application
    Apply {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        property: Option<String>,
        #[arg(long)]
        bank: Option<String>,
        #[arg(long)]
        price: f64,
        #[arg(long, default_value_t = 0.0)]
        down_payment: f64,
        #[arg(long)]
        years: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Delete {
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "estate-portal",
            "properties",
            "list",
            "--city",
            "Almaty",
            "--rooms",
            "2",
            "--format",
            "json",
            "--api-url",
            "http://127.0.0.1:3001/api",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:3001/api"));
        match cli.command {
            Commands::Properties {
                command: PropertyCommand::List(args),
            } => {
                assert_eq!(args.city.as_deref(), Some("Almaty"));
                assert_eq!(args.rooms, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn upload_requires_files() {
        assert!(Cli::try_parse_from(["estate-portal", "properties", "upload-images", "p1"]).is_err());
    }
}
