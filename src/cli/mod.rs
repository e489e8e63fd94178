//! Command line interface
//!
//! - `serve`: run the landing page and API
//! - `join`: sign up from the terminal

pub mod join;
pub mod serve;

use clap::{Parser, Subcommand};

/// Lody landing page and waitlist service
#[derive(Parser)]
#[command(name = "lody-waitlist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Join the waitlist from the terminal
    Join(join::JoinArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["lody-waitlist", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_join() {
        let cli = Cli::try_parse_from([
            "lody-waitlist",
            "join",
            "--email",
            "fan@lody.app",
            "--language",
            "korean",
            "--api-url",
            "http://localhost:8080",
        ])
        .unwrap();

        match cli.command {
            Command::Join(args) => {
                assert_eq!(args.email, "fan@lody.app");
                assert_eq!(args.language.as_deref(), Some("korean"));
                assert_eq!(args.api_url.as_deref(), Some("http://localhost:8080"));
            }
            Command::Serve => panic!("expected join"),
        }
    }

    #[test]
    fn test_join_requires_email() {
        assert!(Cli::try_parse_from(["lody-waitlist", "join"]).is_err());
    }
}
