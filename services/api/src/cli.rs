use crate::commands::{run_diagnose, run_questions, DiagnoseArgs, QuestionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use persona_diagnosis::config::AppConfig;
use persona_diagnosis::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Persona Diagnosis",
    about = "Serve or run the persona diagnosis engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Diagnose a saved answer set and print the result as JSON
    Diagnose(DiagnoseArgs),
    /// List the questionnaire
    Questions(QuestionsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

/// Data file overrides shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CatalogArgs {
    /// Question catalog JSON replacing the built-in questionnaire
    #[arg(long)]
    pub(crate) questions: Option<PathBuf>,
    /// Scoring configuration JSON replacing the built-in profiles
    #[arg(long)]
    pub(crate) scoring: Option<PathBuf>,
}

impl CatalogArgs {
    pub(crate) fn apply(self, config: &mut AppConfig) {
        if let Some(path) = self.questions {
            config.catalog.questions_path = Some(path);
        }
        if let Some(path) = self.scoring {
            config.catalog.scoring_path = Some(path);
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Diagnose(args) => run_diagnose(args),
        Command::Questions(args) => run_questions(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_diagnosis::config::{
        AppEnvironment, CatalogConfig, ServerConfig, TelemetryConfig,
    };

    fn config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            catalog: CatalogConfig {
                questions_path: Some(PathBuf::from("/etc/persona/questions.json")),
                scoring_path: None,
            },
        }
    }

    #[test]
    fn catalog_flags_override_only_what_they_name() {
        let mut config = config();
        CatalogArgs {
            questions: None,
            scoring: Some(PathBuf::from("scoring.json")),
        }
        .apply(&mut config);

        assert_eq!(
            config.catalog.questions_path,
            Some(PathBuf::from("/etc/persona/questions.json"))
        );
        assert_eq!(
            config.catalog.scoring_path,
            Some(PathBuf::from("scoring.json"))
        );
    }

    #[test]
    fn parses_diagnose_subcommand() {
        let cli = Cli::try_parse_from([
            "persona-diagnosis",
            "diagnose",
            "--answers",
            "answers.json",
            "--questions",
            "questions.json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Diagnose(args)) => {
                assert_eq!(args.answers, PathBuf::from("answers.json"));
                assert_eq!(
                    args.catalog.questions,
                    Some(PathBuf::from("questions.json"))
                );
            }
            other => panic!("expected diagnose command, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["persona-diagnosis"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
