use crate::cli::CatalogArgs;
use crate::infra::{load_service, parse_answers};
use clap::Args;
use persona_diagnosis::config::AppConfig;
use persona_diagnosis::diagnosis::{QuestionKind, QuestionView};
use persona_diagnosis::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// JSON file holding `{"answers": [...]}` or a bare answer array
    #[arg(long)]
    pub(crate) answers: PathBuf,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Print the questionnaire as JSON instead of a readable listing
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let DiagnoseArgs { answers, catalog } = args;

    let mut config = AppConfig::load()?;
    catalog.apply(&mut config);
    let service = load_service(&config.catalog)?;

    let raw = std::fs::read_to_string(&answers)?;
    let answers = parse_answers(&raw)?;
    let result = service.diagnose(&answers)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let QuestionsArgs { json, catalog } = args;

    let mut config = AppConfig::load()?;
    catalog.apply(&mut config);
    let service = load_service(&config.catalog)?;
    let questionnaire = service.questionnaire();

    if json {
        println!("{}", serde_json::to_string_pretty(&questionnaire)?);
    } else {
        print!("{}", render_questionnaire(&questionnaire));
    }
    Ok(())
}

fn render_questionnaire(questions: &[QuestionView]) -> String {
    let mut out = String::new();
    for question in questions {
        let hint = match question.kind {
            QuestionKind::Single => "choose one".to_string(),
            QuestionKind::Multi => format!("choose up to {}", question.max_select),
        };
        out.push_str(&format!("{} {} ({hint})\n", question.id, question.prompt));
        for option in &question.options {
            out.push_str(&format!("  [{}] {}\n", option.key, option.label));
        }
    }
    out
}
