use anyhow::{Context, Result, bail};
use clap::Parser;
use console::Style;
use tracing_subscriber::EnvFilter;

use cvlab::cli::{Cli, Command};
use cvlab::config::CvlabConfig;
use cvlab::gemini::types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part,
};
use cvlab::gemini::{GeminiClient, GeminiError, GenerateContent};
use cvlab::job::record::{Attachment, ResumeJob, WriteEvent};
use cvlab::job::store::DocumentStore;
use cvlab::ledger::CreditLedger;
use cvlab::processors::ResumeProcessor;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Command::Run { file, credits } => run_job(&file, credits).await,
        Command::Demo => demo().await,
    }
}

/// Process a resume job read from a JSON file against the real API.
async fn run_job(file: &str, credits: i64) -> Result<()> {
    let config = CvlabConfig::load()?;
    if config.api_key.is_empty() {
        bail!("GEMINI_API_KEY não definida (variável de ambiente ou cvlab.toml)");
    }

    let contents = std::fs::read_to_string(file).with_context(|| format!("lendo {file}"))?;
    let job: ResumeJob = serde_json::from_str(&contents).with_context(|| format!("parse {file}"))?;

    let ledger = CreditLedger::new();
    ledger.open_account(&job.user_id, credits);
    let store = DocumentStore::new();
    let job_id = uuid::Uuid::new_v4().to_string();
    store.insert(&job_id, job.clone());

    let client = GeminiClient::new(config.api_key).with_model(&config.model);
    let processor = ResumeProcessor::new(&ledger, &client, &store);
    processor
        .handle(&WriteEvent {
            id: job_id.clone(),
            before: None,
            after: Some(job),
        })
        .await;

    print_outcome(&store, &ledger, &job_id)
}

/// Run the full pipeline against a canned model: no API key needed.
async fn demo() -> Result<()> {
    let ledger = CreditLedger::new();
    ledger.open_account("demo-user", 10);
    let store = DocumentStore::new();

    let mut job = ResumeJob::new(
        "demo-user",
        Attachment {
            // "%PDF-1.4" — enough for a demonstration attachment.
            base64: "JVBERi0xLjQ=".to_string(),
            mime_type: "application/pdf".to_string(),
        },
    );
    job.generate_new_cv = true;
    store.insert("demo-job", job.clone());

    let model = CannedModel::default();
    let processor = ResumeProcessor::new(&ledger, &model, &store);
    processor
        .handle(&WriteEvent {
            id: "demo-job".to_string(),
            before: None,
            after: Some(job),
        })
        .await;

    print_outcome(&store, &ledger, "demo-job")
}

fn print_outcome(store: &DocumentStore<ResumeJob>, ledger: &CreditLedger, job_id: &str) -> Result<()> {
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();

    let job = store
        .get(job_id)
        .ok_or_else(|| anyhow::anyhow!("job desapareceu do store"))?;
    match job.error {
        None => println!("  {} Job {job_id}: {:?}", green.apply_to("✓"), job.status),
        Some(ref err) => println!("  {} Job {job_id}: {err}", red.apply_to("✗")),
    }

    println!();
    println!("─── Documento final ───");
    println!("{}", serde_json::to_string_pretty(&job)?);
    println!();
    println!("─── Extrato de créditos ───");
    let balance = ledger.balance(&job.user_id)?;
    for entry in ledger.history(&job.user_id)? {
        println!("  {:>4}  {}", entry.amount, entry.description);
    }
    println!("  saldo final: {balance}");
    Ok(())
}

/// Demo stand-in for the generation collaborator: first call answers the
/// analysis, second call the generated CV.
#[derive(Default)]
struct CannedModel {
    calls: std::sync::atomic::AtomicUsize,
}

impl GenerateContent for CannedModel {
    async fn generate_content(
        &self,
        _req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let call = self
            .calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let text = if call == 0 {
            r#"{"summary":"Currículo sólido, com espaço para quantificar resultados.",
                "totalScore":78,
                "scores":{"structure":82,"experience":75,"skills":80,"format":74,"impact":68},
                "strengths":["Progressão de carreira clara"],
                "improvements":["Adicionar métricas de impacto"],
                "resources":[{"title":"Guia de currículos","url":"https://example.com/guia"}]}"#
        } else {
            r#"{"personalInfo":{"name":"Pessoa Demo","email":"demo@example.com"},
                "professionalSummary":"Engenharia de software com foco em backend.",
                "skills":{"technical":["Rust","SQL"],"soft":["Comunicação"]}}"#
        };
        Ok(GenerateContentResponse {
            candidates: vec![Candidate {
                content: Content {
                    role: "model".to_string(),
                    parts: vec![Part::Text(text.to_string())],
                },
                finish_reason: Some("STOP".to_string()),
            }],
            usage_metadata: None,
        })
    }
}
