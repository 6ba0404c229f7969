#![deny(missing_docs)]
//! CodeCritic command-line interface.
//!
//! Builds repository quality reports from per-file critiques stored in a
//! directory or a JSON manifest.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use codecritic_core::store::critique_file_id;
use codecritic_core::{
    AggregateReport, FileAnalysis, RawCritique, ReportEnvelope, Section, StdCritiqueStore,
    analyze_critique, format_analysis, load_critiques, merge_file_analyses, parse_manifest,
    render_json, render_markdown,
};
use log::{error, info, warn};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "codecritic", version, about = "CodeCritic CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(&["dir", "manifest"])
))]
struct CritiqueSourceArgs {
    /// Directory of critique files (`<file>.txt` or `<file>.md`).
    #[arg(long)]
    dir: Option<PathBuf>,
    /// JSON manifest of `{ "fileId", "critique" }` entries.
    #[arg(long)]
    manifest: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct AnalysisArgs {
    /// Maximum number of critiques analyzed concurrently.
    #[arg(short = 'j', long, env = "CODECRITIC_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,
    /// Analyze at most this many critiques, in source order.
    #[arg(long, env = "CODECRITIC_MAX_FILES")]
    max_files: Option<usize>,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a repository report from a set of critiques.
    Report {
        #[command(flatten)]
        source: CritiqueSourceArgs,
        #[command(flatten)]
        analysis: AnalysisArgs,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Score a single critique file.
    Score {
        /// Critique file to analyze.
        path: PathBuf,
        #[command(flatten)]
        report: OutputArgs,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            source,
            analysis,
            report,
        } => {
            let source = resolve_source_args(&source)?;
            run_report(source, analysis, report).await?
        }
        Commands::Score { path, report } => run_score(path, report).await?,
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

enum CritiqueSource {
    Dir(PathBuf),
    Manifest(PathBuf),
}

fn resolve_source_args(source: &CritiqueSourceArgs) -> CliResult<CritiqueSource> {
    if let Some(dir) = source.dir.clone() {
        return Ok(CritiqueSource::Dir(dir));
    }
    if let Some(manifest) = source.manifest.clone() {
        return Ok(CritiqueSource::Manifest(manifest));
    }
    Err("no critique source provided".into())
}

async fn run_report(
    source: CritiqueSource,
    analysis: AnalysisArgs,
    output: OutputArgs,
) -> CliResult<()> {
    let mut critiques = match load_source(source).await {
        Ok(critiques) => critiques,
        Err(err) => {
            error!("failed to load critiques: {err}");
            emit_report(AggregateReport::failed(), &output).await?;
            return Err(err);
        }
    };

    if let Some(max_files) = analysis.max_files {
        if critiques.len() > max_files {
            info!("limiting analysis to {max_files} of {} critiques", critiques.len());
            critiques.truncate(max_files);
        }
    }

    let report = analyze_in_parallel(critiques, analysis.concurrency).await?;
    emit_report(report, &output).await
}

async fn run_score(path: PathBuf, output: OutputArgs) -> CliResult<()> {
    let critique = tokio::fs::read_to_string(&path).await?;
    let root = path.parent().unwrap_or_else(|| Path::new(""));
    let analysis = analyze_critique(&RawCritique::new(critique_file_id(root, &path), critique));

    let contents = match output.format {
        OutputFormat::Text => render_file_text(&analysis),
        OutputFormat::Markdown => render_markdown(&merge_file_analyses(vec![analysis])),
        OutputFormat::Json => render_json(&analysis)?,
    };
    emit_output(&output, contents).await
}

async fn load_source(source: CritiqueSource) -> CliResult<Vec<RawCritique>> {
    match source {
        CritiqueSource::Dir(dir) => {
            let critiques = tokio::task::spawn_blocking(move || {
                load_critiques(&StdCritiqueStore::new(), &dir)
            })
            .await??;
            Ok(critiques)
        }
        CritiqueSource::Manifest(path) => {
            let contents = tokio::fs::read_to_string(&path).await?;
            Ok(parse_manifest(&contents)?)
        }
    }
}

async fn analyze_in_parallel(
    critiques: Vec<RawCritique>,
    concurrency: usize,
) -> CliResult<AggregateReport> {
    let concurrency = if concurrency == 0 { 1 } else { concurrency };
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for (index, critique) in critiques.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        tasks.spawn(async move {
            let _permit = permit;
            (index, analyze_critique(&critique))
        });
    }

    let mut analyses = Vec::new();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(entry) => analyses.push(entry),
            Err(err) => warn!("critique analysis task failed: {err}"),
        }
    }
    analyses.sort_by_key(|(index, _)| *index);

    Ok(merge_file_analyses(
        analyses.into_iter().map(|(_, analysis)| analysis).collect(),
    ))
}

async fn emit_report(report: AggregateReport, output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => format!("{}\n", format_analysis(&report)),
        OutputFormat::Markdown => render_markdown(&report),
        OutputFormat::Json => render_json(&ReportEnvelope::new(report))?,
    };
    emit_output(output, contents).await
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_file_text(analysis: &FileAnalysis) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "File: {}", analysis.file_id);
    match &analysis.language {
        Some(language) => {
            let _ = writeln!(output, "Language: {language}");
        }
        None => {
            let _ = writeln!(output, "Language: unknown");
        }
    }
    let _ = writeln!(output, "Score: {}/100", analysis.file_score);

    for section in Section::ALL {
        let body = analysis.sections.get(section);
        if body.is_empty() {
            let _ = writeln!(output, "{}: none", section.title());
            continue;
        }
        let _ = writeln!(output, "{}:", section.title());
        for line in body.lines() {
            let _ = writeln!(output, "  {line}");
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{
        AnalysisArgs, CritiqueSource, CritiqueSourceArgs, OutputArgs, OutputFormat,
        analyze_in_parallel, emit_report, load_source, render_file_text, resolve_source_args,
        run_report, run_score,
    };
    use codecritic_core::{RawCritique, ReportStatus, analyze_critique, combine_analyses};
    use std::path::PathBuf;

    #[test]
    fn resolve_source_prefers_dir_over_manifest() {
        let args = CritiqueSourceArgs {
            dir: Some(PathBuf::from("critiques")),
            manifest: Some(PathBuf::from("critiques.json")),
        };

        match resolve_source_args(&args).expect("source") {
            CritiqueSource::Dir(path) => assert_eq!(path, PathBuf::from("critiques")),
            CritiqueSource::Manifest(_) => panic!("expected dir source"),
        }
    }

    #[test]
    fn resolve_source_errors_when_missing() {
        let args = CritiqueSourceArgs {
            dir: None,
            manifest: None,
        };
        assert!(resolve_source_args(&args).is_err());
    }

    #[tokio::test]
    async fn load_source_reads_manifest_and_dir() {
        let root = std::env::temp_dir().join(unique_dir_name());
        let critiques_dir = root.join("critiques");
        std::fs::create_dir_all(critiques_dir.join("src")).expect("critiques dir");
        std::fs::write(critiques_dir.join("src").join("app.ts.txt"), "Score: 82").expect("critique");
        let manifest = root.join("critiques.json");
        std::fs::write(
            &manifest,
            r#"[{"fileId": "main.go", "critique": "Score: 64"}]"#,
        )
        .expect("manifest");

        let from_dir = load_source(CritiqueSource::Dir(critiques_dir))
            .await
            .expect("dir");
        assert_eq!(from_dir, vec![RawCritique::new("src/app.ts", "Score: 82")]);

        let from_manifest = load_source(CritiqueSource::Manifest(manifest))
            .await
            .expect("manifest");
        assert_eq!(from_manifest, vec![RawCritique::new("main.go", "Score: 64")]);

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn parallel_analysis_matches_sequential_aggregation() {
        let critiques: Vec<RawCritique> = (0..12)
            .map(|index| {
                RawCritique::new(
                    format!("src/file_{index:02}.rs"),
                    format!(
                        "QUALIDADE E ARQUITETURA\nScore: {}\n\nRISCOS E OPORTUNIDADES\n- risco {}",
                        50 + index,
                        index % 3
                    ),
                )
            })
            .collect();

        let parallel = analyze_in_parallel(critiques.clone(), 3)
            .await
            .expect("parallel");

        assert_eq!(parallel, combine_analyses(&critiques));
        assert_eq!(parallel.risks.len(), 3);
    }

    #[tokio::test]
    async fn parallel_analysis_handles_zero_concurrency_and_empty_input() {
        let report = analyze_in_parallel(Vec::new(), 0).await.expect("empty");
        assert_eq!(report.status, ReportStatus::Empty);

        let report = analyze_in_parallel(vec![RawCritique::new("a.rs", "Score: 40")], 0)
            .await
            .expect("single");
        assert_eq!(report.average_score, 40);
    }

    #[tokio::test]
    async fn emit_report_supports_formats() {
        let root = std::env::temp_dir().join(unique_dir_name());
        let report = combine_analyses(&[RawCritique::new("a.rs", "Score: 88")]);

        for (format, file_name, expected) in [
            (OutputFormat::Text, "report.txt", "Score Médio: 88/100"),
            (OutputFormat::Markdown, "report.md", "# Code Quality Report"),
            (OutputFormat::Json, "report.json", "\"averageScore\": 88"),
        ] {
            let path = root.join(file_name);
            let output = OutputArgs {
                format,
                report_output: Some(path.clone()),
            };
            emit_report(report.clone(), &output).await.expect("emit");
            let contents = std::fs::read_to_string(&path).expect("read report");
            assert!(contents.contains(expected), "{file_name} missing {expected}");
        }

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn run_report_limits_files_and_writes_json() {
        let root = std::env::temp_dir().join(unique_dir_name());
        let critiques_dir = root.join("critiques");
        std::fs::create_dir_all(&critiques_dir).expect("critiques dir");
        std::fs::write(critiques_dir.join("a.rs.txt"), "Score: 90").expect("a");
        std::fs::write(critiques_dir.join("b.rs.txt"), "Score: 30").expect("b");
        let report_path = root.join("out").join("report.json");

        run_report(
            CritiqueSource::Dir(critiques_dir),
            AnalysisArgs {
                concurrency: 2,
                max_files: Some(1),
            },
            OutputArgs {
                format: OutputFormat::Json,
                report_output: Some(report_path.clone()),
            },
        )
        .await
        .expect("run report");

        let json = std::fs::read_to_string(&report_path).expect("report");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["report"]["totalFiles"], 1);
        assert_eq!(parsed["report"]["averageScore"], 90);
        assert!(
            parsed["narrative"]
                .as_str()
                .expect("narrative")
                .starts_with("VISÃO GERAL")
        );

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn run_report_emits_failure_sentinel_when_source_missing() {
        let root = std::env::temp_dir().join(unique_dir_name());
        let report_path = root.join("report.txt");

        let result = run_report(
            CritiqueSource::Manifest(root.join("missing.json")),
            AnalysisArgs {
                concurrency: 1,
                max_files: None,
            },
            OutputArgs {
                format: OutputFormat::Text,
                report_output: Some(report_path.clone()),
            },
        )
        .await;

        assert!(result.is_err());
        let contents = std::fs::read_to_string(&report_path).expect("report");
        assert_eq!(contents, "Erro ao analisar o código do repositório.\n");

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn run_score_writes_single_file_analysis() {
        let root = std::env::temp_dir().join(unique_dir_name());
        std::fs::create_dir_all(&root).expect("root");
        let critique_path = root.join("service.py.txt");
        std::fs::write(
            &critique_path,
            "QUALIDADE E ARQUITETURA\nCódigo robusto e bem documentado.",
        )
        .expect("critique");
        let output_path = root.join("score.txt");

        run_score(
            critique_path,
            OutputArgs {
                format: OutputFormat::Text,
                report_output: Some(output_path.clone()),
            },
        )
        .await
        .expect("score");

        let contents = std::fs::read_to_string(&output_path).expect("output");
        assert!(contents.contains("File: service.py"));
        assert!(contents.contains("Language: Python"));
        assert!(contents.contains("Score: 74/100"));

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[test]
    fn render_file_text_lists_every_section() {
        let analysis = analyze_critique(&RawCritique::new(
            "notes",
            "DÍVIDA TÉCNICA\n- migração pendente",
        ));
        let output = render_file_text(&analysis);

        assert!(output.contains("Language: unknown"));
        assert!(output.contains("Score: 70/100"));
        assert!(output.contains("QUALIDADE E ARQUITETURA: none"));
        assert!(output.contains("DÍVIDA TÉCNICA:\n  - migração pendente"));
    }

    static UNIQUE_COUNTER: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

    fn unique_dir_name() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        let counter = UNIQUE_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        PathBuf::from(format!("codecritic_cli_test_{nanos}_{counter}"))
    }
}
