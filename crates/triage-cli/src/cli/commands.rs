use super::args::*;
use std::sync::Arc;
use triage_core::engine::recorder::{Recorder, RequestPolicy};
use triage_core::providers::http::HttpCheckClient;
use triage_core::report::{charts, console, csv};
use triage_core::storage::Store;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const CONFIG_ERROR: i32 = 2;
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => cmd_run(args).await,
        Command::Score(args) => cmd_score(args).await,
        Command::Visualize(args) => cmd_visualize(args).await,
        Command::Init(args) => cmd_init(args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

async fn cmd_run(args: RunArgs) -> anyhow::Result<i32> {
    let mut cfg =
        triage_core::config::load_config(&args.config).map_err(|e| anyhow::anyhow!(e))?;
    if let Some(endpoint) = &args.endpoint {
        cfg.endpoint = endpoint.clone();
    }

    let mut cases = triage_core::cases::load_cases(&args.cases, &args.meta)
        .map_err(|e| anyhow::anyhow!(e))?;
    cases.retain_only(&args.only).map_err(|e| anyhow::anyhow!(e))?;

    let run_ts = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.results_dir.join(format!("raw_results_{}.csv", run_ts)));
    ensure_parent_dir(&output)?;
    ensure_parent_dir(&args.db)?;

    let store = Store::open(&args.db)?;
    store.init_schema()?;
    let run_id = store.create_run(&cfg, &run_ts)?;

    let client = Arc::new(HttpCheckClient::new(&cfg.endpoint));
    if !client.health().await {
        eprintln!(
            "warn: endpoint {} failed health check; subsequent calls likely to error",
            cfg.endpoint
        );
    }

    let recorder = Recorder {
        client,
        policy: RequestPolicy {
            timeout: cfg.settings.timeout(),
            retries: cfg.settings.retries(),
            backoff: cfg.settings.backoff(),
        },
        parallel: cfg.settings.parallel(),
        default_language: cfg.settings.default_language().to_string(),
    };

    let rows = recorder.record_run(&cases, &run_ts).await?;
    for row in &rows {
        eprintln!("[{}] {}", row.status.as_str(), row.case_id);
        store.insert_raw_result(run_id, row)?;
    }
    store.finalize_run(run_id, "completed")?;

    csv::write_raw_results(&output, &rows)?;
    console::print_run_summary(&rows);
    eprintln!("raw results -> {}", output.display());

    Ok(exit_codes::OK)
}

async fn cmd_score(args: ScoreArgs) -> anyhow::Result<i32> {
    let cfg = triage_core::config::load_config(&args.config).map_err(|e| anyhow::anyhow!(e))?;
    let cases = triage_core::cases::load_cases(&args.cases, &args.meta)
        .map_err(|e| anyhow::anyhow!(e))?;

    let rows = csv::read_raw_results(&args.input)?;
    let run_label = rows
        .first()
        .map(|r| r.run_timestamp.clone())
        .unwrap_or_else(|| chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string());

    let scorer =
        triage_rubric::Scorer::new(cfg.weights.clone(), cfg.settings.default_language());
    let mut scored = scorer.score_run(&cases, &rows)?;
    scored.sort_by(|a, b| {
        b.overall_score
            .partial_cmp(&a.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.case_id.cmp(&b.case_id))
    });
    let summary = triage_rubric::aggregate(&run_label, &scored);

    std::fs::create_dir_all(&args.out_dir)?;
    let ts = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let scored_out = args.out_dir.join(format!("scored_cases_{}.csv", ts));
    let summary_out = args.out_dir.join(format!("summary_scores_{}.csv", ts));
    csv::write_scored_cases(&scored_out, &scored)?;
    csv::write_summary(&summary_out, std::slice::from_ref(&summary))?;

    console::print_score_summary(&summary);
    eprintln!("scored cases -> {}", scored_out.display());
    eprintln!("summary scores -> {}", summary_out.display());

    Ok(exit_codes::OK)
}

async fn cmd_visualize(args: VisualizeArgs) -> anyhow::Result<i32> {
    let table = csv::read_summary(&args.summary)?;
    let written = charts::render_charts(&table, &args.out_dir)?;
    if written.is_empty() {
        eprintln!("note: no score columns found; nothing to chart");
    }
    for path in &written {
        eprintln!("chart -> {}", path.display());
    }
    Ok(exit_codes::OK)
}

async fn cmd_init(args: InitArgs) -> anyhow::Result<i32> {
    write_file_if_missing(&args.config, crate::templates::EVAL_YAML)?;
    write_file_if_missing(&args.cases, crate::templates::TEST_CASES_JSON)?;
    write_file_if_missing(&args.meta, crate::templates::CASE_META_JSON)?;

    if args.gitignore {
        write_file_if_missing(std::path::Path::new(".gitignore"), crate::templates::GITIGNORE)?;
    }

    Ok(exit_codes::OK)
}

fn write_file_if_missing(path: &std::path::Path, content: &str) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    if !path.exists() {
        std::fs::write(path, content)?;
        eprintln!("created {}", path.display());
    } else {
        eprintln!("note: {} already exists (skipped)", path.display());
    }
    Ok(())
}

fn ensure_parent_dir(path: &std::path::Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
