// src/main.rs

// Modules defined in the crate
mod api;
mod assembler;
mod catalog;
mod config;
mod constants;
mod error;
mod error_recovery;
mod output;
mod paths;
mod pipeline;
mod resolver;

// Specific imports
use crate::assembler::{ContentAssembler, RouteOutcome, ViewModel};
use crate::catalog::Catalog;
use crate::config::{CommandLineInput, PipelineConfig};
use crate::error::AppError;
use crate::pipeline::{ViewDelivery, ViewSource};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use output::{deliver, DeliveryTarget, OutputPlan, OutputReport};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("wp2reader.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Reads the already-validated catalog JSON from disk.
fn load_catalog(path: &Path) -> Result<Catalog, AppError> {
    let raw = fs::read_to_string(path)?;
    let catalog = serde_json::from_str(&raw).map_err(|source| AppError::JsonParseError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(catalog)
}

/// Executes the generation pipeline: resolve + fetch every route, then
/// deliver the assembled view-models.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let catalog = load_catalog(&config.catalog_path)?;
    catalog.assert_row_invariant()?;
    log::info!(
        "Catalog loaded: {} rows against {}",
        catalog.posts().len(),
        config.api_base
    );

    let client = api::WpHttpClient::new(
        config.api_base.clone(),
        config.timeout_ms,
        config.retries,
    )?;
    let build = ReaderBuild::new(config, &catalog, Arc::new(client));

    let outcomes = build.assemble_site().await?;
    let plan = build.plan_outputs(&outcomes)?;
    let report = build.deliver(plan)?;
    build.report_completion(&outcomes, &report);

    if !report.is_success() {
        return Err(AppError::DeliveryFailed {
            failures: report.failed.iter().map(|f| f.error.clone()).collect(),
        });
    }

    Ok(())
}

/// Orchestrates the resolution, assembly, and delivery of reader routes.
struct ReaderBuild<'a> {
    config: &'a PipelineConfig,
    catalog: &'a Catalog,
    assembler: ContentAssembler<'a>,
}

impl<'a> ReaderBuild<'a> {
    fn new(
        config: &'a PipelineConfig,
        catalog: &'a Catalog,
        api: Arc<dyn api::ContentApi>,
    ) -> Self {
        let assembler = ContentAssembler::new(catalog, &config.base_path, api);
        Self {
            config,
            catalog,
            assembler,
        }
    }

    /// Assembles the requested routes: one (language, id) pair when the CLI
    /// names a single route, otherwise every route the catalog produces.
    async fn assemble_site(&self) -> Result<Vec<RouteOutcome>, AppError> {
        if let Some(id) = &self.config.single_id {
            let lang = self.config.requested_lang.as_deref().unwrap_or_default();
            log::info!("Assembling single route ({}, {})", lang, id);

            let result = self.assemble_route(lang, id).await;
            // Route-level NotFound is a real outcome for an explicit request.
            let view = result?;
            let route = resolver::RouteParams {
                language: view.language,
                content_id: view.content_id.clone(),
            };
            return Ok(vec![RouteOutcome {
                route,
                result: Ok(view),
            }]);
        }

        Ok(self.assembler.assemble_all().await)
    }

    /// Plans the delivery of assembled view-models: stdout in pipe mode,
    /// otherwise one JSON artifact per route plus the landing target.
    fn plan_outputs(&self, outcomes: &[RouteOutcome]) -> Result<OutputPlan, AppError> {
        let mut plan = OutputPlan::new();

        for outcome in outcomes {
            let view = match &outcome.result {
                Ok(view) => view,
                Err(e) => {
                    log::error!(
                        "Route ({}, {}) failed: {}",
                        outcome.route.language,
                        outcome.route.content_id,
                        e
                    );
                    continue;
                }
            };

            let content = serde_json::to_string_pretty(view)?;
            if self.config.pipe {
                plan = plan.with_operation(DeliveryTarget::PrintToStdout { content });
            } else {
                // The artifact lands at the *requested* route; the view
                // names the resolved pair inside.
                plan = plan.with_operation(DeliveryTarget::WriteFile {
                    path: output::route_output_path(
                        &self.config.out_dir,
                        outcome.route.language,
                        &outcome.route.content_id,
                    ),
                    content,
                });
            }
        }

        if !self.config.pipe && self.config.single_id.is_none() {
            let target =
                resolver::landing_target(self.catalog.posts(), &self.config.base_path);
            let content = serde_json::to_string_pretty(&serde_json::json!({ "target": target }))?;
            plan = plan.with_operation(DeliveryTarget::WriteFile {
                path: output::landing_output_path(&self.config.out_dir),
                content,
            });
        }

        Ok(plan)
    }

    /// Reports completion to the user with per-route stats.
    fn report_completion(&self, outcomes: &[RouteOutcome], report: &OutputReport) {
        if self.config.pipe {
            return;
        }

        let degraded = outcomes
            .iter()
            .filter(|o| matches!(&o.result, Ok(view) if view.record.is_degraded()))
            .count();
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();

        println!(
            "📄 Assembled {} route(s); wrote {} artifact(s), {} bytes.",
            outcomes.len(),
            report.stats.operations_completed,
            report.stats.bytes_written
        );

        if degraded > 0 {
            eprintln!(
                "⚠️  {} route(s) degraded to placeholder content. The content API was unreachable or returned errors.",
                degraded
            );
        }
        if failed > 0 {
            eprintln!("⚠️  {} route(s) failed to assemble.", failed);
        }

        if failed == 0 && degraded == 0 {
            println!("✓ All routes assembled from live content.");
        }
    }
}

#[async_trait::async_trait]
impl ViewSource for ReaderBuild<'_> {
    async fn assemble_route(&self, lang: &str, id: &str) -> Result<ViewModel, AppError> {
        self.assembler.assemble(lang, id).await
    }
}

impl ViewDelivery for ReaderBuild<'_> {
    fn deliver(&self, plan: OutputPlan) -> Result<OutputReport, AppError> {
        deliver(plan)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
