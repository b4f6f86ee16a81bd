//! CLI definition and pipeline orchestration.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_export_adapter::CsvExportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::rng_adapter::RngSource;
use crate::adapters::svg_chart::SvgChartAdapter;
use crate::domain::commodity::{CommodityDefinition, default_catalogue};
use crate::domain::config_validation::{
    PipelineConfig, build_pipeline_config, validate_pipeline_config,
};
use crate::domain::correlation::CorrelationMatrix;
use crate::domain::distribution::monthly_distribution;
use crate::domain::error::PanganError;
use crate::domain::generator::{PriceModel, generate_series};
use crate::domain::insights::{InsightInputs, InsightSection, compose, fmt_rupiah};
use crate::domain::statistics::StatisticsTable;
use crate::domain::table::{DailyTable, assemble};
use crate::domain::trend::{GrowthMap, MonthlyAggregate};
use crate::ports::chart_port::{ChartPort, DistributionSpec};
use crate::ports::export_port::ExportPort;
use crate::ports::random_port::RandomSource;

const RULE_WIDTH: usize = 60;

#[derive(Parser, Debug, Default)]
#[command(
    name = "pangan",
    about = "Synthetic Indonesian food-price generator and analysis report"
)]
pub struct Cli {
    /// INI file with [dataset], [analysis], [charts] and [output] sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory for charts and CSV files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Seed the random source for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of commodities in each ranking
    #[arg(long)]
    pub top: Option<usize>,
    #[arg(long)]
    pub no_charts: bool,
    #[arg(long)]
    pub no_export: bool,
}

/// Files produced by one pipeline run.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub days: usize,
    pub charts: Vec<PathBuf>,
    pub exports: Vec<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    let catalogue = default_catalogue();

    let cfg = match resolve_config(&cli, &catalogue) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match cfg.seed {
        Some(seed) => run_pipeline(
            &cfg,
            &catalogue,
            &PriceModel::default(),
            RngSource::seeded(seed),
            &mut out,
        ),
        None => run_pipeline(
            &cfg,
            &catalogue,
            &PriceModel::default(),
            RngSource::from_entropy(),
            &mut out,
        ),
    };

    match result {
        Ok(output) => {
            tracing::info!(
                days = output.days,
                charts = output.charts.len(),
                exports = output.exports.len(),
                "pipeline finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Config file (if any), then CLI overrides, then validation.
pub fn resolve_config(
    cli: &Cli,
    catalogue: &[CommodityDefinition],
) -> Result<PipelineConfig, PanganError> {
    let mut cfg = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            build_pipeline_config(&FileConfigAdapter::from_file(path)?)?
        }
        None => PipelineConfig::default(),
    };

    if let Some(dir) = &cli.output_dir {
        cfg.output_dir = dir.clone();
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    if let Some(k) = cli.top {
        cfg.top_k = k;
    }
    if cli.no_charts {
        cfg.charts = false;
    }
    if cli.no_export {
        cfg.export = false;
    }

    validate_pipeline_config(&cfg, catalogue)?;
    Ok(cfg)
}

/// Generate, analyse, render and export. The narrative report goes to `out`.
pub fn run_pipeline<R: RandomSource>(
    cfg: &PipelineConfig,
    catalogue: &[CommodityDefinition],
    model: &PriceModel,
    mut rng: R,
    out: &mut dyn Write,
) -> Result<PipelineOutput, PanganError> {
    let mut output = PipelineOutput::default();

    // Stage 1: Generate and assemble
    tracing::info!(
        start = %cfg.start_date,
        end = %cfg.end_date,
        commodities = catalogue.len(),
        "generating daily prices"
    );
    let observations = generate_series(cfg.start_date, cfg.end_date, catalogue, model, &mut rng)?;
    let table = assemble(&observations, catalogue)?;
    output.days = table.len();
    tracing::info!(rows = table.len(), "daily table assembled");

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "Indonesian food price analysis {} to {}",
        table.start_date(),
        table.end_date()
    )?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "Data generated: {} rows, {} commodities",
        table.len(),
        table.commodities().len()
    )?;

    // Stage 2: Descriptive statistics
    let stats = StatisticsTable::compute(&table);
    for name in stats.undefined_cv() {
        tracing::warn!(commodity = name, "coefficient of variation undefined");
    }
    print_statistics(out, &stats, cfg.top_k)?;

    // Stage 3: Monthly trend and growth
    let monthly = MonthlyAggregate::compute(&table);
    let growth = monthly.growth()?;
    tracing::info!(months = monthly.len(), "monthly aggregate computed");
    print_growth(out, &growth)?;

    // Stage 4: Charts
    if cfg.charts {
        let charts = SvgChartAdapter::new(&cfg.output_dir);
        output.charts = render_charts(&charts, cfg, &table, &stats)?;
    } else {
        tracing::info!("chart rendering disabled");
    }

    // Stage 5: Insights
    let sections = compose(&InsightInputs {
        stats: &stats,
        growth: &growth,
        commodities: catalogue,
        model,
        top_k: cfg.top_k,
    });
    print_insights(out, &sections)?;

    // Stage 6: Export
    if cfg.export {
        let exporter = CsvExportAdapter::new(&cfg.output_dir);
        output.exports = exporter.write_all(&table, &monthly, &stats)?;
        for path in &output.exports {
            tracing::info!(path = %path.display(), "exported");
        }
    } else {
        tracing::info!("csv export disabled");
    }

    Ok(output)
}

pub fn render_charts(
    charts: &dyn ChartPort,
    cfg: &PipelineConfig,
    table: &DailyTable,
    stats: &StatisticsTable,
) -> Result<Vec<PathBuf>, PanganError> {
    let matrix = CorrelationMatrix::compute(table);
    let summaries = monthly_distribution(table, &cfg.distribution_commodity, cfg.distribution_year)?;
    if summaries.is_empty() {
        tracing::warn!(
            commodity = %cfg.distribution_commodity,
            year = cfg.distribution_year,
            "no observations in distribution year"
        );
    }

    let paths = vec![
        charts.price_trend(table, &cfg.trend_commodities)?,
        charts.volatility(stats)?,
        charts.correlation(&matrix)?,
        charts.monthly_distribution(&DistributionSpec {
            commodity: &cfg.distribution_commodity,
            year: cfg.distribution_year,
            summaries: &summaries,
        })?,
    ];
    for path in &paths {
        tracing::info!(path = %path.display(), "chart written");
    }
    Ok(paths)
}

pub fn print_statistics(
    out: &mut dyn Write,
    stats: &StatisticsTable,
    top_k: usize,
) -> io::Result<()> {
    writeln!(out, "\n=== Descriptive Statistics ===")?;
    writeln!(
        out,
        "{:<24} {:>14} {:>12} {:>14} {:>14} {:>8}",
        "Commodity", "Mean", "Std Dev", "Min", "Max", "CV (%)"
    )?;
    for (name, s) in stats.entries() {
        let cv = s.cv.map_or_else(|| "n/a".to_string(), |cv| format!("{cv:.2}"));
        writeln!(
            out,
            "{:<24} {:>14} {:>12} {:>14} {:>14} {:>8}",
            name,
            fmt_rupiah(s.mean),
            fmt_rupiah(s.std_dev),
            fmt_rupiah(s.min),
            fmt_rupiah(s.max),
            cv
        )?;
    }

    writeln!(out, "\nMost volatile:")?;
    for (i, (name, cv)) in stats.most_volatile(top_k).iter().enumerate() {
        writeln!(out, "  {}. {}: {:.2}%", i + 1, name, cv)?;
    }
    writeln!(out, "\nMost stable:")?;
    for (i, (name, cv)) in stats.most_stable(top_k).iter().enumerate() {
        writeln!(out, "  {}. {}: {:.2}%", i + 1, name, cv)?;
    }
    Ok(())
}

pub fn print_growth(out: &mut dyn Write, growth: &GrowthMap) -> io::Result<()> {
    writeln!(
        out,
        "\n=== Price Growth ({} vs {}) ===",
        growth.first_period, growth.last_period
    )?;
    for (name, pct) in growth.entries() {
        writeln!(out, "  {}: {:+.2}%", name, pct)?;
    }
    Ok(())
}

pub fn print_insights(out: &mut dyn Write, sections: &[InsightSection]) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Key insights")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    for section in sections {
        writeln!(out, "\n{}:", section.title)?;
        for line in &section.lines {
            writeln!(out, "  {}", line)?;
        }
    }
    Ok(())
}
