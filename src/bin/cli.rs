//! CPT 命令行工具
//!
//! 从 JSON 图文档或 CSV 边表读取有向图，计算中国邮递员回路

use clap::{Parser, ValueEnum};
use cptgraph::algorithm::ChinesePostman;
use cptgraph::cli::{PrintMode, Printer};
use cptgraph::graph::NodeId;
use cptgraph::import::{GraphImporter, ImportStats};
use cptgraph::types::Cost;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputFormat {
    Json,
    Csv,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Vertical,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "cpt-cli")]
#[command(about = "有向图中国邮递员回路计算工具")]
struct Args {
    /// 输入文件
    #[arg(short, long)]
    input: PathBuf,

    /// 输入格式（默认按扩展名推断）
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// 起点（默认为第一个节点）
    #[arg(short, long)]
    start: Option<String>,

    /// 覆盖默认边代价
    #[arg(short = 'c', long)]
    default_cost: Option<Cost>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let mut importer = GraphImporter::new();
    if let Some(cost) = args.default_cost {
        importer = importer.with_default_cost(cost);
    }

    let format = args.format.unwrap_or_else(|| infer_format(&args.input));
    let (postman, stats) = match format {
        InputFormat::Json => importer.import_json(&args.input)?,
        InputFormat::Csv => importer.import_csv(&args.input)?,
    };

    let start = match args.start {
        Some(name) => NodeId::new(name),
        None => postman
            .graph()
            .node_at(0)
            .cloned()
            .ok_or("图中没有任何节点")?,
    };

    let tour = postman.compute_cpt(&start)?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tour)?);
        }
        OutputFormat::Table | OutputFormat::Vertical => {
            let mode = match args.output {
                OutputFormat::Vertical => PrintMode::Vertical,
                _ => PrintMode::Table,
            };
            print_report(&postman, &stats, &start, &tour, Printer::new(mode));
        }
    }

    Ok(())
}

fn infer_format(path: &std::path::Path) -> InputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
        _ => InputFormat::Json,
    }
}

fn print_report(
    postman: &ChinesePostman,
    stats: &ImportStats,
    start: &NodeId,
    tour: &cptgraph::algorithm::PostmanTour,
    printer: Printer,
) {
    println!("导入完成!");
    println!("  节点数: {}", stats.nodes_imported);
    println!("  边数: {}", stats.edges_imported);
    println!("  代价配置: {}", stats.costs_imported);
    println!("  耗时: {} ms", stats.duration_ms);
    println!();
    print!("{}", printer.print_stats(postman.weighted()));
    println!();
    println!("起点: {}  消圈轮数: {}", start, tour.cancel_rounds);
    print!("{}", printer.print_duplications(tour));
    println!();
    print!("{}", printer.print_tour(tour, postman.weighted()));
}
