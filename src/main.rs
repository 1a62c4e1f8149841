use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hailstone_graph::*;
use num_bigint::BigInt;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// コラッツ軌道の計算と digraph 出力
#[derive(Debug, Parser)]
#[command(name = "hailstone-graph", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 1ステップ計算
    Step { n: String },
    /// 1 までの完全な軌道
    Run { n: String },
    /// 奇数のみの軌道
    Odd { n: String },
    /// 末尾 01 ペアを取り除いた代表値
    Collapse { n: String },
    /// ラン長符号化
    Sequence { n: String },
    /// ラン長列から開始値を復元 (例: 0,1,1,2,3,4)
    Unsequence {
        #[arg(value_delimiter = ',')]
        runs: Vec<u64>,
    },
    /// 範囲 [lo, hi] の軌道を digraph に集約
    Graph {
        #[arg(long, default_value = "1")]
        lo: String,
        #[arg(long, default_value = "256")]
        hi: String,
        /// 偶数を含む完全な軌道を使う
        #[arg(long)]
        full: bool,
        /// 開始値に collapse を適用
        #[arg(long)]
        collapse: bool,
        /// Rayon で並列計算
        #[arg(long)]
        parallel: bool,
        /// 1軌道あたりの最大ステップ数
        #[arg(long)]
        max_steps: Option<u64>,
        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse(s: &str) -> Result<BigInt> {
    parse_natural(s).with_context(|| format!("数値を解析できません: {}", s))
}

fn print_seq(seq: &[BigInt]) {
    let items: Vec<String> = seq.iter().map(|v| v.to_string()).collect();
    println!("[{}]", items.join(", "));
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Step { n } => println!("{}", step(&parse(&n)?)?),
        Command::Run { n } => print_seq(&run(&parse(&n)?)?),
        Command::Odd { n } => print_seq(&run_odd(&parse(&n)?)?),
        Command::Collapse { n } => println!("{}", collapse(&parse(&n)?)?),
        Command::Sequence { n } => println!("{:?}", sequence(&parse(&n)?)?),
        Command::Unsequence { runs } => println!("{}", unsequence(&runs)?),
        Command::Graph {
            lo,
            hi,
            full,
            collapse,
            parallel,
            max_steps,
            output,
        } => {
            let mode = if full { GraphMode::Full } else { GraphMode::Odd };
            let config = GraphConfig::new(parse(&lo)?, parse(&hi)?)
                .with_mode(mode)
                .with_collapse(collapse)
                .with_max_steps(max_steps);

            let timer = Instant::now();
            let edges = if parallel {
                aggregate_parallel(&config)?
            } else {
                aggregate(&config)?
            };
            let elapsed = timer.elapsed();
            tracing::info!(edges = edges.len(), ?elapsed, "graph built");

            match output {
                Some(path) => {
                    fs::write(&path, edges.to_dot())
                        .with_context(|| format!("書き込みに失敗しました: {}", path.display()))?;
                    eprintln!("保存: {} ({} 辺)", path.display(), edges.len());
                }
                None => print!("{}", edges),
            }
        }
    }
    Ok(())
}
