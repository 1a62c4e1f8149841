//! コラッツ（hailstone）軌道の計算と有向グラフへの集約
//!
//! 1ステップ T(n) = n/2 (偶数), 3n+1 (奇数) を 1 に到達するまで反復した軌道を
//! 多倍長整数で計算し、範囲内の全軌道を「子 → 親」の辺集合にまとめて
//! Graphviz の `digraph G { ... }` 形式で出力する。

pub mod collapse;
pub mod encoding;
pub mod error;
pub mod graph;
pub mod parity;
pub mod trajectory;

pub use collapse::collapse;
pub use encoding::{sequence, unsequence};
pub use error::{HailstoneError, Result};
pub use graph::{aggregate, aggregate_parallel, render, trajectory_for, EdgeMap, GraphConfig, GraphMode};
pub use parity::{ensure_natural, is_even, is_natural, is_odd, parse_natural};
pub use trajectory::{run, run_bounded, run_odd, run_odd_bounded, step, trajectory_stats, TrajectoryStats};
