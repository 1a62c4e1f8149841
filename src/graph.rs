//! 軌道の集約と digraph 出力
//!
//! 全ての軌道は 1 を根とする木を成す（各ノードの出辺は次の値への1本のみ）。
//! したがって異なる開始値の軌道から同じキー（子）が得られた場合、値（親）も
//! 必ず一致し、辺集合のマージは上書きしても情報を失わない。
//! EdgeMap はこの性質を挿入時に検査し、万一食い違えば EdgeConflict を返す。

use indexmap::map::Entry;
use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info, trace};

use crate::collapse::collapse;
use crate::error::{HailstoneError, Result};
use crate::trajectory;

/// 並列集約で1度に計算する開始値の数
const CHUNK_SIZE: u64 = 10_000;

/// 子 → 親 の辺集合。最初に現れた順序を保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeMap {
    edges: IndexMap<BigInt, BigInt>,
}

impl EdgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 辺 child → parent を追加する。新規なら true、既存の同一辺なら false。
    /// 同じ child に別の parent が来た場合は EdgeConflict。
    pub fn insert_edge(&mut self, child: BigInt, parent: BigInt) -> Result<bool> {
        match self.edges.entry(child) {
            Entry::Occupied(entry) => {
                if *entry.get() == parent {
                    Ok(false)
                } else {
                    Err(HailstoneError::EdgeConflict {
                        key: entry.key().clone(),
                        existing: entry.get().clone(),
                        incoming: parent,
                    })
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(parent);
                Ok(true)
            }
        }
    }

    /// 軌道を長さ2のスライド窓で辺に分解して追加する。新規に増えた辺の数を返す。
    pub fn extend_path(&mut self, path: &[BigInt]) -> Result<usize> {
        let mut added = 0;
        for pair in path.windows(2) {
            if self.insert_edge(pair[0].clone(), pair[1].clone())? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// 別の EdgeMap をマージする（挿入順は self → other）
    pub fn merge(&mut self, other: EdgeMap) -> Result<()> {
        for (child, parent) in other.edges {
            self.insert_edge(child, parent)?;
        }
        Ok(())
    }

    pub fn parent(&self, child: &BigInt) -> Option<&BigInt> {
        self.edges.get(child)
    }

    /// parent を親に持つ子ノード（挿入順）。
    /// 逆引きの索引は持たないので全辺を走査する（辺数に比例）。
    pub fn children_of(&self, parent: &BigInt) -> Vec<&BigInt> {
        self.edges
            .iter()
            .filter(|(_, p)| *p == parent)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn contains_edge(&self, child: &BigInt, parent: &BigInt) -> bool {
        self.edges.get(child) == Some(parent)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BigInt, &BigInt)> {
        self.edges.iter()
    }

    /// Graphviz の digraph 形式へ変換する。
    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EdgeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph G {{")?;
        for (child, parent) in &self.edges {
            writeln!(f, "  {} -> {};", child, parent)?;
        }
        writeln!(f, "}}")
    }
}

/// 集約に使う軌道の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphMode {
    /// run_odd: 奇数のみ
    #[default]
    Odd,
    /// run: 偶数を含む完全な軌道
    Full,
}

/// 集約の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// 開始値の下限（含む）
    pub lo: BigInt,
    /// 開始値の上限（含む）
    pub hi: BigInt,
    pub mode: GraphMode,
    /// 開始値に collapse を適用するか
    pub collapse: bool,
    /// 1軌道あたりの最大ステップ数。None なら無制限。
    pub max_steps: Option<u64>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            lo: BigInt::from(1u32),
            hi: BigInt::from(256u32),
            mode: GraphMode::Odd,
            collapse: false,
            max_steps: None,
        }
    }
}

impl GraphConfig {
    pub fn new(lo: impl Into<BigInt>, hi: impl Into<BigInt>) -> Self {
        GraphConfig {
            lo: lo.into(),
            hi: hi.into(),
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: GraphMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse = collapse;
        self
    }

    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/// 設定に従って1つの開始値の軌道を計算する。
pub fn trajectory_for(n: &BigInt, config: &GraphConfig) -> Result<Vec<BigInt>> {
    let start = if config.collapse { collapse(n)? } else { n.clone() };
    let path = match (config.mode, config.max_steps) {
        (GraphMode::Odd, None) => trajectory::run_odd(&start)?,
        (GraphMode::Odd, Some(limit)) => trajectory::run_odd_bounded(&start, limit)?,
        (GraphMode::Full, None) => trajectory::run(&start)?,
        (GraphMode::Full, Some(limit)) => trajectory::run_bounded(&start, limit)?,
    };
    trace!(n = %n, start = %start, len = path.len(), "trajectory");
    Ok(path)
}

/// [lo, hi] の全開始値の軌道を1つの EdgeMap に集約する（シングルスレッド版）。
/// 範囲に自然数でない値が含まれれば最初の NotNatural をそのまま返す。
pub fn aggregate(config: &GraphConfig) -> Result<EdgeMap> {
    debug!(lo = %config.lo, hi = %config.hi, mode = ?config.mode, "aggregate");
    let mut edges = EdgeMap::new();
    let mut n = config.lo.clone();
    let mut visited = 0u64;

    while n <= config.hi {
        let path = trajectory_for(&n, config)?;
        edges.extend_path(&path)?;
        visited += 1;
        n += BigInt::one();
    }

    info!(starts = visited, edges = edges.len(), "aggregation finished");
    Ok(edges)
}

/// aggregate の並列版。
/// 範囲が u64 に収まる場合のみ Rayon でチャンクごとに軌道を計算し、
/// 開始値の昇順で単一スレッドに畳み込むので出力もエラーも aggregate と一致する。
/// それ以外はシングルスレッド版にフォールバック。
pub fn aggregate_parallel(config: &GraphConfig) -> Result<EdgeMap> {
    let (lo, hi) = match (config.lo.to_u64(), config.hi.to_u64()) {
        (Some(lo), Some(hi)) if lo >= 1 => (lo, hi),
        _ => return aggregate(config),
    };

    debug!(lo, hi, mode = ?config.mode, threads = rayon::current_num_threads(), "aggregate_parallel");
    let mut edges = EdgeMap::new();
    if lo > hi {
        return Ok(edges);
    }

    let mut chunk_start = lo;
    loop {
        let chunk_end = chunk_start.saturating_add(CHUNK_SIZE - 1).min(hi);
        // 結果は開始値の順に並ぶので、エラーも最小の開始値のものが先に返る
        let paths: Vec<Result<Vec<BigInt>>> = (chunk_start..=chunk_end)
            .into_par_iter()
            .map(|n| trajectory_for(&BigInt::from(n), config))
            .collect();

        for path in paths {
            edges.extend_path(&path?)?;
        }
        trace!(chunk_start, chunk_end, edges = edges.len(), "chunk merged");

        if chunk_end == hi {
            break;
        }
        chunk_start = chunk_end + 1;
    }

    info!(starts = hi - lo + 1, edges = edges.len(), "aggregation finished");
    Ok(edges)
}

/// 集約して digraph 文字列を返す。
pub fn render(config: &GraphConfig) -> Result<String> {
    Ok(aggregate(config)?.to_dot())
}
