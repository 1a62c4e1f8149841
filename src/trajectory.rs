use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

use crate::error::{HailstoneError, Result};
use crate::parity::ensure_natural;

/// 軌道の集約統計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryStats {
    /// 開始値
    pub start: BigInt,
    /// 総ステップ数 (1 に到達するまでの step 回数)
    pub total_steps: u64,
    /// 3n+1 ステップの回数
    pub odd_steps: u64,
    /// n/2 ステップの回数
    pub even_steps: u64,
    /// 最大値
    pub max_value: BigInt,
}

/// 検証済みの値に対する1ステップ。
#[inline]
pub(crate) fn step_unchecked(n: &BigInt) -> BigInt {
    if n.is_even() {
        n >> 1u32
    } else {
        n * 3u32 + 1u32
    }
}

/// コラッツ写像の1ステップ: 偶数なら n/2、奇数なら 3n+1。
pub fn step(n: &BigInt) -> Result<BigInt> {
    ensure_natural(n)?;
    Ok(step_unchecked(n))
}

/// n から 1 までの完全な軌道 [n, step(n), ..., 1]（両端を含む）。
/// 1 に到達するまで反復する（コラッツ予想を仮定）。
pub fn run(n: &BigInt) -> Result<Vec<BigInt>> {
    ensure_natural(n)?;
    let mut seq = vec![n.clone()];
    let mut current = n.clone();
    while !current.is_one() {
        current = step_unchecked(&current);
        seq.push(current.clone());
    }
    Ok(seq)
}

/// run と同じだが max_steps ステップ以内に 1 へ到達しなければ StepLimit を返す。
pub fn run_bounded(n: &BigInt, max_steps: u64) -> Result<Vec<BigInt>> {
    ensure_natural(n)?;
    let mut seq = vec![n.clone()];
    let mut current = n.clone();
    let mut steps = 0u64;
    while !current.is_one() {
        if steps >= max_steps {
            return Err(HailstoneError::StepLimit {
                start: n.clone(),
                max_steps,
            });
        }
        current = step_unchecked(&current);
        seq.push(current.clone());
        steps += 1;
    }
    Ok(seq)
}

/// 奇数のみの軌道。偶数の中間値は省く。
/// 開始値は奇数のときだけ含まれ、終端の 1 は必ず含まれる。
pub fn run_odd(n: &BigInt) -> Result<Vec<BigInt>> {
    ensure_natural(n)?;
    let mut seq = Vec::new();
    let mut current = n.clone();
    if current.is_odd() {
        seq.push(current.clone());
    }
    while !current.is_one() {
        current = step_unchecked(&current);
        if current.is_odd() {
            seq.push(current.clone());
        }
    }
    Ok(seq)
}

/// run_odd の max_steps 制限付き版。ステップ数は偶数ステップも含めて数える。
pub fn run_odd_bounded(n: &BigInt, max_steps: u64) -> Result<Vec<BigInt>> {
    ensure_natural(n)?;
    let mut seq = Vec::new();
    let mut current = n.clone();
    let mut steps = 0u64;
    if current.is_odd() {
        seq.push(current.clone());
    }
    while !current.is_one() {
        if steps >= max_steps {
            return Err(HailstoneError::StepLimit {
                start: n.clone(),
                max_steps,
            });
        }
        current = step_unchecked(&current);
        steps += 1;
        if current.is_odd() {
            seq.push(current.clone());
        }
    }
    Ok(seq)
}

/// 軌道を保持せずに統計だけを計算する。
pub fn trajectory_stats(n: &BigInt) -> Result<TrajectoryStats> {
    ensure_natural(n)?;
    let mut current = n.clone();
    let mut max_value = n.clone();
    let mut odd_steps = 0u64;
    let mut even_steps = 0u64;

    while !current.is_one() {
        if current.is_even() {
            even_steps += 1;
        } else {
            odd_steps += 1;
        }
        current = step_unchecked(&current);
        if current > max_value {
            max_value = current.clone();
        }
    }

    Ok(TrajectoryStats {
        start: n.clone(),
        total_steps: odd_steps + even_steps,
        odd_steps,
        even_steps,
        max_value,
    })
}
