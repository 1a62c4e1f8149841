//! 軌道のラン長符号化 sequence / unsequence
//!
//! sequence(n) = [k0, k1, ..., km]
//!   k0: 最初の奇数に達するまでの ÷2 回数 (n の末尾ゼロ数)
//!   ki: i 回目の 3x+1 の後、次の奇数に達するまでの ÷2 回数
//!
//! unsequence は 1 から逆向きに x = (v·2^ki - 1) / 3 を適用して n を復元する。

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{HailstoneError, Result};
use crate::parity::ensure_natural;

fn invalid(runs: &[u64], reason: impl Into<String>) -> HailstoneError {
    HailstoneError::InvalidEncoding {
        runs: runs.to_vec(),
        reason: reason.into(),
    }
}

/// n の軌道のラン長列を返す。sequence(1) == [0]。
pub fn sequence(n: &BigInt) -> Result<Vec<u64>> {
    ensure_natural(n)?;
    let k0 = n.trailing_zeros().unwrap_or(0);
    let mut runs = vec![k0];
    let mut current: BigInt = n >> k0;

    while !current.is_one() {
        let lifted = &current * 3u32 + 1u32;
        // 3x+1 (x 奇数) は必ず偶数なので k >= 1
        let k = lifted.trailing_zeros().unwrap_or(0);
        runs.push(k);
        current = lifted >> k;
    }
    Ok(runs)
}

/// 復元途中の値に許すビット長の上限。これを超えるラン長はシフトせずに拒否する。
const MAX_BITS: u64 = 1 << 32;

/// v·2^k ≡ 1 (mod 3) か。2^k mod 3 は k 偶数で 1、奇数で 2。
fn lifts_to_multiple_of_three(value: &BigInt, k: u64) -> bool {
    let pow_mod3 = if k % 2 == 0 { 1u32 } else { 2u32 };
    (value % 3u32 * pow_mod3 % 3u32).is_one()
}

fn check_width(runs: &[u64], value: &BigInt, k: u64, index: usize) -> Result<()> {
    if value.bits().saturating_add(k) > MAX_BITS {
        return Err(invalid(runs, format!("run length {} at index {} is too large", k, index)));
    }
    Ok(())
}

/// ラン長列から開始値を復元する。sequence の逆写像。
pub fn unsequence(runs: &[u64]) -> Result<BigInt> {
    let (&k0, tail) = runs
        .split_first()
        .ok_or_else(|| invalid(runs, "empty run-length list"))?;

    let three = BigInt::from(3u32);
    let mut value = BigInt::one();

    for (i, &k) in tail.iter().enumerate().rev() {
        let index = i + 1;
        if k == 0 {
            return Err(invalid(runs, format!("run length at index {} is zero", index)));
        }
        // シフト前に剰余だけで割り切れるか判定する
        if !lifts_to_multiple_of_three(&value, k) {
            return Err(invalid(
                runs,
                format!("v·2^{} - 1 at index {} is not divisible by 3", k, index),
            ));
        }
        check_width(runs, &value, k, index)?;

        let numerator = (&value << k) - 1u32;
        let (q, r) = numerator.div_rem(&three);
        if !r.is_zero() {
            return Err(invalid(runs, format!("{} is not divisible by 3", numerator)));
        }
        if q.is_one() {
            return Err(invalid(runs, format!("trajectory reaches 1 before index {}", index)));
        }
        value = q;
    }

    check_width(runs, &value, k0, 0)?;
    Ok(value << k0)
}
