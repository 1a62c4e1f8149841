use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use std::str::FromStr;

use crate::error::{HailstoneError, Result};

/// 偶数判定。0 は偶数とも奇数とも扱わない（退化ケース）。
#[inline]
pub fn is_even(n: &BigInt) -> bool {
    !n.is_zero() && n.is_even()
}

/// 奇数判定。負の奇数も奇数。
#[inline]
pub fn is_odd(n: &BigInt) -> bool {
    n.is_odd()
}

/// 自然数判定 (n > 0)
#[inline]
pub fn is_natural(n: &BigInt) -> bool {
    n.is_positive()
}

/// 入口での前提条件チェック。自然数でなければ NotNatural。
#[inline]
pub fn ensure_natural(n: &BigInt) -> Result<()> {
    if is_natural(n) {
        Ok(())
    } else {
        Err(HailstoneError::NotNatural(n.clone()))
    }
}

/// 符号（任意）と ASCII 数字のみからなるか。`_` 区切りなどは受け付けない。
fn is_decimal_integer(s: &str) -> bool {
    let digits = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// 10進文字列を自然数として解析する。
/// "0.2" や "1_000" のような非整数表記は NotInteger、0 や負数は NotNatural。
pub fn parse_natural(s: &str) -> Result<BigInt> {
    let trimmed = s.trim();
    if !is_decimal_integer(trimmed) {
        return Err(HailstoneError::NotInteger(trimmed.to_string()));
    }
    let n = BigInt::from_str(trimmed).map_err(|_| HailstoneError::NotInteger(trimmed.to_string()))?;
    ensure_natural(&n)?;
    Ok(n)
}
