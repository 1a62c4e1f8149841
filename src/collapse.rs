//! 代表値の正規化（collapse）
//!
//! 奇数 m に対して 4m+1 を考えると 3(4m+1)+1 = 4(3m+1) なので、
//! 4m+1 と m は同じ「次の奇数」に到達する。2進表記では m の末尾に `01` を
//! 付け足したものが 4m+1 であり、collapse はこの末尾 `01` ペアの繰り返しを
//! 取り除いて代表値に落とす。

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{HailstoneError, Result};
use crate::parity::ensure_natural;

/// 割り切れることが数学的に保証されている除算。余りが出たら内部整合性エラー。
fn exact_div(dividend: &BigInt, divisor: &BigInt) -> Result<BigInt> {
    let (q, r) = dividend.div_rem(divisor);
    if !r.is_zero() {
        return Err(HailstoneError::InexactDivision {
            dividend: dividend.clone(),
            divisor: divisor.clone(),
        });
    }
    Ok(q)
}

/// n = 4m+1 (m 奇数) の形である間 n ← (n-1)/4 を繰り返す。
/// 偶数やこの形でない奇数はそのまま返す。
pub fn collapse(n: &BigInt) -> Result<BigInt> {
    ensure_natural(n)?;
    let four = BigInt::from(4u32);
    let eight = BigInt::from(8u32);
    let five = BigInt::from(5u32);

    let mut current = n.clone();
    // n mod 8 == 5 ⇔ n = 4m+1 かつ m 奇数
    while current.mod_floor(&eight) == five {
        let reduced = exact_div(&(&current - BigInt::one()), &four)?;
        debug_assert!(reduced.is_odd());
        current = reduced;
    }
    Ok(current)
}
