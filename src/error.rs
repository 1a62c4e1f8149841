//! エラー型

use num_bigint::BigInt;
use thiserror::Error;

/// 軌道計算・グラフ集約で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HailstoneError {
    /// 自然数 (n > 0) でない入力。呼び出し側の前提条件違反。
    #[error("not a natural number: {0}")]
    NotNatural(BigInt),

    /// 整数として解析できない入力 (例: "0.2")
    #[error("not an integer: {0:?}")]
    NotInteger(String),

    /// unsequence に渡されたラン長列がどの軌道にも対応しない
    #[error("not a valid hailstone encoding {runs:?}: {reason}")]
    InvalidEncoding { runs: Vec<u64>, reason: String },

    /// 整数になるべき除算が割り切れなかった (内部整合性エラー)
    #[error("inexact division: {dividend} / {divisor}")]
    InexactDivision { dividend: BigInt, divisor: BigInt },

    /// 同じ子ノードに異なる親が登録されようとした
    #[error("edge conflict at {key}: existing parent {existing}, incoming {incoming}")]
    EdgeConflict {
        key: BigInt,
        existing: BigInt,
        incoming: BigInt,
    },

    /// max_steps 以内に 1 へ到達しなかった
    #[error("trajectory of {start} did not reach 1 within {max_steps} steps")]
    StepLimit { start: BigInt, max_steps: u64 },
}

pub type Result<T> = std::result::Result<T, HailstoneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = HailstoneError::NotNatural(BigInt::from(0));
        assert_eq!(err.to_string(), "not a natural number: 0");

        let err = HailstoneError::NotInteger("0.2".into());
        assert_eq!(err.to_string(), "not an integer: \"0.2\"");

        let err = HailstoneError::InvalidEncoding {
            runs: vec![0, 3],
            reason: "7 is not divisible by 3".into(),
        };
        assert!(err.to_string().starts_with("not a valid hailstone encoding"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HailstoneError>();
    }
}
