//! AI 错误类型

use thiserror::Error;

/// 对手计算走法时的错误
///
/// “无子可下”不是错误：`find_best_move` 返回 `Ok(None)`。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AiError {
    /// 对手尚未就绪（例如模型未加载）
    #[error("Opponent {name} is not ready")]
    NotReady { name: String },

    /// 策略模型推理失败
    #[error("Policy inference failed: {0}")]
    Policy(String),

    /// 策略模型输出长度不对
    #[error("Policy output has {actual} entries, expected {expected}")]
    PolicyShape { expected: usize, actual: usize },
}
