//! K 线形态分类器与风控辅助函数。

pub mod classifier;
pub mod levels;
pub mod patterns;
pub mod risk;

pub use classifier::PatternClassifier;
