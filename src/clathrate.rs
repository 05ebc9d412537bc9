//! 클라스레이트 구조별 이론 최대 포집량 조회표.
//! 계산이 아니라 문헌값 주석선(그래프 가로 점선)에만 쓰인다.

use serde::{Deserialize, Serialize};

/// 클라스레이트 구조 유형. `None`이면 주석선을 그리지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClathrateType {
    #[serde(rename = "sI")]
    SI,
    #[serde(rename = "sII")]
    SII,
    #[serde(rename = "sH")]
    SH,
    #[serde(rename = "SCS-I")]
    ScsI,
    #[serde(rename = "TS-I")]
    TsI,
    #[serde(rename = "HS-I")]
    HsI,
    #[serde(rename = "none")]
    None,
}

impl ClathrateType {
    /// 물 1몰당 이론 최대 포집량 (문헌값).
    pub fn theoretical_max(self) -> Option<f64> {
        match self {
            ClathrateType::SI => Some(0.1739),
            ClathrateType::SII | ClathrateType::SH => Some(0.1765),
            ClathrateType::ScsI => Some(0.04368),
            ClathrateType::TsI => Some(0.05814),
            ClathrateType::HsI => Some(0.075),
            ClathrateType::None => None,
        }
    }

    /// 주석선을 그릴 때 함께 쓰는 그래프 y축 상한.
    pub fn plot_y_max(self) -> Option<f64> {
        match self {
            ClathrateType::SI => Some(0.19),
            ClathrateType::SII | ClathrateType::SH => Some(0.194),
            ClathrateType::ScsI => Some(0.05),
            ClathrateType::TsI => Some(0.065),
            ClathrateType::HsI => Some(0.085),
            ClathrateType::None => None,
        }
    }
}
