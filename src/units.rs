use serde::{Deserialize, Serialize};

/// ISCO 펌프 로그의 압력 단위(psi)를 bar로 환산할 때 쓰는 계수.
pub const BAR_PER_PSI: f64 = 0.068_947_572_9;
/// 실린더 체적 로그 단위(mL)를 L로 환산할 때 쓰는 계수.
pub const L_PER_ML: f64 = 0.001;

/// psi 압력을 bar(abs)로 변환한다.
pub fn psi_to_bar(value_psi: f64) -> f64 {
    value_psi * BAR_PER_PSI
}

/// mL 체적을 L로 변환한다.
pub fn ml_to_l(value_ml: f64) -> f64 {
    value_ml * L_PER_ML
}

/// 시간축 단위. 샘플 인덱스 × 수집 주기(ms)를 해당 단위로 나눠서 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    #[serde(rename = "h")]
    Hours,
    #[serde(rename = "m")]
    Minutes,
    #[serde(rename = "s")]
    Seconds,
}

impl TimeUnit {
    /// ms 값을 이 단위로 바꿀 때의 나눗수.
    pub fn divisor_ms(self) -> f64 {
        match self {
            TimeUnit::Hours => 3_600_000.0,
            TimeUnit::Minutes => 60_000.0,
            TimeUnit::Seconds => 1_000.0,
        }
    }

    /// 그래프/CSV 헤더에 쓰는 축 라벨.
    pub fn axis_label(self) -> &'static str {
        match self {
            TimeUnit::Hours => "Time (h)",
            TimeUnit::Minutes => "Time (min)",
            TimeUnit::Seconds => "Time (s)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psi_bar_conversion() {
        assert!((psi_to_bar(1.0) - 0.0689475729).abs() < 1e-12);
        assert!((psi_to_bar(725.19) - 50.0).abs() < 0.01);
    }

    #[test]
    fn time_divisors() {
        assert_eq!(TimeUnit::Hours.divisor_ms(), 3_600_000.0);
        assert_eq!(TimeUnit::Minutes.divisor_ms(), 60_000.0);
        assert_eq!(TimeUnit::Seconds.divisor_ms(), 1_000.0);
    }
}
