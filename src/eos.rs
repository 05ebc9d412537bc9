//! 입방형 상태방정식(Redlich-Kwong, Peng-Robinson) 풀이.
//! 실험 온도·기준 압력에서 압축 인자 z를 한 번 구해 전체 계열의 몰수 환산에 쓴다.

use serde::{Deserialize, Serialize};

/// 기체 상수 [L·bar/(K·mol)]. 파이프라인의 몰수 환산에도 같은 값을 쓴다.
pub const R: f64 = 0.083145;

const NEWTON_TOL: f64 = 1e-10;
const NEWTON_MAX_ITER: u32 = 50;
/// 초기 추정값. 저환산압력 영역의 증기근이 1 근처라서 근 선택을 따로 하지 않는다.
const Z_INITIAL_GUESS: f64 = 1.0;

/// 대상 기체의 임계 물성. 실행당 한 번 설정 파일에서 읽는다.
#[derive(Debug, Clone, Copy)]
pub struct GasProperties {
    /// 임계 온도 [K]
    pub tc_k: f64,
    /// 임계 압력 [bar]
    pub pc_bar: f64,
    /// 이심 인자 (Peng-Robinson에서만 사용)
    pub omega: f64,
}

/// 상태방정식 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EosVariant {
    #[serde(rename = "rk")]
    RedlichKwong,
    #[serde(rename = "pr")]
    PengRobinson,
}

/// EOS 풀이 결과. Peng-Robinson만 퓨가시티 계수를 함께 낸다.
#[derive(Debug, Clone, Copy)]
pub enum EosResult {
    RedlichKwong {
        z: f64,
        /// 몰 밀도 [mol/L]
        rho_mol_per_l: f64,
    },
    PengRobinson {
        z: f64,
        /// 몰 밀도 [mol/L]
        rho_mol_per_l: f64,
        fugacity_coeff: f64,
    },
}

impl EosResult {
    /// 압축 인자.
    pub fn z(&self) -> f64 {
        match *self {
            EosResult::RedlichKwong { z, .. } | EosResult::PengRobinson { z, .. } => z,
        }
    }

    /// 몰 밀도 [mol/L].
    pub fn rho_mol_per_l(&self) -> f64 {
        match *self {
            EosResult::RedlichKwong { rho_mol_per_l, .. }
            | EosResult::PengRobinson { rho_mol_per_l, .. } => rho_mol_per_l,
        }
    }
}

/// EOS 풀이 시 발생 가능한 오류.
#[derive(Debug)]
pub enum EosError {
    /// 0 이하의 물성/조건 입력
    InvalidGasProperties { name: &'static str, value: f64 },
    /// 반복 한도 내 미수렴 또는 비물리적 근
    NoConvergence { detail: &'static str, z: f64 },
}

impl std::fmt::Display for EosError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EosError::InvalidGasProperties { name, value } => {
                write!(f, "{name} 값은 양수여야 합니다 (입력: {value})")
            }
            EosError::NoConvergence { detail, z } => {
                write!(f, "압축 인자 계산 실패: {detail} (z={z})")
            }
        }
    }
}

impl std::error::Error for EosError {}

/// 입방 다항식 z^3 + c2·z^2 + c1·z + c0 의 근을 Newton-Raphson으로 찾는다.
/// 초기값 1.0, 허용오차 1e-10, 최대 50회.
fn solve_cubic(c2: f64, c1: f64, c0: f64) -> Result<f64, EosError> {
    let mut z = Z_INITIAL_GUESS;
    for _ in 0..NEWTON_MAX_ITER {
        let f = z * z * z + c2 * z * z + c1 * z + c0;
        let df = 3.0 * z * z + 2.0 * c2 * z + c1;
        if df.abs() < f64::EPSILON {
            return Err(EosError::NoConvergence {
                detail: "도함수가 0에 수렴",
                z,
            });
        }
        let delta = f / df;
        z -= delta;
        if delta.abs() < NEWTON_TOL {
            return Ok(z);
        }
    }
    Err(EosError::NoConvergence {
        detail: "반복 한도 초과",
        z,
    })
}

fn check_positive(name: &'static str, value: f64) -> Result<(), EosError> {
    if value <= 0.0 {
        return Err(EosError::InvalidGasProperties { name, value });
    }
    Ok(())
}

/// 주어진 변종으로 압축 인자(및 밀도, PR이면 퓨가시티 계수)를 구한다.
pub fn solve(
    variant: EosVariant,
    gas: &GasProperties,
    temp_k: f64,
    pressure_bar: f64,
) -> Result<EosResult, EosError> {
    check_positive("임계 온도 Tc", gas.tc_k)?;
    check_positive("임계 압력 Pc", gas.pc_bar)?;
    check_positive("실험 온도 T", temp_k)?;
    check_positive("기준 압력 P", pressure_bar)?;

    match variant {
        EosVariant::RedlichKwong => solve_rk(gas, temp_k, pressure_bar),
        EosVariant::PengRobinson => solve_pr(gas, temp_k, pressure_bar),
    }
}

/// Redlich-Kwong: z^3 - z^2 + (A - B - B^2)z - AB = 0
fn solve_rk(gas: &GasProperties, t: f64, p: f64) -> Result<EosResult, EosError> {
    let a = 0.42780 * R * R * gas.tc_k.powf(2.5) / gas.pc_bar;
    let b = 0.086640 * R * gas.tc_k / gas.pc_bar;
    let big_a = a * p / (R * R * t.powf(2.5));
    let big_b = b * p / (R * t);

    let z = solve_cubic(-1.0, big_a - big_b - big_b * big_b, -big_a * big_b)?;
    if z <= 0.0 {
        return Err(EosError::NoConvergence {
            detail: "비물리적 근 (z <= 0)",
            z,
        });
    }
    Ok(EosResult::RedlichKwong {
        z,
        rho_mol_per_l: p / (R * t * z),
    })
}

/// Peng-Robinson: z^3 - (1-B)z^2 + (A - 2B - 3B^2)z - (AB - B^2 - B^3) = 0
fn solve_pr(gas: &GasProperties, t: f64, p: f64) -> Result<EosResult, EosError> {
    let tr = t / gas.tc_k;
    let a = 0.457235 * R * R * gas.tc_k * gas.tc_k / gas.pc_bar;
    let b = 0.0777961 * R * gas.tc_k / gas.pc_bar;
    let kappa = 0.37464 + 1.54226 * gas.omega - 0.26992 * gas.omega * gas.omega;
    let alpha = {
        let base = 1.0 + kappa * (1.0 - tr.sqrt());
        base * base
    };
    let big_a = a * alpha * p / (R * R * t * t);
    let big_b = b * p / (R * t);

    let z = solve_cubic(
        -(1.0 - big_b),
        big_a - 2.0 * big_b - 3.0 * big_b * big_b,
        -(big_a * big_b - big_b * big_b - big_b * big_b * big_b),
    )?;
    if z <= 0.0 {
        return Err(EosError::NoConvergence {
            detail: "비물리적 근 (z <= 0)",
            z,
        });
    }
    // z <= B 이면 퓨가시티의 ln(z - B) 항이 정의되지 않는다.
    if z - big_b <= 0.0 {
        return Err(EosError::NoConvergence {
            detail: "비물리적 근 (z <= B)",
            z,
        });
    }

    let sqrt2 = 2.0_f64.sqrt();
    let fugacity_coeff = (z - 1.0
        - (z - big_b).ln()
        - big_a / (8.0_f64.sqrt() * big_b)
            * ((z + (1.0 + sqrt2) * big_b) / (z + (1.0 - sqrt2) * big_b)).ln())
    .exp();

    Ok(EosResult::PengRobinson {
        z,
        rho_mol_per_l: p / (R * t * z),
        fugacity_coeff,
    })
}
