//! 원시 (압력, 체적) 계열을 가스 포집량 곡선으로 변환하는 파이프라인.
//! 단위 환산 → 시간축 생성 → 초기 진동 구간 절단 → 체적 0.0 이상치 제거 →
//! 변위 기반 몰수 환산 순서로 진행한다.

use log::info;

use crate::eos::R;
use crate::units::{self, TimeUnit};

/// 물 몰질량 [g/mol]. 기준 물질 몰수 환산에 쓴다.
pub const WATER_MOLAR_MASS_G_PER_MOL: f64 = 18.01528;

/// 로그 파일의 원시 샘플 한 줄.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// ISCO 펌프 압력 [psi]
    pub pressure_psi: f64,
    /// 실린더 체적 [mL]
    pub volume_ml: f64,
}

/// 파이프라인 입력. z는 eos 모듈에서 기준 압력과 실험 온도로 한 번 계산한 값이다.
#[derive(Debug, Clone, Copy)]
pub struct PipelineInput<'a> {
    pub samples: &'a [RawSample],
    /// 데이터 수집 주기 [ms]
    pub interval_ms: u64,
    pub time_unit: TimeUnit,
    /// 실험 온도 [K]
    pub temp_k: f64,
    /// 압축 인자 (계열 전체에 상수로 적용)
    pub z: f64,
    /// 기준 물질(물) 몰수 [mol]
    pub water_mol: f64,
}

/// 정제·환산을 마친 샘플 한 점.
#[derive(Debug, Clone, Copy)]
pub struct UptakePoint {
    /// 원본 수집 인덱스. 절단/이상치 제거 후에도 유지한다.
    pub index: usize,
    /// 설정한 단위의 경과 시간. 원본 인덱스 기준이라 절단 후에도 0으로 되돌리지 않는다.
    pub time: f64,
    pub pressure_psi: f64,
    pub pressure_bar: f64,
    pub volume_ml: f64,
    pub volume_l: f64,
    /// 기준 샘플 대비 체적 변위 [L]
    pub delta_v_l: f64,
    /// 흡수된 가스 몰수 [mol]
    pub gas_mol: f64,
    /// 물 1몰당 가스 포집량
    pub uptake_per_mol_water: f64,
}

/// 파이프라인 결과 계열과 정제 통계.
#[derive(Debug, Clone)]
pub struct UptakeSeries {
    pub points: Vec<UptakePoint>,
    /// 초기 진동 구간에서 버린 샘플 수
    pub truncated_count: usize,
    /// 체적 0.0 이상치로 버린 샘플 수
    pub zero_removed_count: usize,
}

/// 파이프라인 오류.
#[derive(Debug)]
pub enum PipelineError {
    /// 정제 과정에서 샘플이 모두 제거됨 (진동이 끝까지 지속된 경우 포함)
    EmptySeriesAfterCleaning,
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::EmptySeriesAfterCleaning => {
                write!(f, "정제 후 남은 샘플이 없습니다. 원본 로그를 확인하세요.")
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// 물 질량 [g]을 몰수로 환산한다.
pub fn water_mass_to_mol(water_mass_g: f64) -> f64 {
    water_mass_g / WATER_MOLAR_MASS_G_PER_MOL
}

/// 원시 계열을 포집량 계열로 변환한다.
pub fn process(input: &PipelineInput) -> Result<UptakeSeries, PipelineError> {
    // 1~2. 단위 환산 + 원본 인덱스 기준 시간축
    let divisor = input.time_unit.divisor_ms();
    let mut rows: Vec<UptakePoint> = input
        .samples
        .iter()
        .enumerate()
        .map(|(i, s)| UptakePoint {
            index: i,
            time: i as f64 * input.interval_ms as f64 / divisor,
            pressure_psi: s.pressure_psi,
            pressure_bar: units::psi_to_bar(s.pressure_psi),
            volume_ml: s.volume_ml,
            volume_l: units::ml_to_l(s.volume_ml),
            delta_v_l: 0.0,
            gas_mol: 0.0,
            uptake_per_mol_water: 0.0,
        })
        .collect();

    // 3. 초기 진동 구간 절단
    let truncated_count = truncate_settling(&mut rows)?;
    if truncated_count > 0 {
        info!(
            "실험 초기에 실린더 체적이 증가하는 구간이 있어 샘플 {truncated_count}개를 절단했습니다."
        );
    }

    // 4. 체적이 정확히 0.0인 기록 누락 샘플 제거
    let before = rows.len();
    rows.retain(|p| p.volume_l != 0.0);
    let zero_removed_count = before - rows.len();
    if zero_removed_count > 0 {
        info!("체적이 0.0으로 기록된 이상치 {zero_removed_count}개를 제거했습니다.");
    }
    if rows.is_empty() {
        return Err(PipelineError::EmptySeriesAfterCleaning);
    }

    // 5~6. 기준 샘플 대비 변위 → 몰수 환산
    let baseline_l = rows[0].volume_l;
    for p in rows.iter_mut() {
        p.delta_v_l = baseline_l - p.volume_l;
        p.gas_mol = p.pressure_bar * p.delta_v_l / (R * input.temp_k * input.z);
        p.uptake_per_mol_water = p.gas_mol / input.water_mol;
    }

    Ok(UptakeSeries {
        points: rows,
        truncated_count,
        zero_removed_count,
    })
}

/// 체적이 증가하는 선두 구간을 찾아 버린다. 반환값은 버린 샘플 수.
/// 증가가 끝까지 이어져 기준점을 못 찾으면 전체가 진동 구간이므로 오류.
fn truncate_settling(rows: &mut Vec<UptakePoint>) -> Result<usize, PipelineError> {
    if rows.len() < 2 || rows[0].volume_l >= rows[1].volume_l {
        return Ok(0);
    }
    let mut breakpoint = None;
    for i in 0..rows.len() - 1 {
        if rows[i].volume_l >= rows[i + 1].volume_l {
            breakpoint = Some(i);
            break;
        }
    }
    match breakpoint {
        Some(k) => {
            // [0, k] 버리고 k+1을 새 기준 샘플로 삼는다.
            rows.drain(..=k);
            Ok(k + 1)
        }
        None => Err(PipelineError::EmptySeriesAfterCleaning),
    }
}

impl UptakeSeries {
    /// 시간축만 모아서 반환한다 (그래프/내보내기용).
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    /// 물 1몰당 포집량만 모아서 반환한다.
    pub fn uptakes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.uptake_per_mol_water).collect()
    }

    /// 계열의 최대 포집량. 그래프 y축 상한 산정에 쓴다.
    pub fn max_uptake(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.uptake_per_mol_water)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// 시간 구간 [start, end]만 남기고 시간축을 start 기준 0으로 민다.
    /// 구간에 샘플이 없으면 None.
    pub fn trim_window(&self, start: f64, end: f64) -> Option<UptakeSeries> {
        let points: Vec<UptakePoint> = self
            .points
            .iter()
            .filter(|p| p.time >= start && p.time <= end)
            .map(|p| UptakePoint {
                time: p.time - start,
                ..*p
            })
            .collect();
        if points.is_empty() {
            return None;
        }
        Some(UptakeSeries {
            points,
            truncated_count: self.truncated_count,
            zero_removed_count: self.zero_removed_count,
        })
    }

    /// 산점도용 균등 간격 다운샘플. `n_dots`는 1 이상, 샘플 수 이하여야 한다.
    pub fn downsample(&self, n_dots: usize) -> UptakeSeries {
        let stride = (self.points.len() / n_dots).max(1);
        UptakeSeries {
            points: self.points.iter().step_by(stride).copied().collect(),
            truncated_count: self.truncated_count,
            zero_removed_count: self.zero_removed_count,
        }
    }
}
