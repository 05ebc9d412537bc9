//! EOS 풀이 회귀 테스트: 근의 물리성, 다항식 잔차, 단조 구간 수렴.

use approx::assert_relative_eq;

use gas_uptake_toolbox::eos::{self, EosError, EosResult, EosVariant, GasProperties, R};

const CO2: GasProperties = GasProperties {
    tc_k: 304.1,
    pc_bar: 73.8,
    omega: 0.239,
};

/// Redlich-Kwong 입방식 잔차를 정의식대로 다시 계산한다.
fn rk_residual(z: f64, gas: &GasProperties, t: f64, p: f64) -> f64 {
    let a = 0.42780 * R * R * gas.tc_k.powf(2.5) / gas.pc_bar;
    let b = 0.086640 * R * gas.tc_k / gas.pc_bar;
    let big_a = a * p / (R * R * t.powf(2.5));
    let big_b = b * p / (R * t);
    z.powi(3) - z.powi(2) + (big_a - big_b - big_b * big_b) * z - big_a * big_b
}

/// Peng-Robinson 입방식 잔차.
fn pr_residual(z: f64, gas: &GasProperties, t: f64, p: f64) -> f64 {
    let tr = t / gas.tc_k;
    let a = 0.457235 * R * R * gas.tc_k * gas.tc_k / gas.pc_bar;
    let b = 0.0777961 * R * gas.tc_k / gas.pc_bar;
    let kappa = 0.37464 + 1.54226 * gas.omega - 0.26992 * gas.omega * gas.omega;
    let alpha = (1.0 + kappa * (1.0 - tr.sqrt())).powi(2);
    let big_a = a * alpha * p / (R * R * t * t);
    let big_b = b * p / (R * t);
    z.powi(3) - (1.0 - big_b) * z.powi(2) + (big_a - 2.0 * big_b - 3.0 * big_b * big_b) * z
        - (big_a * big_b - big_b * big_b - big_b.powi(3))
}

fn pr_big_b(gas: &GasProperties, t: f64, p: f64) -> f64 {
    0.0777961 * R * gas.tc_k / gas.pc_bar * p / (R * t)
}

#[test]
fn rk_reference_case_converges() {
    // 기준 조건 (CO2, 276.3 K, 50 bar)
    let result = eos::solve(EosVariant::RedlichKwong, &CO2, 276.3, 50.0).expect("RK 수렴");
    let EosResult::RedlichKwong { z, rho_mol_per_l } = result else {
        panic!("RK 변종이어야 함");
    };
    assert!(z > 0.0 && z < 1.2, "z = {z}");
    assert!(rk_residual(z, &CO2, 276.3, 50.0).abs() < 1e-8);
    // rho는 정의상 P/(R·T·z)와 일치해야 한다.
    assert_relative_eq!(rho_mol_per_l, 50.0 / (R * 276.3 * z), max_relative = 1e-14);
}

#[test]
fn rk_low_pressure_near_ideal() {
    let result = eos::solve(EosVariant::RedlichKwong, &CO2, 276.3, 1.0).expect("RK 수렴");
    let z = result.z();
    assert!(z > 0.98 && z < 1.01, "저압에서 z는 1 근처여야 함: {z}");
}

#[test]
fn rk_pressure_sweep_stays_physical() {
    for p in [1.0, 5.0, 10.0, 20.0, 50.0, 80.0] {
        let result =
            eos::solve(EosVariant::RedlichKwong, &CO2, 276.3, p).unwrap_or_else(|e| {
                panic!("P = {p} bar에서 수렴해야 함: {e}");
            });
        assert!(result.z() > 0.0, "P = {p}: z = {}", result.z());
        assert!(rk_residual(result.z(), &CO2, 276.3, p).abs() < 1e-8);
    }
}

#[test]
fn pr_reference_case_converges() {
    let result = eos::solve(EosVariant::PengRobinson, &CO2, 276.3, 50.0).expect("PR 수렴");
    let EosResult::PengRobinson {
        z,
        rho_mol_per_l,
        fugacity_coeff,
    } = result
    else {
        panic!("PR 변종이어야 함");
    };
    assert!(z > 0.0);
    // 퓨가시티의 ln(z - B) 항이 정의되려면 z > B.
    assert!(z > pr_big_b(&CO2, 276.3, 50.0));
    assert!(fugacity_coeff > 0.0);
    assert!(pr_residual(z, &CO2, 276.3, 50.0).abs() < 1e-8);
    assert_relative_eq!(rho_mol_per_l, 50.0 / (R * 276.3 * z), max_relative = 1e-14);
}

#[test]
fn pr_low_pressure_fugacity_near_unity() {
    let result = eos::solve(EosVariant::PengRobinson, &CO2, 276.3, 1.0).expect("PR 수렴");
    let EosResult::PengRobinson { fugacity_coeff, .. } = result else {
        panic!("PR 변종이어야 함");
    };
    // 이상기체 극한에서 phi → 1
    assert!((fugacity_coeff - 1.0).abs() < 0.05, "phi = {fugacity_coeff}");
}

#[test]
fn non_positive_inputs_rejected() {
    let bad_tc = GasProperties { tc_k: -1.0, ..CO2 };
    match eos::solve(EosVariant::RedlichKwong, &bad_tc, 276.3, 50.0) {
        Err(EosError::InvalidGasProperties { name, .. }) => assert_eq!(name, "임계 온도 Tc"),
        other => panic!("물성 검증이 동작해야 함: {other:?}"),
    }
    assert!(eos::solve(EosVariant::RedlichKwong, &CO2, 0.0, 50.0).is_err());
    assert!(eos::solve(EosVariant::PengRobinson, &CO2, 276.3, 0.0).is_err());
    assert!(eos::solve(
        EosVariant::PengRobinson,
        &GasProperties { pc_bar: 0.0, ..CO2 },
        276.3,
        50.0
    )
    .is_err());
}
