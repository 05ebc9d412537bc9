//! 핵심 계산 로직(EOS 풀이, 포집량 파이프라인)을 라이브러리로 분리하여
//! CLI와 테스트 양쪽에서 그대로 쓸 수 있게 한다.

pub mod app;
pub mod clathrate;
pub mod data_io;
pub mod eos;
pub mod export;
pub mod plot;
pub mod settings;
pub mod ui_cli;
pub mod units;
pub mod uptake;
