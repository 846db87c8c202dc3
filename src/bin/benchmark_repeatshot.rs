// 该文件是 Bliffoscope 项目的一部分。
// src/bin/benchmark_repeatshot.rs - 重复定位的性能测试
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use anyhow::Result;
use clap::Parser;
use url::Url;

use bliffoscope::{
  DEFAULT_THRESHOLD_FRACTION, FromUrl, WeaponLocator, parse_threshold_fraction,
  detector::Scan,
  input::InputWrapper,
  output::OutputWrapper,
  task::{DEFAULT_REPEAT_TIMES, RepeatShotTask, Task},
  weapons::sample_weapons,
};
use tracing::info;

/// Bliffoscope 定位性能测试参数
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 场数据来源
  #[arg(long, value_name = "FIELD", default_value = "sample:field")]
  pub field: Url,
  /// 输出路径
  #[arg(long, value_name = "OUTPUT", default_value = "console:")]
  pub output: Url,
  /// 重复次数
  #[arg(long, default_value_t = DEFAULT_REPEAT_TIMES)]
  pub repeat: usize,
  /// 阈值比例 (0.0 - 1.0)
  #[arg(long, default_value_t = DEFAULT_THRESHOLD_FRACTION, value_parser = parse_threshold_fraction, value_name = "FRACTION")]
  pub threshold: f64,
  /// 关闭按行并行扫描
  #[arg(long)]
  pub sequential: bool,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("场数据来源: {}", args.field);
  info!("输出路径: {}", args.output);
  info!("重复次数: {}", args.repeat);

  let field = InputWrapper::from_url(&args.field)?.read_grid()?;
  let locator = WeaponLocator::new()
    .with_threshold_fraction(args.threshold)
    .with_parallel(!args.sequential);
  let scan = Scan::new(locator, sample_weapons()?);
  let output = OutputWrapper::from_url(&args.output)?;

  let report = RepeatShotTask::default()
    .with_repeat_times(args.repeat)
    .run_task(std::iter::once(field), scan, output)?;
  info!(
    "共 {} 次定位，平均耗时: {:.2?}",
    report.times.len(),
    report.average()
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_outside_fraction_is_rejected() {
    assert!(Args::try_parse_from(["benchmark-repeatshot", "--threshold", "0.9"]).is_ok());
    assert!(Args::try_parse_from(["benchmark-repeatshot", "--threshold", "1.5"]).is_err());
    assert!(Args::try_parse_from(["benchmark-repeatshot", "--threshold", "NaN"]).is_err());
  }
}
