// 该文件是 Bliffoscope 项目的一部分。
// src/main.rs - 项目主程序
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

mod args;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bliffoscope::{
  CanvasMapper, FromUrl, Grid, MatchRegion, WeaponLocator, Weapons,
  detector::Scan,
  grid::ON_GLYPH,
  input::InputWrapper,
  output::OutputWrapper,
  region::TargetComparison,
  task::{OneShotTask, Task},
};

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("场数据来源: {:?}", args.field.iter().map(|u| u.as_str()).collect::<Vec<_>>());
  info!("阈值比例: {}", args.threshold);
  info!("输出: {:?}", args.output.iter().map(|u| u.as_str()).collect::<Vec<_>>());

  let fields = args
    .field
    .iter()
    .map(|url| -> Result<Grid> { Ok(InputWrapper::from_url(url)?.read_grid()?) })
    .collect::<Result<Vec<_>>>()?;

  let mut weapons = Weapons::new();
  for (name, url) in args.weapon_sources().map_err(anyhow::Error::msg)? {
    let pattern = InputWrapper::from_url(&url)?.read_grid()?;
    info!("武器 {}: {}x{}", name, pattern.cols(), pattern.rows());
    weapons.insert(name, pattern);
  }

  let outputs = args
    .output
    .iter()
    .map(OutputWrapper::from_url)
    .collect::<Result<Vec<_>, _>>()?;

  let locator = WeaponLocator::new()
    .with_threshold_fraction(args.threshold)
    .with_parallel(!args.sequential);
  let scan = Scan::new(locator, weapons);

  let results = OneShotTask.run_task(fields.into_iter(), &scan, outputs)?;

  for (field, locations) in &results {
    if args.inspect {
      for (name, regions) in locations.iter() {
        for (index, region) in regions.iter().enumerate() {
          print_comparison(&scan, field, name, index, *region)?;
        }
      }
    }

    // 与 image 输出相同的画布坐标，方框同样外扩一个单元格
    let mapper = CanvasMapper::from_cell_pixels(args.inspect_cell);
    for &(x, y) in &args.inspect_at {
      let hits = mapper.hit_test(locations, x, y, args.inspect_cell as f32);
      if hits.is_empty() {
        println!("({}, {}) 处没有命中区域", x, y);
      }
      for hit in hits {
        print_comparison(&scan, field, hit.weapon, hit.index, hit.region)?;
      }
    }
  }

  Ok(())
}

fn print_comparison(
  scan: &Scan,
  field: &Grid,
  weapon: &str,
  index: usize,
  region: MatchRegion,
) -> Result<()> {
  let Some(ideal) = scan.weapons().get(weapon) else {
    return Ok(());
  };
  let comparison = TargetComparison::new(weapon, region, field, ideal)?;
  println!(
    "{} #{} {} 匹配 {}/{} ({:.1}%)",
    comparison.weapon,
    index,
    comparison.region,
    comparison.score,
    comparison.max_score,
    comparison.match_ratio() * 100.0
  );
  println!("{}", comparison.side_by_side(ON_GLYPH));
  println!();
  Ok(())
}
