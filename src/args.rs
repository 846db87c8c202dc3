// 该文件是 Bliffoscope 项目的一部分。
// src/args.rs - 项目参数配置
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

use std::collections::HashSet;

use bliffoscope::{
  DEFAULT_THRESHOLD_FRACTION, canvas::DEFAULT_CELL_PIXELS, parse_threshold_fraction,
  weapons::SAMPLE_WEAPONS,
};
use clap::Parser;
use url::Url;

/// Bliffoscope 武器定位参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 场数据来源，可重复指定
  /// 支持格式:
  /// - 文本文件: grid:///path/to/field.txt
  /// - 随附样例: sample:field
  #[arg(long, value_name = "FIELD", default_value = "sample:field")]
  pub field: Vec<Url>,

  /// 武器模式，形如 NAME=URL，可重复指定；缺省为随附的 torpedo 与 starship
  #[arg(long = "weapon", value_name = "NAME=URL", value_parser = parse_weapon)]
  pub weapons: Vec<(String, Url)>,

  /// 阈值比例 (0.0 - 1.0)，得分需严格大于 比例 * 最大得分
  #[arg(long, default_value_t = DEFAULT_THRESHOLD_FRACTION, value_parser = parse_threshold_fraction, value_name = "FRACTION")]
  pub threshold: f64,

  /// 输出，可重复指定
  /// 支持格式:
  /// - 控制台: console:
  /// - 图片: image:///path/out.png?cell=10
  /// - 记录: record:///path/out.json
  #[arg(long, value_name = "OUTPUT", default_value = "console:")]
  pub output: Vec<Url>,

  /// 将每个命中区域与理想武器模式并排打印
  #[arg(long)]
  pub inspect: bool,

  /// 只检查图片上像素点 X,Y 处的命中区域，可重复指定
  #[arg(long, value_name = "X,Y", value_parser = parse_point)]
  pub inspect_at: Vec<(f32, f32)>,

  /// 与 --inspect-at 对应的图片单元格像素，应与 image 输出的 cell 参数一致
  #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_CELL_PIXELS)]
  pub inspect_cell: u32,

  /// 关闭按行并行扫描
  #[arg(long)]
  pub sequential: bool,
}

impl Args {
  /// 未指定武器时使用随附样例，重复的武器名称视为错误
  pub fn weapon_sources(&self) -> Result<Vec<(String, Url)>, String> {
    if self.weapons.is_empty() {
      return Ok(
        SAMPLE_WEAPONS
          .iter()
          .filter_map(|(name, _)| {
            let url = Url::parse(&format!("sample:{}", name)).ok()?;
            Some((name.to_string(), url))
          })
          .collect(),
      );
    }

    let mut seen = HashSet::new();
    for (name, _) in &self.weapons {
      if !seen.insert(name.as_str()) {
        return Err(format!("武器名称重复: {}", name));
      }
    }
    Ok(self.weapons.clone())
  }
}

pub fn parse_weapon(s: &str) -> Result<(String, Url), String> {
  let (name, url) = s
    .split_once('=')
    .ok_or_else(|| format!("武器参数应为 NAME=URL 形式: {}", s))?;
  if name.is_empty() {
    return Err(format!("武器名称为空: {}", s));
  }
  let url = Url::parse(url).map_err(|e| format!("无效的 URL '{}': {}", url, e))?;
  Ok((name.to_string(), url))
}

pub fn parse_point(s: &str) -> Result<(f32, f32), String> {
  let (x, y) = s
    .split_once(',')
    .ok_or_else(|| format!("坐标应为 X,Y 形式: {}", s))?;
  let coord = |v: &str| {
    v.trim()
      .parse::<f32>()
      .ok()
      .filter(|v| v.is_finite())
      .ok_or_else(|| format!("无效的坐标 '{}'", v))
  };
  Ok((coord(x)?, coord(y)?))
}
