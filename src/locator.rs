// 该文件是 Bliffoscope 项目的一部分。
// src/locator.rs - 滑动窗口武器定位
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

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::debug;

use crate::{
  grid::Grid,
  region::MatchRegion,
  scorer::{max_score, score_unchecked},
};

/// 窗口得分需严格超过 `阈值比例 * 最大得分` 才计为命中
pub const DEFAULT_THRESHOLD_FRACTION: f64 = 0.74;

/// 解析命令行中的阈值比例，只接受 `0.0..=1.0`，NaN 也会被拒绝
pub fn parse_threshold_fraction(s: &str) -> Result<f64, String> {
  let value: f64 = s.parse().map_err(|e| format!("无效的阈值 '{}': {}", s, e))?;
  if !(0.0..=1.0).contains(&value) {
    return Err(format!("阈值比例应在 0.0 到 1.0 之间: {}", value));
  }
  Ok(value)
}

/// 按名称索引的武器模式，保留插入顺序
pub type Weapons = IndexMap<String, Grid>;

/// 每种武器的命中区域，顺序与 [`Weapons`] 一致，区域按行优先扫描顺序排列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeaponLocations {
  inner: IndexMap<String, Vec<MatchRegion>>,
}

impl WeaponLocations {
  pub fn get(&self, name: &str) -> Option<&[MatchRegion]> {
    self.inner.get(name).map(Vec::as_slice)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[MatchRegion])> {
    self
      .inner
      .iter()
      .map(|(name, regions)| (name.as_str(), regions.as_slice()))
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.inner.keys().map(String::as_str)
  }

  /// 所有武器的命中总数
  pub fn total(&self) -> usize {
    self.inner.values().map(Vec::len).sum()
  }

  pub fn len(&self) -> usize {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }
}

impl FromIterator<(String, Vec<MatchRegion>)> for WeaponLocations {
  fn from_iter<I: IntoIterator<Item = (String, Vec<MatchRegion>)>>(iter: I) -> Self {
    Self {
      inner: iter.into_iter().collect(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponLocator {
  threshold_fraction: f64,
  parallel: bool,
}

impl Default for WeaponLocator {
  fn default() -> Self {
    Self {
      threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
      parallel: true,
    }
  }
}

impl WeaponLocator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_threshold_fraction(mut self, threshold_fraction: f64) -> Self {
    self.threshold_fraction = threshold_fraction;
    self
  }

  /// 是否将起始行分片到 rayon 线程池上并行扫描，结果与串行扫描一致
  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  pub fn threshold_fraction(&self) -> f64 {
    self.threshold_fraction
  }

  pub fn is_parallel(&self) -> bool {
    self.parallel
  }

  /// 对每种武器独立扫描整个场
  pub fn locate(&self, weapons: &Weapons, field: &Grid) -> WeaponLocations {
    weapons
      .iter()
      .map(|(name, pattern)| {
        let regions = self.locate_pattern(pattern, field);
        debug!("{}: 找到 {} 个候选区域", name, regions.len());
        (name.clone(), regions)
      })
      .collect()
  }

  /// 模式比场大时返回空序列
  pub fn locate_pattern(&self, pattern: &Grid, field: &Grid) -> Vec<MatchRegion> {
    if pattern.rows() > field.rows() || pattern.cols() > field.cols() {
      return Vec::new();
    }

    let threshold = self.threshold_fraction * max_score(pattern) as f64;
    let last_row = field.rows() - pattern.rows();
    let last_col = field.cols() - pattern.cols();

    let scan_row = |row: usize| -> Vec<MatchRegion> {
      (0..=last_col)
        .filter(|&col| score_unchecked(pattern, field, row, col) as f64 > threshold)
        .map(|col| MatchRegion::new(col, row, pattern.cols(), pattern.rows()))
        .collect()
    };

    if self.parallel {
      (0..=last_row)
        .into_par_iter()
        .map(scan_row)
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
    } else {
      (0..=last_row).flat_map(scan_row).collect()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_must_be_a_fraction() {
    assert_eq!(parse_threshold_fraction("0.5"), Ok(0.5));
    assert_eq!(parse_threshold_fraction("1"), Ok(1.0));
    assert!(parse_threshold_fraction("1.5").is_err());
    assert!(parse_threshold_fraction("-0.1").is_err());
    assert!(parse_threshold_fraction("NaN").is_err());
    assert!(parse_threshold_fraction("abc").is_err());
  }

  fn grid(text: &str) -> Grid {
    Grid::parse(text).unwrap()
  }

  fn weapons(entries: &[(&str, Grid)]) -> Weapons {
    entries
      .iter()
      .map(|(name, pattern)| (name.to_string(), pattern.clone()))
      .collect()
  }

  #[test]
  fn single_on_cell_matches_only_the_center() {
    let field = grid("   \n + \n   ");
    let weapons = weapons(&[("dot", grid("+"))]);
    let locations = WeaponLocator::new()
      .with_threshold_fraction(0.5)
      .locate(&weapons, &field);
    assert_eq!(locations.get("dot"), Some(&[MatchRegion::new(1, 1, 1, 1)][..]));
  }

  #[test]
  fn threshold_is_strict() {
    // 2x2 模式在 2x2 场上得分为 2，阈值 0.5 * 4 = 2 不应命中
    let field = grid("++\n  ");
    let pattern = grid("+ \n+ ");
    let locator = WeaponLocator::new().with_threshold_fraction(0.5);
    assert!(locator.locate_pattern(&pattern, &field).is_empty());
    let locator = locator.with_threshold_fraction(0.49);
    assert_eq!(
      locator.locate_pattern(&pattern, &field),
      vec![MatchRegion::new(0, 0, 2, 2)]
    );
  }

  #[test]
  fn embedded_pattern_is_found_at_its_origin() {
    let pattern = grid("+ +\n+++\n + ");
    let (origin_row, origin_col) = (4, 7);
    let field = Grid::from_fn(12, 15, |r, c| {
      r >= origin_row
        && c >= origin_col
        && pattern.get(r - origin_row, c - origin_col) == Some(true)
    })
    .unwrap();
    let regions = WeaponLocator::new()
      .with_threshold_fraction(0.99)
      .locate_pattern(&pattern, &field);
    assert_eq!(regions, vec![MatchRegion::new(7, 4, 3, 3)]);
  }

  #[test]
  fn all_off_field_has_no_match_for_dense_patterns() {
    let field = Grid::from_fn(20, 20, |_, _| false).unwrap();
    let pattern = grid("+++\n+ +\n+++");
    assert!(
      WeaponLocator::new()
        .locate_pattern(&pattern, &field)
        .is_empty()
    );
  }

  #[test]
  fn oversized_pattern_yields_empty_sequence() {
    let field = grid("++\n++");
    let tall = grid("+\n+\n+");
    let wide = grid("+++");
    let locations = WeaponLocator::new()
      .with_threshold_fraction(0.0)
      .locate(&weapons(&[("tall", tall), ("wide", wide)]), &field);
    assert_eq!(locations.len(), 2);
    assert_eq!(locations.get("tall"), Some(&[][..]));
    assert_eq!(locations.get("wide"), Some(&[][..]));
    assert_eq!(locations.total(), 0);
  }

  #[test]
  fn results_follow_row_major_scan_order() {
    let field = Grid::from_fn(3, 4, |_, _| true).unwrap();
    let regions = WeaponLocator::new()
      .with_threshold_fraction(0.5)
      .locate_pattern(&grid("++\n++"), &field);
    let origins: Vec<_> = regions.iter().map(|r| (r.x, r.y)).collect();
    assert_eq!(
      origins,
      vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
    );
  }

  #[test]
  fn locations_keep_weapon_insertion_order() {
    let field = Grid::from_fn(4, 4, |r, c| (r + c) % 2 == 0).unwrap();
    let weapons = weapons(&[("zeta", grid("+")), ("alpha", grid(" ")), ("mid", grid("++"))]);
    let locations = WeaponLocator::new().locate(&weapons, &field);
    assert_eq!(locations.names().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
  }

  #[test]
  fn parallel_and_sequential_scans_agree() {
    let field = Grid::from_fn(40, 37, |r, c| (r * 13 + c * 7 + r * c) % 3 == 0).unwrap();
    let pattern = Grid::from_fn(5, 4, |r, c| (r + c) % 3 == 0).unwrap();
    let weapons = weapons(&[("p", pattern)]);
    let locator = WeaponLocator::new().with_threshold_fraction(0.6);
    let parallel = locator.with_parallel(true).locate(&weapons, &field);
    let sequential = locator.with_parallel(false).locate(&weapons, &field);
    assert!(parallel.total() > 0);
    assert_eq!(parallel, sequential);
  }

  #[test]
  fn locate_is_idempotent() {
    let field = Grid::from_fn(25, 25, |r, c| (r * c + r) % 4 == 1).unwrap();
    let weapons = weapons(&[("a", grid("+ \n +")), ("b", grid(" + \n+ +"))]);
    let locator = WeaponLocator::new().with_threshold_fraction(0.7);
    assert_eq!(
      locator.locate(&weapons, &field),
      locator.locate(&weapons, &field)
    );
  }
}
