// 该文件是 Bliffoscope 项目的一部分。
// src/region.rs - 匹配区域与子网格提取
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

use std::fmt;

use crate::{
  grid::{Grid, GridError},
  scorer::{max_score, score},
};

/// 场坐标系中的矩形：`x`/`y` 为左上角的列/行，`w`/`h` 为模式的列数/行数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchRegion {
  pub x: usize,
  pub y: usize,
  pub w: usize,
  pub h: usize,
}

impl MatchRegion {
  pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
    Self { x, y, w, h }
  }

  pub fn extract_from(&self, field: &Grid) -> Result<Grid, GridError> {
    extract(field, self.x, self.y, self.w, self.h)
  }
}

impl fmt::Display for MatchRegion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {}, {}x{})", self.x, self.y, self.w, self.h)
  }
}

/// 提取场中 (`x`, `y`) 起、`width` 列 `height` 行的子网格
pub fn extract(
  field: &Grid,
  x: usize,
  y: usize,
  width: usize,
  height: usize,
) -> Result<Grid, GridError> {
  let in_bounds = x.checked_add(width).is_some_and(|end| end <= field.cols())
    && y.checked_add(height).is_some_and(|end| end <= field.rows());
  if !in_bounds {
    return Err(GridError::IndexOutOfRange {
      x,
      y,
      width,
      height,
      cols: field.cols(),
      rows: field.rows(),
    });
  }

  let rows = (0..height)
    .map(|i| field.row(y + i)[x..x + width].to_vec())
    .collect();
  Grid::from_rows(rows)
}

/// 命中区域与理想武器模式的对照，供用户检查某个命中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetComparison {
  pub weapon: String,
  pub region: MatchRegion,
  pub located: Grid,
  pub ideal: Grid,
  pub score: usize,
  pub max_score: usize,
}

impl TargetComparison {
  pub fn new(
    weapon: &str,
    region: MatchRegion,
    field: &Grid,
    ideal: &Grid,
  ) -> Result<Self, GridError> {
    let located = region.extract_from(field)?;
    let score = score(ideal, field, region.y, region.x)?;
    Ok(Self {
      weapon: weapon.to_string(),
      region,
      located,
      ideal: ideal.clone(),
      score,
      max_score: max_score(ideal),
    })
  }

  /// 匹配单元格所占比例
  pub fn match_ratio(&self) -> f64 {
    self.score as f64 / self.max_score as f64
  }

  /// 左侧为定位到的区域，右侧为理想模式，逐行并排
  pub fn side_by_side(&self, on: char) -> String {
    let located = self.located.render(on);
    let ideal = self.ideal.render(on);
    located
      .lines()
      .zip(ideal.lines())
      .map(|(left, right)| format!("{} | {}", left, right))
      .collect::<Vec<_>>()
      .join("\n")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extract_copies_the_requested_window() {
    let field = Grid::parse("+   \n ++ \n  + \n   +").unwrap();
    let sub = extract(&field, 1, 1, 2, 2).unwrap();
    assert_eq!(sub, Grid::parse("++\n +").unwrap());
  }

  #[test]
  fn whole_field_extracts_to_itself() {
    let field = Grid::from_fn(4, 6, |r, c| r == c).unwrap();
    assert_eq!(extract(&field, 0, 0, 6, 4).unwrap(), field);
  }

  #[test]
  fn out_of_range_window_is_rejected() {
    let field = Grid::from_fn(3, 3, |_, _| false).unwrap();
    assert!(matches!(
      extract(&field, 2, 0, 2, 1),
      Err(GridError::IndexOutOfRange { x: 2, width: 2, .. })
    ));
    assert!(matches!(
      extract(&field, 0, 1, 1, 3),
      Err(GridError::IndexOutOfRange { .. })
    ));
  }

  #[test]
  fn zero_sized_window_is_empty() {
    let field = Grid::from_fn(3, 3, |_, _| false).unwrap();
    assert_eq!(extract(&field, 1, 1, 0, 2), Err(GridError::EmptyGrid));
  }

  #[test]
  fn region_extracts_its_own_rectangle() {
    let field = Grid::from_fn(5, 5, |r, c| r >= 2 && c >= 3).unwrap();
    let region = MatchRegion::new(3, 2, 2, 3);
    assert_eq!(region.extract_from(&field).unwrap().on_count(), 6);
    assert_eq!(region.to_string(), "(3, 2, 2x3)");
  }

  #[test]
  fn comparison_pairs_located_window_with_ideal_pattern() {
    let field = Grid::parse("    \n +  \n ++ \n    ").unwrap();
    let ideal = Grid::parse("+ \n++").unwrap();
    let comparison =
      TargetComparison::new("hook", MatchRegion::new(1, 1, 2, 2), &field, &ideal).unwrap();
    assert_eq!(comparison.located, ideal);
    assert_eq!(comparison.score, 4);
    assert_eq!(comparison.match_ratio(), 1.0);
    assert_eq!(comparison.side_by_side('#'), "#  | # \n## | ##");
  }

  #[test]
  fn comparison_outside_the_field_fails() {
    let field = Grid::from_fn(3, 3, |_, _| false).unwrap();
    let ideal = Grid::from_fn(2, 2, |_, _| true).unwrap();
    let result = TargetComparison::new("x", MatchRegion::new(2, 2, 2, 2), &field, &ideal);
    assert!(matches!(result, Err(GridError::IndexOutOfRange { .. })));
  }
}
