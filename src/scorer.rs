// 该文件是 Bliffoscope 项目的一部分。
// src/scorer.rs - 模式与窗口的匹配得分
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

use crate::grid::{Grid, GridError};

/// 模式全部单元格都匹配时的得分
pub fn max_score(pattern: &Grid) -> usize {
  pattern.rows() * pattern.cols()
}

/// 将模式左上角放在场的 (`origin_row`, `origin_col`) 处，
/// 统计两者取值相同（同开或同关）的单元格数量。
pub fn score(
  pattern: &Grid,
  field: &Grid,
  origin_row: usize,
  origin_col: usize,
) -> Result<usize, GridError> {
  if !fits(pattern, field, origin_row, origin_col) {
    return Err(GridError::IndexOutOfRange {
      x: origin_col,
      y: origin_row,
      width: pattern.cols(),
      height: pattern.rows(),
      cols: field.cols(),
      rows: field.rows(),
    });
  }

  Ok(score_unchecked(pattern, field, origin_row, origin_col))
}

pub(crate) fn fits(pattern: &Grid, field: &Grid, origin_row: usize, origin_col: usize) -> bool {
  origin_row
    .checked_add(pattern.rows())
    .is_some_and(|end| end <= field.rows())
    && origin_col
      .checked_add(pattern.cols())
      .is_some_and(|end| end <= field.cols())
}

// 调用方保证模式在该原点处完整落在场内
pub(crate) fn score_unchecked(
  pattern: &Grid,
  field: &Grid,
  origin_row: usize,
  origin_col: usize,
) -> usize {
  let window = origin_col..origin_col + pattern.cols();
  pattern
    .iter_rows()
    .enumerate()
    .map(|(i, pattern_row)| {
      let field_row = &field.row(origin_row + i)[window.clone()];
      pattern_row
        .iter()
        .zip(field_row)
        .filter(|(p, f)| p == f)
        .count()
    })
    .sum()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn grid(text: &str) -> Grid {
    Grid::parse(text).unwrap()
  }

  #[test]
  fn off_cells_count_as_matches_too() {
    let pattern = grid("+ \n +");
    let field = grid("+  \n   \n   ");
    // (0,0) 与 (0,1)、(1,0) 匹配，(1,1) 不匹配
    assert_eq!(score(&pattern, &field, 0, 0), Ok(3));
    assert_eq!(score(&pattern, &field, 1, 1), Ok(2));
  }

  #[test]
  fn identical_window_scores_the_maximum() {
    let pattern = grid("++ \n + \n+ +");
    let field = grid("     \n ++  \n  +  \n + + ");
    assert_eq!(max_score(&pattern), 9);
    assert_eq!(score(&pattern, &field, 1, 1), Ok(9));
  }

  #[test]
  fn score_stays_within_bounds() {
    let pattern = grid("+ +\n + \n+++");
    let field = Grid::from_fn(9, 11, |r, c| (r * 31 + c * 17) % 5 < 2).unwrap();
    for row in 0..=field.rows() - pattern.rows() {
      for col in 0..=field.cols() - pattern.cols() {
        let value = score(&pattern, &field, row, col).unwrap();
        assert!(value <= max_score(&pattern));
      }
    }
  }

  #[test]
  fn window_outside_the_field_is_rejected() {
    let pattern = grid("++\n++");
    let field = grid("+++\n+++\n+++");
    assert!(score(&pattern, &field, 1, 1).is_ok());
    assert_eq!(
      score(&pattern, &field, 2, 0),
      Err(GridError::IndexOutOfRange {
        x: 0,
        y: 2,
        width: 2,
        height: 2,
        cols: 3,
        rows: 3,
      })
    );
    assert!(score(&pattern, &field, 0, usize::MAX).is_err());
  }
}
