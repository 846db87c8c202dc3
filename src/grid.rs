// 该文件是 Bliffoscope 项目的一部分。
// src/grid.rs - 二值网格定义与文本解析
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

use std::{fmt, str::FromStr};

use thiserror::Error;

/// 文本中表示“关”的字符，其余任何字符均表示“开”
pub const OFF_GLYPH: char = ' ';
/// 渲染时默认使用的“开”字符，与随附数据一致
pub const ON_GLYPH: char = '+';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
  #[error("输入不是文本: {0}")]
  InvalidInputType(String),
  #[error("网格不是矩形: 第 {row} 行长度为 {found}, 期望 {expected}")]
  MalformedGrid {
    row: usize,
    expected: usize,
    found: usize,
  },
  #[error("网格为空")]
  EmptyGrid,
  #[error(
    "区域越界: ({x}, {y}) 处 {width}x{height} 的区域超出 {cols}x{rows} 的网格"
  )]
  IndexOutOfRange {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    cols: usize,
    rows: usize,
  },
}

/// 不可变的二维二值网格，按行优先存储。
///
/// 只能通过校验过的构造函数创建，因此 `rows >= 1`、`cols >= 1`，
/// 且每一行的长度都等于 `cols`。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
  rows: usize,
  cols: usize,
  cells: Box<[bool]>,
}

impl Grid {
  /// 将文本块解析为网格：每行文本为一行，空格为关，其余字符为开。
  ///
  /// 结尾的单个换行符只结束最后一行，不会额外产生空行。
  /// 只按 '\n' 分行，'\r' 也是开单元格；CRLF 文件经 `grid:` 输入读取时会先去掉 '\r'。
  pub fn parse(text: &str) -> Result<Self, GridError> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let rows: Vec<Vec<bool>> = body
      .split('\n')
      .map(|line| line.chars().map(|c| c != OFF_GLYPH).collect())
      .collect();
    Self::from_rows(rows)
  }

  /// 从原始字节解析网格，非 UTF-8 输入视为非文本
  pub fn parse_bytes(bytes: &[u8]) -> Result<Self, GridError> {
    let text =
      std::str::from_utf8(bytes).map_err(|e| GridError::InvalidInputType(e.to_string()))?;
    Self::parse(text)
  }

  pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
    let cols = rows.first().map(Vec::len).unwrap_or(0);
    if rows.is_empty() || cols == 0 {
      return Err(GridError::EmptyGrid);
    }

    let mut cells = Vec::with_capacity(rows.len() * cols);
    for (index, row) in rows.iter().enumerate() {
      if row.len() != cols {
        return Err(GridError::MalformedGrid {
          row: index,
          expected: cols,
          found: row.len(),
        });
      }
      cells.extend_from_slice(row);
    }

    Ok(Self {
      rows: rows.len(),
      cols,
      cells: cells.into_boxed_slice(),
    })
  }

  /// 按 `f(row, col)` 生成每个单元格
  pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self, GridError>
  where
    F: FnMut(usize, usize) -> bool,
  {
    if rows == 0 || cols == 0 {
      return Err(GridError::EmptyGrid);
    }

    let cells = (0..rows)
      .flat_map(|r| (0..cols).map(move |c| (r, c)))
      .map(|(r, c)| f(r, c))
      .collect::<Vec<_>>();

    Ok(Self {
      rows,
      cols,
      cells: cells.into_boxed_slice(),
    })
  }

  pub fn rows(&self) -> usize {
    self.rows
  }

  pub fn cols(&self) -> usize {
    self.cols
  }

  pub fn get(&self, row: usize, col: usize) -> Option<bool> {
    if row < self.rows && col < self.cols {
      Some(self.cells[row * self.cols + col])
    } else {
      None
    }
  }

  /// 第 `row` 行的所有单元格，`row` 越界时 panic
  pub fn row(&self, row: usize) -> &[bool] {
    let start = row * self.cols;
    &self.cells[start..start + self.cols]
  }

  pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
    self.cells.chunks_exact(self.cols)
  }

  /// “开”单元格的数量
  pub fn on_count(&self) -> usize {
    self.cells.iter().filter(|&&cell| cell).count()
  }

  pub fn render(&self, on: char) -> String {
    self
      .iter_rows()
      .map(|row| {
        row
          .iter()
          .map(|&cell| if cell { on } else { OFF_GLYPH })
          .collect::<String>()
      })
      .collect::<Vec<_>>()
      .join("\n")
  }
}

impl FromStr for Grid {
  type Err = GridError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for Grid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.render(ON_GLYPH))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_maps_space_to_off_and_anything_else_to_on() {
    let grid = Grid::parse(" +\n#.").unwrap();
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), 2);
    assert_eq!(grid.row(0), &[false, true]);
    assert_eq!(grid.row(1), &[true, true]);
    assert_eq!(grid.on_count(), 3);
  }

  #[test]
  fn trailing_newline_does_not_add_a_row() {
    let grid = Grid::parse("++\n  \n").unwrap();
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid, Grid::parse("++\n  ").unwrap());
  }

  #[test]
  fn blank_rows_are_kept_as_off_cells() {
    let grid = Grid::parse("   \n + \n   ").unwrap();
    assert_eq!(grid.rows(), 3);
    assert_eq!(grid.on_count(), 1);
    assert_eq!(grid.get(1, 1), Some(true));
  }

  #[test]
  fn ragged_rows_are_rejected() {
    let err = Grid::parse("+++\n++\n+++").unwrap_err();
    assert_eq!(
      err,
      GridError::MalformedGrid {
        row: 1,
        expected: 3,
        found: 2
      }
    );
  }

  #[test]
  fn double_trailing_newline_is_malformed() {
    let err = Grid::parse("++\n++\n\n").unwrap_err();
    assert!(matches!(err, GridError::MalformedGrid { row: 2, .. }));
  }

  #[test]
  fn empty_text_is_rejected() {
    assert_eq!(Grid::parse(""), Err(GridError::EmptyGrid));
    assert_eq!(Grid::parse("\n"), Err(GridError::EmptyGrid));
    assert_eq!(Grid::from_fn(0, 3, |_, _| true), Err(GridError::EmptyGrid));
  }

  #[test]
  fn non_utf8_bytes_are_not_text() {
    let err = Grid::parse_bytes(&[b'+', 0xff, b'\n']).unwrap_err();
    assert!(matches!(err, GridError::InvalidInputType(_)));
    assert_eq!(Grid::parse_bytes(b"+ +").unwrap().cols(), 3);
  }

  #[test]
  fn render_then_parse_round_trips() {
    let grid = Grid::from_fn(5, 7, |r, c| (r * 7 + c) % 3 == 0).unwrap();
    assert_eq!(Grid::parse(&grid.render('#')).unwrap(), grid);
    assert_eq!(grid.to_string().parse::<Grid>().unwrap(), grid);
  }

  #[test]
  fn leading_blank_row_survives_round_trip() {
    let grid = Grid::from_fn(3, 2, |r, _| r == 2).unwrap();
    assert_eq!(grid.render('+'), "  \n  \n++");
    assert_eq!(Grid::parse(&grid.render('+')).unwrap(), grid);
  }

  #[test]
  fn get_outside_the_grid_is_none() {
    let grid = Grid::from_fn(2, 2, |_, _| true).unwrap();
    assert_eq!(grid.get(1, 1), Some(true));
    assert_eq!(grid.get(2, 0), None);
    assert_eq!(grid.get(0, 2), None);
  }
}
