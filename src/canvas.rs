// 该文件是 Bliffoscope 项目的一部分。
// src/canvas.rs - 场坐标到画布像素坐标的映射
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

use crate::{grid::Grid, locator::WeaponLocations, region::MatchRegion};

/// 图片输出中每个单元格默认占用的像素
pub const DEFAULT_CELL_PIXELS: u32 = 10;

/// 画布上的矩形，单位为像素
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
  pub x: f32,
  pub y: f32,
  pub w: f32,
  pub h: f32,
}

impl CanvasRect {
  /// 向四周各扩展 `padding` 像素
  pub fn padded(&self, padding: f32) -> Self {
    Self {
      x: self.x - padding,
      y: self.y - padding,
      w: self.w + 2.0 * padding,
      h: self.h + 2.0 * padding,
    }
  }

  /// 点严格位于矩形内部时返回 true，边界不算
  pub fn contains(&self, px: f32, py: f32) -> bool {
    self.x < px && px < self.x + self.w && self.y < py && py < self.y + self.h
  }
}

/// 画布上被点中的命中区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'a> {
  pub weapon: &'a str,
  pub index: usize,
  pub region: MatchRegion,
}

/// 场的每个单元格画在一个网格点上，四周各留一格边距，
/// 因此 `rows x cols` 的场把画布分成 `(rows + 1) x (cols + 1)` 份。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapper {
  x_step: f32,
  y_step: f32,
}

impl CanvasMapper {
  pub fn new(canvas_width: u32, canvas_height: u32, field: &Grid) -> Self {
    Self {
      x_step: canvas_width as f32 / (field.cols() + 1) as f32,
      y_step: canvas_height as f32 / (field.rows() + 1) as f32,
    }
  }

  /// 每个单元格占 `cell_pixels` 像素的画布，与图片输出的画布一致
  pub fn from_cell_pixels(cell_pixels: u32) -> Self {
    Self {
      x_step: cell_pixels as f32,
      y_step: cell_pixels as f32,
    }
  }

  pub fn x_step(&self) -> f32 {
    self.x_step
  }

  pub fn y_step(&self) -> f32 {
    self.y_step
  }

  /// 单元格 (`row`, `col`) 在画布上的中心点
  pub fn cell_center(&self, row: usize, col: usize) -> (f32, f32) {
    (
      (col + 1) as f32 * self.x_step,
      (row + 1) as f32 * self.y_step,
    )
  }

  /// 区域映射为连接其四个角单元格中心的矩形
  pub fn map_region(&self, region: &MatchRegion) -> CanvasRect {
    CanvasRect {
      x: (region.x + 1) as f32 * self.x_step,
      y: (region.y + 1) as f32 * self.y_step,
      w: region.w.saturating_sub(1) as f32 * self.x_step,
      h: region.h.saturating_sub(1) as f32 * self.y_step,
    }
  }

  pub fn map_regions<'a, I>(&self, regions: I) -> Vec<CanvasRect>
  where
    I: IntoIterator<Item = &'a MatchRegion>,
  {
    regions
      .into_iter()
      .map(|region| self.map_region(region))
      .collect()
  }

  /// 找出所有包含像素点 (`px`, `py`) 的命中区域，区域向外扩展 `padding` 像素。
  /// 重叠区域会全部返回，顺序与 `locations` 一致。
  pub fn hit_test<'a>(
    &self,
    locations: &'a WeaponLocations,
    px: f32,
    py: f32,
    padding: f32,
  ) -> Vec<Hit<'a>> {
    locations
      .iter()
      .flat_map(|(weapon, regions)| {
        regions
          .iter()
          .enumerate()
          .filter(move |(_, region)| self.map_region(region).padded(padding).contains(px, py))
          .map(move |(index, region)| Hit {
            weapon,
            index,
            region: *region,
          })
      })
      .collect()
  }
}
