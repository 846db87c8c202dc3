// 该文件是 Bliffoscope 项目的一部分。
// src/output/draw.rs - 定位结果可视化
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

use image::{Rgb, RgbImage};
use imageproc::{
  drawing::{draw_filled_circle_mut, draw_hollow_rect_mut},
  rect::Rect,
};

use crate::{
  canvas::{CanvasMapper, DEFAULT_CELL_PIXELS},
  grid::Grid,
  locator::WeaponLocations,
};

// 图片输出允许的最大单元格像素
pub const MAX_CELL_PIXELS: u32 = 256;
const BOX_THICKNESS: i32 = 3;
const BACKGROUND_COLOR: [u8; 3] = [0, 0, 0];
const DOT_COLOR: [u8; 3] = [0, 160, 0]; // 绿色
// 按武器顺序循环使用：红、黄、青、品红
const WEAPON_COLORS: [[u8; 3]; 4] = [[255, 0, 0], [255, 255, 0], [0, 160, 255], [255, 0, 255]];

pub struct Draw {
  cell_pixels: u32,
  box_padding: f32,
  box_thickness: i32,
  background_color: [u8; 3],
  dot_color: [u8; 3],
  weapon_colors: Vec<[u8; 3]>,
}

impl Default for Draw {
  fn default() -> Self {
    Self {
      cell_pixels: DEFAULT_CELL_PIXELS,
      box_padding: DEFAULT_CELL_PIXELS as f32,
      box_thickness: BOX_THICKNESS,
      background_color: BACKGROUND_COLOR,
      dot_color: DOT_COLOR,
      weapon_colors: WEAPON_COLORS.to_vec(),
    }
  }
}

impl Draw {
  pub fn with_cell_pixels(mut self, cell_pixels: u32) -> Self {
    self.cell_pixels = cell_pixels.max(1);
    self.box_padding = self.cell_pixels as f32;
    self
  }

  pub fn cell_pixels(&self) -> u32 {
    self.cell_pixels
  }

  /// 画布四周各留一个单元格的边距，超出 `u32` 时返回 `None`
  pub fn canvas_size(&self, grid: &Grid) -> Option<(u32, u32)> {
    let side = |cells: usize| {
      u32::try_from(cells)
        .ok()?
        .checked_add(1)?
        .checked_mul(self.cell_pixels)
    };
    Some((side(grid.cols())?, side(grid.rows())?))
  }

  pub fn weapon_color(&self, index: usize) -> [u8; 3] {
    self.weapon_colors[index % self.weapon_colors.len()]
  }

  /// 每个“开”单元格画成一个实心圆点
  pub fn draw_grid(&self, grid: &Grid) -> Option<(RgbImage, CanvasMapper)> {
    let (width, height) = self.canvas_size(grid)?;
    let mut image = RgbImage::from_pixel(width, height, Rgb(self.background_color));
    let mapper = CanvasMapper::new(width, height, grid);
    let radius = ((mapper.x_step().min(mapper.y_step()) / 4.0).round() as i32).max(1);

    for (row, cells) in grid.iter_rows().enumerate() {
      for (col, _) in cells.iter().enumerate().filter(|(_, cell)| **cell) {
        let (cx, cy) = mapper.cell_center(row, col);
        draw_filled_circle_mut(
          &mut image,
          (cx.round() as i32, cy.round() as i32),
          radius,
          Rgb(self.dot_color),
        );
      }
    }

    Some((image, mapper))
  }

  pub fn draw_locations_on_image(
    &self,
    image: &mut RgbImage,
    mapper: &CanvasMapper,
    locations: &WeaponLocations,
  ) {
    for (index, (_, regions)) in locations.iter().enumerate() {
      let color = Rgb(self.weapon_color(index));
      for region in regions {
        let rect = mapper.map_region(region).padded(self.box_padding);
        let x = rect.x.floor() as i32;
        let y = rect.y.floor() as i32;
        let w = rect.w.ceil() as i32;
        let h = rect.h.ceil() as i32;

        // 由外向内画多层边框以加粗
        for t in 0..self.box_thickness {
          let (tw, th) = (w - 2 * t, h - 2 * t);
          if tw <= 0 || th <= 0 {
            break;
          }
          let rect = Rect::at(x + t, y + t).of_size(tw as u32, th as u32);
          draw_hollow_rect_mut(image, rect, color);
        }
      }
    }
  }

  pub fn draw_detection(&self, field: &Grid, locations: &WeaponLocations) -> Option<RgbImage> {
    let (mut image, mapper) = self.draw_grid(field)?;
    self.draw_locations_on_image(&mut image, &mapper, locations);
    Some(image)
  }
}
