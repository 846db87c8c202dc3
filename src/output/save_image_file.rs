// 该文件是 Bliffoscope 项目的一部分。
// src/output/save_image_file.rs - 保存图像文件
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

use std::path::Path;

use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  grid::Grid,
  locator::WeaponLocations,
  output::{
    Render,
    draw::{Draw, MAX_CELL_PIXELS},
  },
};

pub struct SaveImageFileOutput {
  path: String,
  draw: Draw,
}

#[derive(Error, Debug)]
pub enum SaveImageFileError {
  #[error("I/O 错误: {0}")]
  IoError(std::io::Error),
  #[error("图像错误: {0}")]
  ImageError(image::ImageError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("无效的单元格像素: {0}")]
  InvalidCellPixels(String),
  #[error("画布过大: {cols}x{rows} 个单元格, 每格 {cell} 像素")]
  CanvasTooLarge { cols: usize, rows: usize, cell: u32 },
}

impl FromUrlWithScheme for SaveImageFileOutput {
  const SCHEME: &'static str = "image";
}

impl FromUrl for SaveImageFileOutput {
  type Error = SaveImageFileError;

  /// `image:///path/out.png?cell=12` 中的 `cell` 为每个单元格的像素数
  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(SaveImageFileError::SchemeMismatch(format!(
        "期望保存方式 '{}', 实际保存方式 '{}'",
        Self::SCHEME,
        uri.scheme()
      )));
    }

    let mut draw = Draw::default();
    if let Some((_, value)) = uri.query_pairs().find(|(k, _)| k == "cell") {
      let cell = value
        .parse::<u32>()
        .ok()
        .filter(|cell| (1..=MAX_CELL_PIXELS).contains(cell))
        .ok_or_else(|| SaveImageFileError::InvalidCellPixels(value.to_string()))?;
      draw = draw.with_cell_pixels(cell);
    }

    Ok(SaveImageFileOutput {
      path: uri.path().to_string(),
      draw,
    })
  }
}

impl SaveImageFileOutput {
  pub fn path(&self) -> &str {
    &self.path
  }

  fn save_image(&self, image: image::RgbImage) -> Result<(), SaveImageFileError> {
    if let Some(parent) = Path::new(&self.path).parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent).map_err(SaveImageFileError::IoError)?;
    }

    image
      .save(&self.path)
      .map_err(SaveImageFileError::ImageError)?;

    warn!("保存图像到文件: {}", self.path);

    Ok(())
  }
}

impl Render<Grid, WeaponLocations> for SaveImageFileOutput {
  type Error = SaveImageFileError;

  fn render_result(&self, field: &Grid, result: &WeaponLocations) -> Result<(), Self::Error> {
    let image = self.draw.draw_detection(field, result).ok_or_else(|| {
      SaveImageFileError::CanvasTooLarge {
        cols: field.cols(),
        rows: field.rows(),
        cell: self.draw.cell_pixels(),
      }
    })?;
    self.save_image(image)
  }
}
