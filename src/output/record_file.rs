// 该文件是 Bliffoscope 项目的一部分。
// src/output/record_file.rs - 记录定位结果到 JSON 文件
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

use std::path::PathBuf;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme, grid::Grid, locator::WeaponLocations, output::Render,
};

#[derive(Error, Debug)]
pub enum RecordFileError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("JSON 错误: {0}")]
  JsonError(#[from] serde_json::Error),
}

/// 形如 `record:///path/out.json`
pub struct RecordFileOutput {
  path: PathBuf,
}

impl FromUrlWithScheme for RecordFileOutput {
  const SCHEME: &'static str = "record";
}

impl FromUrl for RecordFileOutput {
  type Error = RecordFileError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(RecordFileError::SchemeMismatch);
    }

    Ok(RecordFileOutput {
      path: PathBuf::from(uri.path()),
    })
  }
}

/// 武器按扫描顺序排列成数组，保证读取方看到的顺序与定位结果一致
pub fn to_record(field: &Grid, result: &WeaponLocations) -> Value {
  let weapons: Vec<Value> = result
    .iter()
    .map(|(name, regions)| {
      let regions: Vec<Value> = regions
        .iter()
        .map(|r| json!({ "x": r.x, "y": r.y, "w": r.w, "h": r.h }))
        .collect();
      json!({ "name": name, "regions": regions })
    })
    .collect();

  json!({
    "field": { "rows": field.rows(), "cols": field.cols() },
    "total": result.total(),
    "weapons": weapons,
  })
}

impl Render<Grid, WeaponLocations> for RecordFileOutput {
  type Error = RecordFileError;

  fn render_result(&self, field: &Grid, result: &WeaponLocations) -> Result<(), Self::Error> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let record = to_record(field, result);
    std::fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
    warn!("保存记录到文件: {}", self.path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::region::MatchRegion;

  #[test]
  fn record_keeps_weapon_order_and_geometry() {
    let field = Grid::from_fn(6, 7, |_, _| false).unwrap();
    let locations: WeaponLocations = [
      ("torpedo".to_string(), vec![MatchRegion::new(1, 0, 2, 3)]),
      ("starship".to_string(), vec![]),
    ]
    .into_iter()
    .collect();

    let record = to_record(&field, &locations);
    assert_eq!(record["field"]["rows"], 6);
    assert_eq!(record["field"]["cols"], 7);
    assert_eq!(record["total"], 1);
    assert_eq!(record["weapons"][0]["name"], "torpedo");
    assert_eq!(
      record["weapons"][0]["regions"][0],
      json!({ "x": 1, "y": 0, "w": 2, "h": 3 })
    );
    assert_eq!(record["weapons"][1]["name"], "starship");
    assert_eq!(record["weapons"][1]["regions"], json!([]));
  }
}
