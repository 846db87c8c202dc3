// 该文件是 Bliffoscope 项目的一部分。
// src/weapons.rs - 随附的 Bliffoscope 样例数据
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

use crate::{
  grid::{Grid, GridError},
  locator::Weapons,
};

pub const SAMPLE_FIELD: &str = include_str!("../assets/field.txt");
pub const TORPEDO: &str = include_str!("../assets/torpedo.txt");
pub const STARSHIP: &str = include_str!("../assets/starship.txt");

/// 样例名称与文本，武器按此顺序扫描
pub const SAMPLE_WEAPONS: [(&str, &str); 2] = [("torpedo", TORPEDO), ("starship", STARSHIP)];

pub fn sample_text(name: &str) -> Option<&'static str> {
  match name {
    "field" => Some(SAMPLE_FIELD),
    _ => SAMPLE_WEAPONS
      .iter()
      .find(|(weapon, _)| *weapon == name)
      .map(|(_, text)| *text),
  }
}

pub fn sample_field() -> Result<Grid, GridError> {
  Grid::parse(SAMPLE_FIELD)
}

pub fn sample_weapons() -> Result<Weapons, GridError> {
  SAMPLE_WEAPONS
    .iter()
    .map(|(name, text)| Grid::parse(text).map(|grid| (name.to_string(), grid)))
    .collect()
}
