// 该文件是 Bliffoscope 项目的一部分。
// src/lib.rs - 库主文件
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

//! 在带噪声的 Bliffoscope 反中微子扫描数据中定位鱼雷与星舰。
//!
//! 文本块经 [`Grid::parse`] 解析为二值网格，[`WeaponLocator`] 将每种武器模式
//! 滑过整个场，得分严格超过 `阈值比例 * 最大得分` 的窗口记为一个
//! [`MatchRegion`]。

pub mod canvas;
pub mod detector;
pub mod grid;
pub mod input;
pub mod locator;
pub mod output;
pub mod region;
pub mod scorer;
pub mod task;
pub mod weapons;

pub use self::{
  canvas::{CanvasMapper, CanvasRect},
  grid::{Grid, GridError},
  locator::{
    DEFAULT_THRESHOLD_FRACTION, WeaponLocations, WeaponLocator, Weapons, parse_threshold_fraction,
  },
  region::{MatchRegion, extract},
  scorer::{max_score, score},
};

pub trait FromUrl {
  type Error;
  fn from_url(url: &url::Url) -> Result<Self, Self::Error>
  where
    Self: Sized;
}

pub trait FromUrlWithScheme: FromUrl {
  const SCHEME: &'static str;
}
