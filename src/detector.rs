// 该文件是 Bliffoscope 项目的一部分。
// src/detector.rs - 检测器定义
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

use std::convert::Infallible;

use crate::{
  grid::Grid,
  locator::{WeaponLocations, WeaponLocator, Weapons},
};

pub trait Detector {
  type Input;
  type Output;
  type Error;

  fn detect(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

impl<T: Detector> Detector for &T {
  type Input = T::Input;
  type Output = T::Output;
  type Error = T::Error;

  fn detect(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
    (**self).detect(input)
  }
}

/// 一组武器模式及扫描它们所用的定位器
#[derive(Debug, Clone)]
pub struct Scan {
  locator: WeaponLocator,
  weapons: Weapons,
}

impl Scan {
  pub fn new(locator: WeaponLocator, weapons: Weapons) -> Self {
    Self { locator, weapons }
  }

  pub fn locator(&self) -> &WeaponLocator {
    &self.locator
  }

  pub fn weapons(&self) -> &Weapons {
    &self.weapons
  }
}

impl Detector for Scan {
  type Input = Grid;
  type Output = WeaponLocations;
  type Error = Infallible;

  fn detect(&self, field: &Grid) -> Result<WeaponLocations, Infallible> {
    Ok(self.locator.locate(&self.weapons, field))
  }
}
