// 该文件是 Bliffoscope 项目的一部分。
// src/task.rs - 定位任务
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

use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::{detector::Detector, output::Render};

pub trait Task<I, M, O>: Sized {
  type Output;
  type Error;
  fn run_task(self, input: I, model: M, output: O) -> Result<Self::Output, Self::Error>;
}

/// 对每个输入场各检测一次，返回每个场及其结果
pub struct OneShotTask;

impl<
  F,
  D,
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = F>,
  M: Detector<Input = F, Output = D, Error = ME>,
  O: Render<F, D, Error = RE>,
> Task<I, M, O> for OneShotTask
{
  type Output = Vec<(F, D)>;
  type Error = anyhow::Error;

  fn run_task(self, input: I, model: M, output: O) -> Result<Self::Output, Self::Error> {
    info!("开始任务...");
    let mut results = Vec::new();
    for (index, frame) in input.enumerate() {
      info!("第 {} 个场获取成功，开始定位...", index + 1);
      let now = Instant::now();
      let result = model.detect(&frame)?;
      let elapsed = now.elapsed();
      info!("定位完成，耗时: {:.2?}", elapsed);
      output.render_result(&frame, &result)?;
      info!("渲染完成，耗时: {:.2?}", now.elapsed());
      results.push((frame, result));
    }

    if results.is_empty() {
      return Err(anyhow::anyhow!("没有输入场"));
    }

    info!("任务完成，共处理 {} 个场", results.len());
    Ok(results)
  }
}

/// 对第一个输入场重复定位，统计平均耗时，前两次作为预热不计入
pub struct RepeatShotTask {
  repeat_times: usize,
}

pub const DEFAULT_REPEAT_TIMES: usize = 1000;
const WARMUP_TIMES: usize = 2;

impl Default for RepeatShotTask {
  fn default() -> Self {
    Self {
      repeat_times: DEFAULT_REPEAT_TIMES,
    }
  }
}

impl RepeatShotTask {
  pub fn with_repeat_times(mut self, repeat_times: usize) -> Self {
    self.repeat_times = repeat_times.max(WARMUP_TIMES + 1);
    self
  }
}

/// 重复定位的统计结果
#[derive(Debug, Clone)]
pub struct RepeatShotReport<D> {
  pub result: D,
  pub times: Vec<Duration>,
}

impl<D> RepeatShotReport<D> {
  /// 不计预热的平均耗时；次数不超过预热次数时取全部，没有记录时为零
  pub fn average(&self) -> Duration {
    let measured = match self.times.get(WARMUP_TIMES..) {
      Some(rest) if !rest.is_empty() => rest,
      _ => &self.times[..],
    };
    if measured.is_empty() {
      return Duration::ZERO;
    }
    measured.iter().sum::<Duration>() / measured.len() as u32
  }
}

impl<
  F,
  D,
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = F>,
  M: Detector<Input = F, Output = D, Error = ME>,
  O: Render<F, D, Error = RE>,
> Task<I, M, O> for RepeatShotTask
{
  type Output = RepeatShotReport<D>;
  type Error = anyhow::Error;

  fn run_task(self, mut input: I, model: M, output: O) -> Result<Self::Output, Self::Error> {
    info!("开始任务...");
    let frame = input.next().ok_or_else(|| anyhow::anyhow!("没有输入场"))?;
    info!("输入场获取成功，开始定位...");

    let mut times = Vec::with_capacity(self.repeat_times);
    let mut last = None;
    for i in 0..self.repeat_times {
      let now = Instant::now();
      let result = model.detect(&frame)?;
      let elapsed = now.elapsed();
      info!("({})定位完成，耗时: {:.2?}", i, elapsed);
      times.push(elapsed);
      last = Some(result);
    }

    let result = last.ok_or_else(|| anyhow::anyhow!("没有定位结果"))?;
    output.render_result(&frame, &result)?;

    let report = RepeatShotReport { result, times };
    warn!("平均定位时间: {:.2?}", report.average());
    Ok(report)
  }
}
