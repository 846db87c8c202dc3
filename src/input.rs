// 该文件是 Bliffoscope 项目的一部分。
// src/input.rs - 网格输入
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

use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  grid::{Grid, GridError},
  weapons::sample_text,
};

#[derive(Error, Debug)]
pub enum InputError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
  #[error("未知的样例数据: {0}")]
  UnknownSample(String),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("网格错误: {0}")]
  GridError(#[from] GridError),
}

/// 从文本文件读取网格，形如 `grid:///path/to/field.txt`
pub struct GridFileInput {
  path: PathBuf,
}

impl FromUrlWithScheme for GridFileInput {
  const SCHEME: &'static str = "grid";
}

impl FromUrl for GridFileInput {
  type Error = InputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(InputError::SchemeMismatch(url.scheme().to_string()));
    }

    Ok(GridFileInput {
      path: PathBuf::from(url.path()),
    })
  }
}

impl GridFileInput {
  pub fn read_grid(&self) -> Result<Grid, InputError> {
    debug!("读取网格文件: {}", self.path.display());
    let bytes = std::fs::read(&self.path)?;
    Ok(Grid::parse_bytes(&strip_crlf(&bytes))?)
  }
}

/// CRLF 换行中的 '\r' 不属于任何单元格，其余 '\r' 保持原样
fn strip_crlf(bytes: &[u8]) -> Vec<u8> {
  bytes
    .iter()
    .enumerate()
    .filter(|&(i, &b)| !(b == b'\r' && bytes.get(i + 1) == Some(&b'\n')))
    .map(|(_, &b)| b)
    .collect()
}

/// 随附的样例数据，形如 `sample:field`、`sample:torpedo`
pub struct SampleInput {
  name: String,
  text: &'static str,
}

impl FromUrlWithScheme for SampleInput {
  const SCHEME: &'static str = "sample";
}

impl FromUrl for SampleInput {
  type Error = InputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(InputError::SchemeMismatch(url.scheme().to_string()));
    }

    let name = url.path().trim_matches('/').to_string();
    let text = sample_text(&name).ok_or_else(|| InputError::UnknownSample(name.clone()))?;
    Ok(SampleInput { name, text })
  }
}

impl SampleInput {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn read_grid(&self) -> Result<Grid, InputError> {
    Ok(Grid::parse(self.text)?)
  }
}

pub enum InputWrapper {
  GridFile(GridFileInput),
  Sample(SampleInput),
}

impl FromUrl for InputWrapper {
  type Error = InputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    match url.scheme() {
      GridFileInput::SCHEME => Ok(InputWrapper::GridFile(GridFileInput::from_url(url)?)),
      SampleInput::SCHEME => Ok(InputWrapper::Sample(SampleInput::from_url(url)?)),
      other => Err(InputError::SchemeMismatch(other.to_string())),
    }
  }
}

impl InputWrapper {
  pub fn read_grid(&self) -> Result<Grid, InputError> {
    match self {
      InputWrapper::GridFile(input) => input.read_grid(),
      InputWrapper::Sample(input) => input.read_grid(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
  }

  #[test]
  fn sample_scheme_resolves_bundled_data() {
    let torpedo = InputWrapper::from_url(&url("sample:torpedo"))
      .unwrap()
      .read_grid()
      .unwrap();
    assert_eq!((torpedo.rows(), torpedo.cols()), (11, 9));
  }

  #[test]
  fn unknown_sample_is_an_error() {
    let err = SampleInput::from_url(&url("sample:cruiser")).err().unwrap();
    assert!(matches!(err, InputError::UnknownSample(name) if name == "cruiser"));
  }

  #[test]
  fn unsupported_scheme_is_rejected() {
    let err = InputWrapper::from_url(&url("http://example.com/field.txt"))
      .err()
      .unwrap();
    assert!(matches!(err, InputError::SchemeMismatch(scheme) if scheme == "http"));
  }

  #[test]
  fn crlf_line_endings_are_not_cells() {
    assert_eq!(strip_crlf(b"+ \r\n +\r\n"), b"+ \n +\n");
    assert_eq!(strip_crlf(b"+\r+\n"), b"+\r+\n");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crlf.txt");
    std::fs::write(&path, "+  \r\n ++\r\n").unwrap();
    let grid = GridFileInput::from_url(&url(&format!("grid://{}", path.display())))
      .unwrap()
      .read_grid()
      .unwrap();
    assert_eq!(grid, Grid::parse("+  \n ++").unwrap());
  }

  #[test]
  fn missing_grid_file_is_an_io_error() {
    let input = GridFileInput::from_url(&url("grid:///definitely/not/here.txt")).unwrap();
    assert!(matches!(input.read_grid(), Err(InputError::IoError(_))));
  }
}
