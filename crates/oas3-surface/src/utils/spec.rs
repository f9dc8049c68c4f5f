use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use oas3::{OpenApiV3Spec, Spec};

/// Encoding of a document on disk, decided by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
      Self::Yaml
    } else {
      Self::Json
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// A memory-mapped document, decoded on demand.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self {
      file,
      format: SpecFormat::from_path(path),
    })
  }

  #[must_use]
  pub fn format(&self) -> SpecFormat {
    self.format
  }

  /// Size of the mapped document in bytes.
  #[must_use]
  pub fn len(&self) -> usize {
    self.file.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.file.is_empty()
  }

  pub fn parse(&self) -> anyhow::Result<Spec> {
    let bytes = self.file.as_slice();
    let spec = match self.format {
      SpecFormat::Json => serde_json::from_slice::<OpenApiV3Spec>(bytes).map_err(anyhow::Error::from),
      SpecFormat::Yaml => std::str::from_utf8(bytes)
        .map_err(anyhow::Error::from)
        .and_then(|content| oas3::from_yaml(content).map_err(anyhow::Error::from)),
    };
    spec.with_context(|| format!("failed to parse {} as {}", self.file.path().display(), self.format))
  }
}
