//! # Configuration Module / 配置模块
//!
//! This module loads the two inputs the runner consumes: the runner
//! configuration (`SampleRunner.toml`, global settings, stream table and
//! tool overrides) and the JSON test specifications describing the case
//! matrices.
//!
//! 此模块加载运行器消费的两种输入：运行器配置
//! （`SampleRunner.toml`，全局设置、流表和工具覆盖）
//! 以及描述用例矩阵的 JSON 测试规格。

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::models::TestType;
use crate::core::objects::{Stream, ValidationError};
use crate::infra::t;

/// A stream entry from the `[streams]` table.
/// `[streams]` 表中的一个流条目。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Path relative to the streams folder (or absolute).
    /// 相对于流文件夹的路径（或绝对路径）。
    pub path: PathBuf,
    /// Elementary-stream codec name; omit for raw streams.
    /// 基本流的编解码器名称；原始流省略。
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Per-tool overrides from the `[tools]` table.
/// `[tools]` 表中的每工具覆盖。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Overrides the default tool binary name / 覆盖默认的工具二进制名称
    #[serde(default)]
    pub binary: Option<String>,
    /// Extra arguments appended to every invocation, shell-style quoted.
    /// 附加到每次调用的额外参数，shell 风格引用。
    #[serde(default)]
    pub extra_args: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub decode: ToolConfig,
    #[serde(default)]
    pub encode: ToolConfig,
    #[serde(default)]
    pub transcode: ToolConfig,
    #[serde(default)]
    pub vpp: ToolConfig,
}

impl ToolsConfig {
    pub fn for_type(&self, test_type: TestType) -> &ToolConfig {
        match test_type {
            TestType::Decode => &self.decode,
            TestType::Encode => &self.encode,
            TestType::Transcode => &self.transcode,
            TestType::Vpp => &self.vpp,
        }
    }
}

/// The runner configuration, loaded from a TOML file.
/// It contains global settings, the named-stream table and per-tool
/// overrides.
///
/// 运行器配置，从 TOML 文件加载。
/// 它包含全局设置、命名流表和每工具覆盖。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// Folder holding the sample tool binaries; prepended to `PATH` for
    /// every tool invocation. Tilde-expanded.
    ///
    /// 存放示例工具二进制文件的文件夹；每次工具调用时置于 `PATH` 之前。
    /// 支持波浪号展开。
    pub samples_folder: String,

    /// Folder holding input streams; stream paths resolve against it.
    /// Relative values resolve against the test base directory.
    ///
    /// 存放输入流的文件夹；流路径相对于它解析。
    /// 相对值相对于测试基目录解析。
    #[serde(default)]
    pub streams_folder: Option<String>,

    /// Optional folder searched for par files after the base directory.
    /// 可选文件夹，在基目录之后搜索 par 文件。
    #[serde(default)]
    pub par_folder: Option<String>,

    /// Timeout for a single tool invocation; a timed-out tool counts as a
    /// failed case. No timeout when unset.
    ///
    /// 单次工具调用的超时；超时的工具计为失败用例。未设置时无超时。
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Environment description recorded in every case-log header.
    /// 记录在每个用例日志头中的环境描述。
    #[serde(default)]
    pub environment: IndexMap<String, String>,

    /// The named-stream table / 命名流表
    #[serde(default)]
    pub streams: IndexMap<String, StreamConfig>,

    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            samples_folder: "samples".to_string(),
            streams_folder: None,
            par_folder: None,
            timeout_secs: None,
            environment: IndexMap::new(),
            streams: IndexMap::new(),
            tools: ToolsConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Loads and parses a runner configuration file.
    /// 加载并解析运行器配置文件。
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| t!("config.read_failed", path = path.display()).to_string())?;
        let cfg: RunnerConfig = toml::from_str(&content)
            .with_context(|| t!("config.parse_failed", path = path.display()).to_string())?;
        Ok(cfg)
    }

    /// The samples folder with the tilde expanded.
    pub fn samples_dir(&self) -> PathBuf {
        expand(&self.samples_folder)
    }

    /// The streams folder, resolved against the test base directory.
    /// 流文件夹，相对于测试基目录解析。
    pub fn streams_dir(&self, base_dir: &Path) -> PathBuf {
        match &self.streams_folder {
            Some(folder) => {
                let expanded = expand(folder);
                if expanded.is_absolute() {
                    expanded
                } else {
                    base_dir.join(expanded)
                }
            }
            None => base_dir.to_path_buf(),
        }
    }

    /// The par-file fallback folder, when configured.
    pub fn par_dir(&self, base_dir: &Path) -> Option<PathBuf> {
        self.par_folder.as_ref().map(|folder| {
            let expanded = expand(folder);
            if expanded.is_absolute() {
                expanded
            } else {
                base_dir.join(expanded)
            }
        })
    }

    /// The binary name used to invoke the tool for a test type.
    /// 用于调用某测试类型工具的二进制名称。
    pub fn tool_binary(&self, test_type: TestType) -> String {
        self.tools
            .for_type(test_type)
            .binary
            .clone()
            .unwrap_or_else(|| test_type.tool_name().to_string())
    }

    /// Extra arguments for a test type, split shell-style.
    /// 某测试类型的额外参数，按 shell 风格拆分。
    pub fn extra_args(&self, test_type: TestType) -> Result<Vec<String>> {
        match &self.tools.for_type(test_type).extra_args {
            Some(raw) => shlex::split(raw).with_context(|| {
                t!("config.bad_extra_args", tool = test_type.tool_name()).to_string()
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Resolves a stream identifier from the `[streams]` table.
    /// Unknown names fail the case generation that asked for them.
    ///
    /// 从 `[streams]` 表解析流标识符。
    /// 未知名称会使请求它们的用例生成失败。
    pub fn stream_by_name(&self, name: &str, base_dir: &Path) -> Result<Stream, ValidationError> {
        let entry = self
            .streams
            .get(name)
            .ok_or_else(|| ValidationError::UnknownStream(name.to_string()))?;

        let codec = match &entry.codec {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };
        let path = if entry.path.is_absolute() {
            entry.path.clone()
        } else {
            self.streams_dir(base_dir).join(&entry.path)
        };

        Ok(Stream {
            name: name.to_string(),
            path,
            codec,
            width: entry.width,
            height: entry.height,
        })
    }
}

fn expand(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// A parsed test specification: the test type plus the ordered field map
/// that forms the case matrix. Field order is the JSON declaration order.
///
/// 解析后的测试规格：测试类型加上构成用例矩阵的有序字段映射。
/// 字段顺序即 JSON 声明顺序。
#[derive(Debug, Clone)]
pub struct TestSpec {
    pub test_type: TestType,
    fields: IndexMap<String, Value>,
}

impl TestSpec {
    /// Builds a specification from an already-parsed JSON object, extracting
    /// and validating the `type` field.
    ///
    /// 从已解析的 JSON 对象构建规格，提取并验证 `type` 字段。
    pub fn from_fields(mut fields: IndexMap<String, Value>) -> Result<Self, ValidationError> {
        let type_value = fields
            .shift_remove("type")
            .ok_or(ValidationError::MissingTestType)?;
        let type_name = type_value
            .as_str()
            .ok_or_else(|| ValidationError::UnknownTestType(type_value.to_string()))?;
        Ok(Self {
            test_type: type_name.parse()?,
            fields,
        })
    }

    /// Parses a specification from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let raw: IndexMap<String, Value> =
            serde_json::from_str(text).context(t!("spec.parse_failed").to_string())?;
        Ok(Self::from_fields(raw)?)
    }

    /// Loads a specification from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| t!("spec.read_failed", path = path.display()).to_string())?;
        let raw: IndexMap<String, Value> = serde_json::from_str(&text)
            .with_context(|| t!("spec.parse_failed_path", path = path.display()).to_string())?;
        Ok(Self::from_fields(raw)?)
    }

    /// The case-matrix fields in declaration order, `type` excluded.
    /// 按声明顺序的用例矩阵字段，不含 `type`。
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}
