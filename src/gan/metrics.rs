/*
 * @Date         : 2026-10-05
 * @Description  : 训练指标及其报告
 */

use std::collections::BTreeMap;
use std::io::Write;

/// 指标名 → 数值，按名称排序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics(BTreeMap<String, f32>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f32) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.0.get(name).copied()
    }

    /// 合并另一组指标，同名的以`other`为准
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// 格式化为一行：`{step}: name value name value ...`，数值保留两位小数
    pub fn format_line(&self, step: u64) -> String {
        let mut line = format!("{step}:");
        for (name, value) in self.iter() {
            line.push_str(&format!(" {name} {value:.2}"));
        }
        line
    }
}

/// 指标报告者。报告失败只记日志，不会中断训练
pub trait MetricsReporter {
    fn report(&mut self, step: u64, metrics: &Metrics) -> std::io::Result<()>;
}

/// 把指标逐行写到输出流（默认标准输出）
pub struct PrintReporter {
    out: Box<dyn Write>,
}

impl Default for PrintReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintReporter {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write>) -> Self {
        Self { out }
    }
}

impl MetricsReporter for PrintReporter {
    fn report(&mut self, step: u64, metrics: &Metrics) -> std::io::Result<()> {
        let line = metrics.format_line(step);
        log::info!("{line}");
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}
