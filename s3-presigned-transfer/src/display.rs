/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::io::ProgressListener;

/// Number of URL characters shown when not in verbose mode
pub const URL_DISPLAY_LEN: usize = 50;

/// Options controlling how much detail is printed to the console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Print full URLs and extra diagnostics
    pub verbose: bool,
}

impl DisplayOptions {
    /// Create display options
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

/// Binary byte units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteUnit {
    /// 1 byte
    Byte,
    /// 2<sup>10</sup> bytes.
    Kibibyte,
    /// 2<sup>20</sup> bytes.
    Mebibyte,
    /// 2<sup>30</sup> bytes.
    Gibibyte,
    /// 2<sup>40</sup> bytes.
    Tebibyte,
}

impl ByteUnit {
    /// Convert some number of bytes into this unit as an `f64`
    pub fn convert(&self, bytes: u64) -> f64 {
        bytes as f64 / self.as_bytes_u64() as f64
    }

    /// Figure out the best unit to display the given number of bytes in
    /// and return a [`ByteCountDisplayContext`] with the appropriate units set
    pub fn display(total_bytes: u64) -> ByteCountDisplayContext {
        let units = &[
            ByteUnit::Tebibyte,
            ByteUnit::Gibibyte,
            ByteUnit::Mebibyte,
            ByteUnit::Kibibyte,
        ];
        let unit = units
            .iter()
            .copied()
            .find(|u| total_bytes >= u.as_bytes_u64())
            .unwrap_or(ByteUnit::Byte);

        ByteCountDisplayContext::new(total_bytes, unit)
    }

    /// The number of bytes represented by this unit
    pub const fn as_bytes_u64(&self) -> u64 {
        match self {
            ByteUnit::Byte => 1,
            ByteUnit::Kibibyte => 1 << 10,
            ByteUnit::Mebibyte => 1 << 20,
            ByteUnit::Gibibyte => 1 << 30,
            ByteUnit::Tebibyte => 1 << 40,
        }
    }

    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            ByteUnit::Byte => "B",
            ByteUnit::Kibibyte => "KiB",
            ByteUnit::Mebibyte => "MiB",
            ByteUnit::Gibibyte => "GiB",
            ByteUnit::Tebibyte => "TiB",
        }
    }
}

impl AsRef<str> for ByteUnit {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Display context to format a number of bytes in a particular unit
#[derive(Debug)]
pub struct ByteCountDisplayContext {
    /// The number of bytes to display
    pub total_bytes: u64,
    /// The unit to display the bytes in
    pub unit: ByteUnit,
}

impl ByteCountDisplayContext {
    /// Create a new display context for the number of bytes in a specific unit
    pub fn new(total_bytes: u64, unit: ByteUnit) -> Self {
        Self { total_bytes, unit }
    }
}

impl fmt::Display for ByteCountDisplayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_bytes % self.unit.as_bytes_u64() == 0 {
            let converted = self.total_bytes / self.unit.as_bytes_u64();
            return write!(f, "{converted} {}", self.unit.as_str());
        }
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "{1:.*} {2:}",
            precision,
            self.unit.convert(self.total_bytes),
            self.unit.as_str()
        )
    }
}

/// Format a validity period as words, e.g. `1 hour 30 minutes`.
///
/// Zero components are skipped. A duration under one second is shown as `0 seconds`.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let parts = [
        (secs / 86_400, "day"),
        ((secs % 86_400) / 3600, "hour"),
        ((secs % 3600) / 60, "minute"),
        (secs % 60, "second"),
    ];

    let words: Vec<String> = parts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| pluralize(*n, unit))
        .collect();

    if words.is_empty() {
        pluralize(0, "second")
    } else {
        words.join(" ")
    }
}

fn pluralize(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// Shorten a presigned URL for display unless verbose output was requested.
///
/// Only the displayed text is shortened, the URL used for the request is never touched.
pub fn truncate_url(url: &str, opts: DisplayOptions) -> String {
    if opts.verbose || url.chars().count() <= URL_DISPLAY_LEN {
        return url.to_owned();
    }
    let head: String = url.chars().take(URL_DISPLAY_LEN).collect();
    format!("{head}...")
}

/// Prints transfer progress to stderr in steps of ten percent.
///
/// When the total size is unknown only the final byte count is printed.
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    last_step: AtomicU64,
}

impl ConsoleProgress {
    /// Create a new console progress reporter
    pub fn new() -> Self {
        Self::default()
    }

    fn print(&self, line: fmt::Arguments<'_>) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
    }
}

impl ProgressListener for ConsoleProgress {
    fn on_start(&self, total_bytes: Option<u64>) {
        self.last_step.store(0, Ordering::Relaxed);
        if let Some(total) = total_bytes {
            self.print(format_args!("transferring {}", ByteUnit::display(total)));
        }
    }

    fn on_progress(&self, transferred_bytes: u64, total_bytes: Option<u64>) {
        let Some(total) = total_bytes.filter(|t| *t > 0) else {
            return;
        };
        let step = (transferred_bytes.min(total) * 10 / total) * 10;
        let previous = self.last_step.fetch_max(step, Ordering::Relaxed);
        if step > previous {
            self.print(format_args!(
                "  {step:>3}% ({} / {})",
                ByteUnit::display(transferred_bytes),
                ByteUnit::display(total)
            ));
        }
    }

    fn on_finish(&self, transferred_bytes: u64) {
        self.print(format_args!(
            "transferred {}",
            ByteUnit::display(transferred_bytes)
        ));
    }
}
