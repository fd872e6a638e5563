//! Code for timing blocks of code

use ascii_tree::{write_tree, Tree};
#[cfg(feature = "timing")]
use cpu_time::ProcessTime;
use linked_hash_map::LinkedHashMap;
use once_cell::sync::Lazy;
use std::{
    cmp::Reverse,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

/// Global instance of the [TimedCode]
static TIMECODE_INSTANCE: Lazy<Mutex<TimedCode>> = Lazy::new(|| Mutex::new(TimedCode::new()));

/// Accumulated measurements of a block of code
#[derive(Default, Clone, Copy)]
pub struct TimedCodeInfo {
    total_system_time: Duration,
    total_process_time: Duration,
    start_system: Option<Instant>,
    #[cfg(feature = "timing")]
    start_process: Option<ProcessTime>,
    runs: u64,
}

impl TimedCodeInfo {
    /// Returns the total wall clock time.
    pub fn system_time(&self) -> Duration {
        self.total_system_time
    }

    /// Returns the total process time,
    /// which is zero unless the `timing` feature is enabled.
    pub fn process_time(&self) -> Duration {
        self.total_process_time
    }

    /// Returns the number of completed measurements.
    pub fn runs(&self) -> u64 {
        self.runs
    }
}

impl fmt::Debug for TimedCodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let run_msg = if self.start_system.is_some() {
            "currently running"
        } else {
            "currently not running"
        };
        write!(
            f,
            "TimedCodeInfo [totals (msec): {}/{}, {} completed runs, {}]",
            self.total_system_time.as_millis(),
            self.total_process_time.as_millis(),
            self.runs,
            run_msg,
        )
    }
}

/// How to sort the sub-blocks of a [TimedCode] when displaying it
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TimedSorting {
    /// The order the code got called in
    #[default]
    Default,
    /// Alphabetical by the title of the block
    Alphabetical,
    /// Show the blocks which took longest first
    LongestTime,
}

/// A tree of timed blocks of code
#[derive(Debug, Default, Clone)]
pub struct TimedCode {
    info: TimedCodeInfo,
    subblocks: LinkedHashMap<String, TimedCode>,
}

impl TimedCode {
    /// Create new [TimedCode] object
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the global instance
    pub fn instance() -> MutexGuard<'static, TimedCode> {
        TIMECODE_INSTANCE
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the recorded timings for this block
    pub fn timings(&self) -> &TimedCodeInfo {
        &self.info
    }

    /// Return an iterator through the sub-blocks
    pub fn sub_nodes(&self) -> impl Iterator<Item = (&str, &TimedCode)> {
        self.subblocks.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reset the current node, remove all sub-blocks
    pub fn reset(&mut self) {
        self.info = TimedCodeInfo::default();
        self.subblocks.clear();
    }

    /// Navigate to a sub-block (use forward slash to go multiple layers at once)
    pub fn sub(&mut self, name: &str) -> &mut TimedCode {
        name.split('/').fold(self, |block, part| {
            block.subblocks.entry(part.to_owned()).or_default()
        })
    }

    /// Return the total wall clock time this block took.
    pub fn total_system_time(&self) -> Duration {
        self.info.total_system_time
    }

    /// Start the next measurement
    pub fn start(&mut self) {
        debug_assert!(self.info.start_system.is_none());

        self.info.start_system = Some(Instant::now());
        #[cfg(feature = "timing")]
        {
            self.info.start_process = Some(ProcessTime::now());
        }
    }

    /// Stop the current measurement and save the times.
    ///
    /// Returns the wall clock time of this measurement,
    /// or zero if no measurement was running.
    pub fn stop(&mut self) -> Duration {
        let Some(start_system) = self.info.start_system.take() else {
            log::warn!("stopping a timer that has not been started");
            return Duration::ZERO;
        };

        let duration_system = start_system.elapsed();
        self.info.total_system_time += duration_system;

        #[cfg(feature = "timing")]
        if let Some(start_process) = self.info.start_process.take() {
            self.info.total_process_time += start_process.elapsed();
        }

        self.info.runs += 1;

        duration_system
    }

    fn sorted_blocks(&self, sorting: TimedSorting) -> Vec<(&String, &TimedCode)> {
        let mut blocks: Vec<(&String, &TimedCode)> = self.subblocks.iter().collect();

        match sorting {
            TimedSorting::Default => {}
            TimedSorting::Alphabetical => blocks.sort_by_key(|(name, _)| *name),
            TimedSorting::LongestTime => {
                blocks.sort_by_key(|(_, block)| Reverse(block.info.total_system_time))
            }
        };

        blocks
    }

    /// Turns e.g. (Test, 64.2355, 1234, 56) into "Test [64.2%, 1234ms, 56x]"
    fn format_title(title: &str, percentage: f64, msecs: u128, runs: u64) -> String {
        format!("{title} [{percentage:.1}%, {msecs}ms, {runs}x]")
    }

    fn create_tree_recursive(&self, title: String, sorting: TimedSorting) -> Tree {
        let total = self.info.total_system_time.as_secs_f64();

        let subnodes: Vec<Tree> = self
            .sorted_blocks(sorting)
            .into_iter()
            .map(|(name, block)| {
                let percentage = if total > 0.0 {
                    100.0 * block.info.total_system_time.as_secs_f64() / total
                } else {
                    0.0
                };

                block.create_tree_recursive(
                    Self::format_title(
                        name,
                        percentage,
                        block.info.total_system_time.as_millis(),
                        block.info.runs,
                    ),
                    sorting,
                )
            })
            .collect();

        if subnodes.is_empty() {
            Tree::Leaf(vec![title])
        } else {
            Tree::Node(title, subnodes)
        }
    }

    /// Creates an ASCII tree
    pub fn create_tree(&self, title: &str, sorting: TimedSorting) -> Tree {
        let title_string = format!(
            "{title} [system/process (ms): {}/{}]",
            self.info.total_system_time.as_millis(),
            self.info.total_process_time.as_millis(),
        );

        self.create_tree_recursive(title_string, sorting)
    }

    /// Creates an ASCII tree and converts it to a string representation
    pub fn create_tree_string(&self, title: &str, sorting: TimedSorting) -> String {
        let tree = self.create_tree(title, sorting);

        let mut output = String::new();
        if write_tree(&mut output, &tree).is_err() {
            log::warn!("unable to render timing tree");
        }

        output
    }
}
