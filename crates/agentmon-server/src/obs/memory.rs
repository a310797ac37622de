//! Process memory statistics.
//!
//! `MemoryStats` has a fixed shape (7 counters, 19 gauges) so consumers of the
//! snapshot can rely on every key being present. On platforms without procfs,
//! or when a file cannot be read, the affected fields stay zero.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use agentmon_core::InternalMetrics;

/// Source of process memory figures.
pub trait MemoryProbe: Send + Sync {
    fn sample(&self) -> MemoryStats;
}

/// One reading of process memory figures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryStats {
    // counters
    pub minor_faults: u64,
    pub child_minor_faults: u64,
    pub major_faults: u64,
    pub child_major_faults: u64,
    pub user_time_ticks: u64,
    pub system_time_ticks: u64,
    pub ctxt_switches: u64,

    // gauges
    pub vm_peak_bytes: u64,
    pub vm_size_bytes: u64,
    pub vm_lck_bytes: u64,
    pub vm_pin_bytes: u64,
    pub vm_hwm_bytes: u64,
    pub vm_rss_bytes: u64,
    pub rss_anon_bytes: u64,
    pub rss_file_bytes: u64,
    pub rss_shmem_bytes: u64,
    pub vm_data_bytes: u64,
    pub vm_stk_bytes: u64,
    pub vm_exe_bytes: u64,
    pub vm_lib_bytes: u64,
    pub vm_pte_bytes: u64,
    pub vm_swap_bytes: u64,
    pub hugetlb_bytes: u64,
    pub threads: u64,
    pub system_mem_total_bytes: u64,
    pub system_mem_available_bytes: u64,
}

impl MemoryStats {
    pub fn counters(&self) -> [(&'static str, u64); 7] {
        [
            ("minor_faults", self.minor_faults),
            ("child_minor_faults", self.child_minor_faults),
            ("major_faults", self.major_faults),
            ("child_major_faults", self.child_major_faults),
            ("user_time_ticks", self.user_time_ticks),
            ("system_time_ticks", self.system_time_ticks),
            ("ctxt_switches", self.ctxt_switches),
        ]
    }

    pub fn gauges(&self) -> [(&'static str, u64); 19] {
        [
            ("vm_peak_bytes", self.vm_peak_bytes),
            ("vm_size_bytes", self.vm_size_bytes),
            ("vm_lck_bytes", self.vm_lck_bytes),
            ("vm_pin_bytes", self.vm_pin_bytes),
            ("vm_hwm_bytes", self.vm_hwm_bytes),
            ("vm_rss_bytes", self.vm_rss_bytes),
            ("rss_anon_bytes", self.rss_anon_bytes),
            ("rss_file_bytes", self.rss_file_bytes),
            ("rss_shmem_bytes", self.rss_shmem_bytes),
            ("vm_data_bytes", self.vm_data_bytes),
            ("vm_stk_bytes", self.vm_stk_bytes),
            ("vm_exe_bytes", self.vm_exe_bytes),
            ("vm_lib_bytes", self.vm_lib_bytes),
            ("vm_pte_bytes", self.vm_pte_bytes),
            ("vm_swap_bytes", self.vm_swap_bytes),
            ("hugetlb_bytes", self.hugetlb_bytes),
            ("threads", self.threads),
            ("system_mem_total_bytes", self.system_mem_total_bytes),
            ("system_mem_available_bytes", self.system_mem_available_bytes),
        ]
    }

    /// Map into the snapshot's counters/gauges shape. Dimensions stay empty.
    pub fn to_internal_metrics(&self) -> InternalMetrics {
        let mut out = InternalMetrics::new();
        for (k, v) in self.counters() {
            out.counters.insert(k.to_string(), v as f64);
        }
        for (k, v) in self.gauges() {
            out.gauges.insert(k.to_string(), v as f64);
        }
        out
    }

    /// Fill the counters from `/proc/<pid>/stat` content.
    pub fn apply_stat(&mut self, stat: &str) {
        // comm may contain spaces and parens; fields resume after the last ')'.
        let Some((_, rest)) = stat.rsplit_once(')') else {
            return;
        };
        let fields: Vec<u64> = rest
            .split_whitespace()
            .skip(1) // state
            .map(|f| f.parse().unwrap_or(0))
            .collect();
        // field N of stat(5) lands at index N - 4
        let at = |n: usize| fields.get(n - 4).copied().unwrap_or(0);
        self.minor_faults = at(10);
        self.child_minor_faults = at(11);
        self.major_faults = at(12);
        self.child_major_faults = at(13);
        self.user_time_ticks = at(14);
        self.system_time_ticks = at(15);
    }

    /// Fill the gauges and context switches from `/proc/<pid>/status` content.
    pub fn apply_status(&mut self, status: &str) {
        let kv = parse_key_values(status);
        let get = |k: &str| kv.get(k).copied().unwrap_or(0);
        self.vm_peak_bytes = get("VmPeak");
        self.vm_size_bytes = get("VmSize");
        self.vm_lck_bytes = get("VmLck");
        self.vm_pin_bytes = get("VmPin");
        self.vm_hwm_bytes = get("VmHWM");
        self.vm_rss_bytes = get("VmRSS");
        self.rss_anon_bytes = get("RssAnon");
        self.rss_file_bytes = get("RssFile");
        self.rss_shmem_bytes = get("RssShmem");
        self.vm_data_bytes = get("VmData");
        self.vm_stk_bytes = get("VmStk");
        self.vm_exe_bytes = get("VmExe");
        self.vm_lib_bytes = get("VmLib");
        self.vm_pte_bytes = get("VmPTE");
        self.vm_swap_bytes = get("VmSwap");
        self.hugetlb_bytes = get("HugetlbPages");
        self.threads = get("Threads");
        self.ctxt_switches = get("voluntary_ctxt_switches") + get("nonvoluntary_ctxt_switches");
    }

    /// Fill the system-wide gauges from `/proc/meminfo` content.
    pub fn apply_meminfo(&mut self, meminfo: &str) {
        let kv = parse_key_values(meminfo);
        self.system_mem_total_bytes = kv.get("MemTotal").copied().unwrap_or(0);
        self.system_mem_available_bytes = kv.get("MemAvailable").copied().unwrap_or(0);
    }
}

/// Parse `Key:   value [kB]` lines; `kB` values are converted to bytes.
/// Lines whose value is not a number are skipped.
fn parse_key_values(content: &str) -> HashMap<&str, u64> {
    content
        .lines()
        .filter_map(|line| {
            let (key, rest) = line.split_once(':')?;
            let mut parts = rest.split_whitespace();
            let value: u64 = parts.next()?.parse().ok()?;
            let value = match parts.next() {
                Some("kB") => value.saturating_mul(1024),
                _ => value,
            };
            Some((key.trim(), value))
        })
        .collect()
}

/// Reads the current process's figures from a procfs mount.
///
/// The first read failure is logged at `warn`; later ones at `debug`, since a
/// host without procfs fails on every request.
#[derive(Debug)]
pub struct ProcfsProbe {
    root: PathBuf,
    warned: AtomicBool,
}

impl Default for ProcfsProbe {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl ProcfsProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            warned: AtomicBool::new(false),
        }
    }

    fn read(&self, rel: &str) -> Option<String> {
        let path = self.root.join(rel);
        match fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) => {
                if self.warned.swap(true, Ordering::Relaxed) {
                    tracing::debug!(path = %path.display(), error = %e, "memory probe read failed");
                } else {
                    tracing::warn!(path = %path.display(), error = %e, "memory probe read failed");
                }
                None
            }
        }
    }
}

impl MemoryProbe for ProcfsProbe {
    fn sample(&self) -> MemoryStats {
        let mut stats = MemoryStats::default();
        if let Some(s) = self.read("self/stat") {
            stats.apply_stat(&s);
        }
        if let Some(s) = self.read("self/status") {
            stats.apply_status(&s);
        }
        if let Some(s) = self.read("meminfo") {
            stats.apply_meminfo(&s);
        }
        stats
    }
}
