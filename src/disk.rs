/// Mounted volume enumeration and usage reporting

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use sysinfo::Disks;
use tracing::{debug, warn};

/// Bytes per binary gigabyte
pub const GIB: u64 = 1024 * 1024 * 1024;

/// Convert bytes to binary gigabytes, rounded to the nearest integer
pub fn gigabytes(bytes: u64) -> u64 {
    bytes / GIB + u64::from(bytes % GIB >= GIB / 2)
}

/// A mounted partition as enumerated by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Device identifier (e.g. `/dev/sda1`, `C:\`)
    pub device: String,
    /// File system type (e.g. `ext4`, `NTFS`)
    pub fs_type: String,
    /// Where the partition is mounted
    pub mount_point: PathBuf,
}

/// Capacity figures for a volume, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    /// Total capacity
    pub total: u64,
    /// Space in use
    pub used: u64,
    /// Space available to unprivileged users
    pub free: u64,
}

/// Usage half of a volume report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// The usage query succeeded
    Known(DiskUsage),
    /// The OS refused the usage query
    AccessDenied,
}

/// One entry of a volume report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Device identifier
    pub device: String,
    /// File system type
    pub fs_type: String,
    /// Mount point
    pub mount_point: PathBuf,
    /// Capacity figures, if they could be read
    pub usage: Usage,
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Drive: {}", self.device)?;
        writeln!(f, "  File system type: {}", self.fs_type)?;
        match self.usage {
            Usage::Known(usage) => {
                writeln!(f, "  Total Size: {} GB", gigabytes(usage.total))?;
                writeln!(f, "  Used: {} GB", gigabytes(usage.used))?;
                writeln!(f, "  Free: {} GB", gigabytes(usage.free))
            }
            Usage::AccessDenied => writeln!(f, "  Access Denied."),
        }
    }
}

/// Where partitions and their usage come from
pub trait VolumeSource {
    /// Enumerate mounted partitions
    fn partitions(&self) -> Vec<Partition>;

    /// Check that a partition is accessible and ready
    fn probe(&self, partition: &Partition) -> io::Result<()>;

    /// Query capacity figures for a partition
    fn usage(&self, partition: &Partition) -> io::Result<DiskUsage>;
}

/// Partitions of the running host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemVolumes;

impl VolumeSource for SystemVolumes {
    fn partitions(&self) -> Vec<Partition> {
        Disks::new_with_refreshed_list()
            .list()
            .iter()
            .map(|disk| Partition {
                device: disk.name().to_string_lossy().into_owned(),
                fs_type: disk.file_system().to_string_lossy().into_owned(),
                mount_point: disk.mount_point().to_path_buf(),
            })
            .collect()
    }

    fn probe(&self, partition: &Partition) -> io::Result<()> {
        std::fs::metadata(&partition.mount_point).map(|_| ())
    }

    #[cfg(unix)]
    fn usage(&self, partition: &Partition) -> io::Result<DiskUsage> {
        statvfs_usage(&partition.mount_point)
    }

    #[cfg(not(unix))]
    fn usage(&self, partition: &Partition) -> io::Result<DiskUsage> {
        let disks = Disks::new_with_refreshed_list();
        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == partition.mount_point)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        let total = disk.total_space();
        let free = disk.available_space();
        Ok(DiskUsage {
            total,
            used: total.saturating_sub(free),
            free,
        })
    }
}

/// Query usage for the file system containing `path`
///
/// `used` counts blocks not free for root, `free` counts blocks available
/// to unprivileged users, so `used + free` can be less than `total`.
#[cfg(unix)]
pub fn statvfs_usage(path: &Path) -> io::Result<DiskUsage> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is NUL-terminated and stat is a valid out pointer
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }

    let fragment = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * fragment;
    let free_for_root = stat.f_bfree as u64 * fragment;
    let free = stat.f_bavail as u64 * fragment;
    Ok(DiskUsage {
        total,
        used: total.saturating_sub(free_for_root),
        free,
    })
}

/// Reports capacity and usage for every accessible mounted volume
#[derive(Debug, Clone, Default)]
pub struct DiskInfoReporter<S = SystemVolumes> {
    source: S,
}

impl DiskInfoReporter<SystemVolumes> {
    /// Reporter over the running host's volumes
    pub fn new() -> Self {
        Self::with_source(SystemVolumes)
    }
}

impl<S: VolumeSource> DiskInfoReporter<S> {
    /// Reporter over a custom partition source
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Enumerate volumes
    ///
    /// Partitions are re-enumerated on every call; usage is queried lazily
    /// as the iterator advances. Partitions that are not ready are skipped.
    pub fn report(&self) -> impl Iterator<Item = Volume> + '_ {
        self.source
            .partitions()
            .into_iter()
            .filter_map(move |partition| self.inspect(partition))
    }

    fn inspect(&self, partition: Partition) -> Option<Volume> {
        if let Err(e) = self.source.probe(&partition) {
            debug!("Skipping volume {} (not ready: {})", partition.device, e);
            return None;
        }

        let usage = match self.source.usage(&partition) {
            Ok(usage) => Usage::Known(usage),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => Usage::AccessDenied,
            Err(e) => {
                warn!("Failed to query usage of {}: {}", partition.device, e);
                return None;
            }
        };

        Some(Volume {
            device: partition.device,
            fs_type: partition.fs_type,
            mount_point: partition.mount_point,
            usage,
        })
    }
}
