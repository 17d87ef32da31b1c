//! Orchestrator: materialize one artifact per name, grouped into buckets.

use crate::error::InputError;
use crate::namelist::NameList;
use crate::slug::SlugStyle;
use crate::template::Template;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What to do when two names of one bucket map to the same filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CollisionPolicy {
    /// Later names get `-2`, `-3`, ... (or `_2`, `_3`, ... for mnemonic slugs).
    #[default]
    Suffix,
    /// Last write wins.
    Overwrite,
    /// Abort the run.
    Error,
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub out_root: PathBuf,
    pub extension: String,
    pub clean: bool,
    pub slug_style: SlugStyle,
    pub collision: CollisionPolicy,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            out_root: PathBuf::from("."),
            extension: "ts".to_string(),
            clean: false,
            slug_style: SlugStyle::Hyphenated,
            collision: CollisionPolicy::Suffix,
        }
    }
}

/// Names bound for one bucket directory.
#[derive(Debug, Clone)]
pub struct BucketJob {
    pub bucket: String,
    pub names: NameList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketReport {
    pub bucket: String,
    pub dir: PathBuf,
    /// Distinct files written.
    pub written: usize,
    pub collisions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub buckets: Vec<BucketReport>,
    pub total: usize,
}

impl Summary {
    /// `<bucket>: <n> files -> <dir>` per bucket, then `total: <n>`.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for b in &self.buckets {
            out.push_str(&format!(
                "{}: {} files -> {}\n",
                b.bucket,
                b.written,
                b.dir.display()
            ));
        }
        out.push_str(&format!("total: {}\n", self.total));
        out
    }
}

// -- Filename assignment ----------------------------------------------------

/// Slugs already handed out in one bucket, with the name that took each.
struct SlugTable {
    style: SlugStyle,
    policy: CollisionPolicy,
    taken: HashMap<String, String>,
}

impl SlugTable {
    fn new(style: SlugStyle, policy: CollisionPolicy) -> Self {
        SlugTable {
            style,
            policy,
            taken: HashMap::new(),
        }
    }

    /// File stem for `name`, and whether it collided with an earlier name.
    fn assign(&mut self, bucket: &str, ext: &str, name: &str) -> Result<(String, bool)> {
        let base = self.style.apply(name);
        let Some(previous) = self.taken.get(&base) else {
            self.taken.insert(base.clone(), name.to_string());
            return Ok((base, false));
        };
        match self.policy {
            CollisionPolicy::Suffix => {
                let sep = self.style.separator();
                let stem = (2..)
                    .map(|n| format!("{base}{sep}{n}"))
                    .find(|s| !self.taken.contains_key(s))
                    .unwrap_or_default();
                debug!(name, previous = %previous, stem = %stem, "slug collision, suffixed");
                self.taken.insert(stem.clone(), name.to_string());
                Ok((stem, true))
            }
            CollisionPolicy::Overwrite => {
                warn!("{name} overwrites {previous} at {base}.{ext} in bucket {bucket}");
                self.taken.insert(base.clone(), name.to_string());
                Ok((base, true))
            }
            CollisionPolicy::Error => Err(InputError::SlugCollision {
                bucket: bucket.to_string(),
                file: format!("{base}.{ext}"),
                name: name.to_string(),
                previous: previous.clone(),
            }
            .into()),
        }
    }
}

// -- Generation -------------------------------------------------------------

/// Write one artifact per name of `job` under `<out_root>/<bucket>`.
pub fn generate_bucket(
    template: &Template,
    job: &BucketJob,
    options: &GenerateOptions,
) -> Result<BucketReport> {
    // Every filename is settled before the directory is touched, so a
    // collision error leaves the bucket as it was.
    let mut table = SlugTable::new(options.slug_style, options.collision);
    let mut collisions = 0;
    let mut planned = Vec::with_capacity(job.names.len());
    for name in job.names.iter() {
        let (stem, collided) = table.assign(&job.bucket, &options.extension, name)?;
        if collided {
            collisions += 1;
        }
        planned.push((stem, name));
    }

    let dir = options.out_root.join(&job.bucket);
    if options.clean && dir.exists() {
        debug!("removing {}", dir.display());
        fs::remove_dir_all(&dir)
            .with_context(|| format!("failed to clean {}", dir.display()))?;
    }
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    for (stem, name) in planned {
        let path = dir.join(format!("{stem}.{}", options.extension));
        fs::write(&path, template.render(name))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let written = table.taken.len();
    info!(bucket = %job.bucket, written, collisions, "bucket done");
    Ok(BucketReport {
        bucket: job.bucket.clone(),
        dir,
        written,
        collisions,
    })
}

/// Run jobs in order, stopping at the first error. Buckets already written
/// stay on disk.
pub fn generate_all(
    template: &Template,
    jobs: &[BucketJob],
    options: &GenerateOptions,
) -> Result<Summary> {
    let mut summary = Summary::default();
    for job in jobs {
        let report = generate_bucket(template, job, options)
            .with_context(|| format!("bucket {} failed", job.bucket))?;
        summary.total += report.written;
        summary.buckets.push(report);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::fenced_body;
    use tempfile::TempDir;

    const TEMPLATE: &str = "# Instruction\n\n```\nPLACEHOLDER\n```\n";

    fn job(bucket: &str, names: &[&str]) -> BucketJob {
        BucketJob {
            bucket: bucket.to_string(),
            names: names.iter().copied().collect(),
        }
    }

    fn options(root: &TempDir) -> GenerateOptions {
        GenerateOptions {
            out_root: root.path().to_path_buf(),
            ..GenerateOptions::default()
        }
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn one_file_per_name() {
        let root = TempDir::new().unwrap();
        let template = Template::new(TEMPLATE);
        let report =
            generate_bucket(&template, &job("armv8", &["ADD", "BLX (immediate)"]), &options(&root))
                .unwrap();
        assert_eq!(report.written, 2);
        assert_eq!(report.collisions, 0);
        let body = read(root.path().join("armv8/blx-immediate.ts"));
        assert_eq!(fenced_body(&body), Some("BLX (immediate)"));
        assert!(root.path().join("armv8/add.ts").is_file());
    }

    #[test]
    fn mnemonic_style_buckets() {
        let root = TempDir::new().unwrap();
        let opts = GenerateOptions {
            slug_style: SlugStyle::Mnemonic,
            ..options(&root)
        };
        let template = Template::new(TEMPLATE);
        let summary =
            generate_all(&template, &[job("riscv_v", &["vadd.vv", "vadd.vx"])], &opts).unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(
            fenced_body(&read(root.path().join("riscv_v/vadd_vv.ts"))),
            Some("vadd.vv")
        );
        assert!(root.path().join("riscv_v/vadd_vx.ts").is_file());
        assert!(!root.path().join("riscv_xthead").exists());
    }

    #[test]
    fn suffix_policy_disambiguates() {
        let root = TempDir::new().unwrap();
        let template = Template::new(TEMPLATE);
        let report =
            generate_bucket(&template, &job("x86", &["ADD.W", "ADD W", "ADD/W"]), &options(&root))
                .unwrap();
        assert_eq!(report.written, 3);
        assert_eq!(report.collisions, 2);
        assert_eq!(fenced_body(&read(root.path().join("x86/add-w.ts"))), Some("ADD.W"));
        assert_eq!(fenced_body(&read(root.path().join("x86/add-w-2.ts"))), Some("ADD W"));
        assert_eq!(fenced_body(&read(root.path().join("x86/add-w-3.ts"))), Some("ADD/W"));
    }

    #[test]
    fn suffix_skips_taken_stems() {
        let root = TempDir::new().unwrap();
        let template = Template::new(TEMPLATE);
        let report = generate_bucket(
            &template,
            &job("x86", &["ADD-W-2", "ADD.W", "ADD W"]),
            &options(&root),
        )
        .unwrap();
        assert_eq!(report.written, 3);
        assert_eq!(fenced_body(&read(root.path().join("x86/add-w-3.ts"))), Some("ADD W"));
    }

    #[test]
    fn overwrite_policy_last_wins() {
        let root = TempDir::new().unwrap();
        let opts = GenerateOptions {
            collision: CollisionPolicy::Overwrite,
            ..options(&root)
        };
        let template = Template::new(TEMPLATE);
        let report = generate_bucket(&template, &job("x86", &["ADD.W", "ADD W"]), &opts).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(report.collisions, 1);
        assert_eq!(fenced_body(&read(root.path().join("x86/add-w.ts"))), Some("ADD W"));
    }

    #[test]
    fn error_policy_aborts() {
        let root = TempDir::new().unwrap();
        let opts = GenerateOptions {
            collision: CollisionPolicy::Error,
            ..options(&root)
        };
        let template = Template::new(TEMPLATE);
        let err = generate_bucket(&template, &job("x86", &["ADD.W", "ADD W"]), &opts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::SlugCollision { file, .. }) if file == "add-w.ts"
        ));
    }

    #[test]
    fn collision_error_leaves_bucket_untouched() {
        let root = TempDir::new().unwrap();
        let stale = root.path().join("x86/stale.ts");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        let opts = GenerateOptions {
            collision: CollisionPolicy::Error,
            clean: true,
            ..options(&root)
        };
        let template = Template::new(TEMPLATE);
        let names = job("x86", &["ADD", "SUB", "ADD.W", "ADD W"]);
        assert!(generate_bucket(&template, &names, &opts).is_err());

        let entries: Vec<_> = fs::read_dir(root.path().join("x86"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, ["stale.ts"]);
        assert_eq!(read(stale), "old");
    }

    #[test]
    fn clean_removes_stale_files() {
        let root = TempDir::new().unwrap();
        let stale = root.path().join("armv8/stale.ts");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        let template = Template::new(TEMPLATE);
        generate_bucket(&template, &job("armv8", &["ADD"]), &options(&root)).unwrap();
        assert!(stale.is_file());

        let opts = GenerateOptions {
            clean: true,
            ..options(&root)
        };
        generate_bucket(&template, &job("armv8", &["ADD"]), &opts).unwrap();
        assert!(!stale.exists());
        assert!(root.path().join("armv8/add.ts").is_file());
    }

    #[test]
    fn rerun_is_byte_identical() {
        let root = TempDir::new().unwrap();
        let template = Template::new(TEMPLATE);
        let j = job("armv8", &["ADD"]);
        generate_bucket(&template, &j, &options(&root)).unwrap();
        let first = read(root.path().join("armv8/add.ts"));
        generate_bucket(&template, &j, &options(&root)).unwrap();
        assert_eq!(read(root.path().join("armv8/add.ts")), first);
    }

    #[test]
    fn summary_report_lines() {
        let root = TempDir::new().unwrap();
        let template = Template::new(TEMPLATE);
        let summary = generate_all(
            &template,
            &[job("a", &["ADD"]), job("b", &["SUB", "MUL"])],
            &options(&root),
        )
        .unwrap();
        assert_eq!(summary.total, 3);
        let report = summary.report();
        let lines: Vec<&str> = report.lines().collect();
        assert!(lines[0].starts_with("a: 1 files -> "));
        assert!(lines[1].starts_with("b: 2 files -> "));
        assert_eq!(lines[2], "total: 3");
    }
}
