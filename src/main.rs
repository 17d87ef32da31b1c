//! insndoc: extract instruction mnemonics from reference documents and
//! generate one documentation stub per mnemonic.
//!
//! - **extract**: one source document shape in, a canonical name list out
//!   (`insndoc extract --shape manual sdm.txt -o lists/x86`)
//! - **generate**: name lists bound to buckets, one templated file per name
//!   (`insndoc generate --bucket armv8=lists/armv8.txt -t template.md`)
//! - **classes**: a RISC-V class listing straight to bucketed files
//! - **merge** / **links**: helpers for multi-source lists and intrinsics guides

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use insndoc::bucket::{BucketBinding, ClassScheme};
use insndoc::extract::{self, Extractor, SourceShape};
use insndoc::generate::{self, BucketJob, CollisionPolicy, GenerateOptions};
use insndoc::namelist::{self, NameList};
use insndoc::render::{self, Renderer};
use insndoc::slug::SlugStyle;
use insndoc::source::{self, RawDocument};
use insndoc::template::Template;
use insndoc::{canon, denylist};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "insndoc",
    version,
    about = "Extract instruction mnemonics and generate per-instruction documentation stubs"
)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a canonical name list from source documents
    Extract(ExtractArgs),
    /// Generate one file per name for each LABEL=FILE bucket
    Generate(GenerateArgs),
    /// Generate files from a RISC-V instruction class listing
    Classes(ClassesArgs),
    /// Merge name lists in order, keeping the first occurrence of each name
    Merge(MergeArgs),
    /// List intrinsics guide pages linked from an index page
    Links(LinksArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Source shape: markup (html), manual (pdf), prose (kernel), intrinsics, classes (riscv)
    #[arg(short = 's', long)]
    shape: SourceShape,

    /// Input files, file:// URLs or glob patterns. If omitted, reads from stdin.
    inputs: Vec<String>,

    /// Output prefix; writes PREFIX.<ext> per format. Names go to stdout without it.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Comma-separated output formats: txt, csv, json
    #[arg(short = 'f', long, default_value = "txt,csv")]
    format: String,

    /// Treat inputs as alternates and use the first readable one
    #[arg(long)]
    fallback: bool,
}

/// Flags shared by the two generating subcommands.
#[derive(Args)]
struct OutputArgs {
    /// Template file with a fenced region to fill
    #[arg(short = 't', long)]
    template: Option<PathBuf>,

    /// Extension of generated files
    #[arg(long, default_value = "ts")]
    ext: String,

    /// Remove each bucket directory before writing it
    #[arg(long)]
    clean: bool,

    /// What to do when two names map to the same filename
    #[arg(long, value_enum, default_value_t = CollisionPolicy::Suffix)]
    on_collision: CollisionPolicy,
}

#[derive(Args)]
struct GenerateArgs {
    /// Bucket binding (repeatable)
    #[arg(
        short = 'b',
        long = "bucket",
        value_name = "LABEL=FILE",
        required = true,
        value_parser = BucketBinding::parse
    )]
    buckets: Vec<BucketBinding>,

    /// Directory the bucket directories are created in
    #[arg(long, default_value = ".")]
    out_root: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct ClassesArgs {
    /// Class listing file. If omitted, reads from stdin.
    input: Option<String>,

    /// Directory the bucket directories are created in
    #[arg(short = 'o', long, default_value = "riscv_out")]
    out_root: PathBuf,

    /// Keep vendor (X*) extension classes
    #[arg(long)]
    include_vendor: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct MergeArgs {
    /// Name-list files, in priority order
    #[arg(required = true)]
    lists: Vec<PathBuf>,

    /// Output prefix
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Comma-separated output formats: txt, csv, json
    #[arg(short = 'f', long, default_value = "txt,csv")]
    format: String,
}

#[derive(Args)]
struct LinksArgs {
    /// Site subdirectory the pages live under (e.g. lsx, lasx)
    #[arg(long)]
    subdir: String,

    /// Index page. If omitted, reads from stdin.
    input: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Extract(args) => extract_cmd(&args),
        Command::Generate(args) => generate_cmd(&args),
        Command::Classes(args) => classes_cmd(&args),
        Command::Merge(args) => merge_cmd(&args),
        Command::Links(args) => links_cmd(&args),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// -- extract / merge ----------------------------------------------------------

fn extract_cmd(args: &ExtractArgs) -> Result<()> {
    // Validate formats before touching any source
    let renderers = render::create_renderers(&args.format)?;
    let extractor = extract::create_extractor(args.shape);
    debug!(shape = ?args.shape, denylist = denylist::VERSION, "extracting");

    let docs = if args.fallback {
        vec![source::read_first(&args.inputs)?]
    } else {
        source::read_all(&args.inputs)?
    };
    let list = extract_names(extractor.as_ref(), &docs);
    if list.is_empty() {
        warn!("no names extracted");
    }

    match &args.output {
        Some(prefix) => report_written(&list, &write_lists(&list, prefix, &renderers)?),
        None => print!("{}", render::text::TextRenderer.render(&list)),
    }
    Ok(())
}

/// Run one extractor over every document and canonicalize the concatenated
/// candidates.
fn extract_names(extractor: &dyn Extractor, docs: &[RawDocument]) -> NameList {
    let mut candidates = Vec::new();
    for doc in docs {
        let found = extractor.extract(&doc.text);
        info!(origin = %doc.origin, candidates = found.len(), "extracted");
        candidates.extend(found);
    }
    canon::Canonicalizer::for_extractor(extractor).canonicalize(candidates)
}

fn merge_cmd(args: &MergeArgs) -> Result<()> {
    let renderers = render::create_renderers(&args.format)?;
    let lists = args
        .lists
        .iter()
        .map(|path| NameList::read(path))
        .collect::<Result<Vec<_>>>()?;
    let merged = namelist::merge(lists);
    report_written(&merged, &write_lists(&merged, &args.output, &renderers)?);
    Ok(())
}

/// `PREFIX.<ext>` for one output format.
fn list_path(prefix: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn write_lists(
    list: &NameList,
    prefix: &Path,
    renderers: &[Box<dyn Renderer>],
) -> Result<Vec<PathBuf>> {
    if let Some(parent) = prefix.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create output directory: {}", parent.display())
        })?;
    }
    let mut written = Vec::new();
    for renderer in renderers {
        let path = list_path(prefix, renderer.file_extension());
        fs::write(&path, renderer.render(list))
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn report_written(list: &NameList, files: &[PathBuf]) {
    let files: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
    println!("{} names -> {}", list.len(), files.join(", "));
}

// -- generate / classes -------------------------------------------------------

impl OutputArgs {
    fn options(&self, out_root: &Path, slug_style: SlugStyle) -> GenerateOptions {
        GenerateOptions {
            out_root: out_root.to_path_buf(),
            extension: self.ext.clone(),
            clean: self.clean,
            slug_style,
            collision: self.on_collision,
        }
    }
}

fn generate_cmd(args: &GenerateArgs) -> Result<()> {
    let template = Template::resolve(args.output.template.as_deref())?;
    debug!(region = ?template.region(), "template loaded");

    let jobs = args
        .buckets
        .iter()
        .map(|binding| -> Result<BucketJob> {
            Ok(BucketJob {
                bucket: binding.label.clone(),
                names: NameList::read(&binding.list)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let options = args.output.options(&args.out_root, SlugStyle::Hyphenated);
    let summary = generate::generate_all(&template, &jobs, &options)?;
    print!("{}", summary.report());
    Ok(())
}

fn classes_cmd(args: &ClassesArgs) -> Result<()> {
    let template = Template::resolve(args.output.template.as_deref())?;
    let listing = extract::classes::ClassListing::riscv();

    let mut pairs = Vec::new();
    for doc in source::read_all(args.input.as_slice())? {
        pairs.extend(listing.pairs(&doc.text));
    }
    let jobs = classify(&listing.scheme, pairs, args.include_vendor);
    if jobs.is_empty() {
        warn!("no instruction classes found");
    }

    let options = args.output.options(&args.out_root, SlugStyle::Mnemonic);
    let summary = generate::generate_all(&template, &jobs, &options)?;
    print!("{}", summary.report());
    Ok(())
}

/// Group `(class, mnemonic)` pairs into bucket jobs, sorted by bucket name.
/// Mnemonics keep their listing order within a bucket.
fn classify(
    scheme: &ClassScheme,
    pairs: Vec<(String, String)>,
    include_vendor: bool,
) -> Vec<BucketJob> {
    let mut buckets: BTreeMap<String, NameList> = BTreeMap::new();
    for (class, mnemonic) in pairs {
        if !include_vendor && scheme.is_vendor(&class) {
            debug!(%class, %mnemonic, "skipping vendor class");
            continue;
        }
        if let Some(bucket) = scheme.bucket(&class) {
            buckets.entry(bucket).or_default().push(mnemonic);
        }
    }
    buckets
        .into_iter()
        .map(|(bucket, names)| BucketJob { bucket, names })
        .collect()
}

// -- links --------------------------------------------------------------------

fn links_cmd(args: &LinksArgs) -> Result<()> {
    for doc in source::read_all(args.input.as_slice())? {
        for link in extract::intrinsics::page_links(&doc.text, &args.subdir) {
            println!("{link}");
        }
    }
    Ok(())
}
