use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use lua_tlv::classify::Summary;
use lua_tlv::constants::DEFAULT_MAX_DEPTH;
use lua_tlv::{classify, DecodeOptions, GameData, StreamDecoder, StreamReport, Table};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const SAVE_DATABASE_SUFFIX: &str = ".ntwtf.lua";

#[derive(Parser, Debug)]
#[command(name = "luatlv", version, about = "Binary Lua table database extractor")]
struct Args {
    /// A .lua database file, or a save folder containing a *.ntwtf.lua file.
    input: String,

    /// Write categorized JSON files into this directory instead of printing.
    #[arg(short, long, value_name = "dir")]
    output: Option<String>,

    /// Print classified entities instead of the raw decoded mapping.
    #[arg(long)]
    classify: bool,

    /// Print nested tables as one level of dotted keys.
    #[arg(long, conflicts_with = "classify")]
    flatten: bool,

    /// JSON indentation size, 0 for compact output (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Maximum number of nested tables.
    #[arg(long = "max-depth", value_name = "number", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Fail on undecodable bytes after the decoded data.
    #[arg(long)]
    strict: bool,

    /// Treat zero bytes between top-level tables as errors.
    #[arg(long = "no-skip-padding", action = ArgAction::SetFalse, default_value_t = true)]
    skip_padding: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Manifest<'a> {
    source_file: &'a str,
    total_top_level: usize,
    #[serde(flatten)]
    counts: Summary,
    stream: StreamReport,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let source = find_database(Path::new(&args.input))?;
    let bytes = fs::read(&source)
        .map_err(|err| format!("cannot read {}: {err}", source.display()))?;
    info!(path = %source.display(), size = bytes.len(), "read database");

    let options = DecodeOptions::new()
        .with_max_depth(args.max_depth)
        .with_strict(args.strict)
        .with_skip_padding(args.skip_padding);
    let mut decoder = StreamDecoder::new(&bytes, &options);
    let data = decoder.decode_all()?;
    let report = *decoder.report();
    info!(
        entries = data.len(),
        tables = report.tables_merged,
        trailing = report.trailing_bytes,
        "decoded database"
    );

    match args.output.as_deref() {
        Some(dir) if dir != "-" => {
            let source_label = source.to_string_lossy();
            write_extraction(Path::new(dir), &source_label, &data, report, args)
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            if args.classify {
                write_json(&mut handle, &classify(&data).clean(), args.indent)?;
            } else if args.flatten {
                write_json(&mut handle, &data.flatten(), args.indent)?;
            } else {
                write_json(&mut handle, &data, args.indent)?;
            }
            Ok(())
        }
    }
}

/// Accepts a `.lua` file directly or picks the first `*.ntwtf.lua` entry of
/// a save folder.
fn find_database(input: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let metadata =
        fs::metadata(input).map_err(|err| format!("cannot access {}: {err}", input.display()))?;

    if !metadata.is_dir() {
        if input.extension().and_then(|ext| ext.to_str()) == Some("lua") {
            return Ok(input.to_path_buf());
        }
        return Err(format!("expected a .lua file, got: {}", input.display()).into());
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        if entry
            .file_name()
            .to_string_lossy()
            .ends_with(SAVE_DATABASE_SUFFIX)
        {
            candidates.push(entry.path());
        }
    }
    candidates.sort();
    debug!(count = candidates.len(), "database candidates");
    candidates.into_iter().next().ok_or_else(|| {
        format!(
            "no {SAVE_DATABASE_SUFFIX} file found in directory: {}",
            input.display()
        )
        .into()
    })
}

fn write_extraction(
    dir: &Path,
    source: &str,
    data: &Table,
    report: StreamReport,
    args: &Args,
) -> Result<(), Box<dyn Error>> {
    let indent = args.indent;
    fs::create_dir_all(dir)?;
    let game_data: GameData = classify(data).clean();

    write_json_file(dir, "items.json", &game_data.items, indent)?;
    write_json_file(dir, "npcs.json", &game_data.npcs, indent)?;
    write_json_file(dir, "thoughts.json", &game_data.thoughts, indent)?;
    write_json_file(dir, "skills.json", &game_data.skills, indent)?;
    write_json_file(dir, "world_objects.json", &game_data.world_objects, indent)?;
    write_json_file(dir, "task_variables.json", &game_data.task_variables, indent)?;
    write_json_file(
        dir,
        "substance_variables.json",
        &game_data.substance_variables,
        indent,
    )?;
    write_json_file(dir, "game_variables.json", &game_data.game_variables, indent)?;
    write_json_file(dir, "all_variables.json", &game_data.all_variables, indent)?;
    write_json_file(dir, "unclassified.json", &game_data.unclassified, indent)?;
    write_json_file(dir, "_raw_full_database.json", data, indent)?;
    if args.flatten {
        write_json_file(dir, "_flat_database.json", &data.flatten(), indent)?;
    }

    let manifest = Manifest {
        source_file: source,
        total_top_level: data.len(),
        counts: game_data.summary(),
        stream: report,
    };
    write_json_file(dir, "_manifest.json", &manifest, indent)?;

    println!("✔ Extracted {source} → {}", dir.display());
    Ok(())
}

fn write_json_file<T: Serialize>(
    dir: &Path,
    name: &str,
    value: &T,
    indent: usize,
) -> Result<(), Box<dyn Error>> {
    let path = dir.join(name);
    let mut file = io::BufWriter::new(fs::File::create(&path)?);
    write_json(&mut file, value, indent)?;
    file.flush()?;
    let size = fs::metadata(&path)?.len();
    println!("  {name:<30} written ({})", human_size(size));
    Ok(())
}

fn write_json<T: Serialize>(
    writer: &mut dyn Write,
    value: &T,
    indent: usize,
) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(writer, value)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

fn human_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut divisor = UNIT;
    let mut exponent = 0;
    while bytes / divisor >= UNIT && exponent < 2 {
        divisor *= UNIT;
        exponent += 1;
    }
    let unit = ['K', 'M', 'G'][exponent];
    format!("{:.1} {unit}B", bytes as f64 / divisor as f64)
}
