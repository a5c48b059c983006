use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use codec::{CodecLimits, Encoding};
use env_logger::Env;
use glob::Pattern;
use xdrkit_tools::{
    decode_to_json, encode_from_json, format_report, inspect_registry, SchemaDocument,
    TypeRegistry,
};

#[derive(Parser)]
#[command(
    name = "xdrkit",
    version,
    about = "Encode, decode, and inspect XDR data described by a JSON schema"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode XDR bytes and print them as JSON.
    Decode {
        /// Encoded input file, or a directory of them.
        input: PathBuf,
        #[command(flatten)]
        target: Target,
        /// Presentation of the input bytes.
        #[arg(long, default_value_t = Encoding::Raw)]
        encoding: Encoding,
        /// Optional glob filter when decoding a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort decoded files.
        #[arg(long, value_enum)]
        sort: Option<DecodeSort>,
        /// Limit the number of decoded files (after sorting).
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        limits: LimitArgs,
    },
    /// Encode a JSON value and print (or write) the bytes.
    Encode {
        /// The value as JSON text.
        value: String,
        #[command(flatten)]
        target: Target,
        /// Presentation of the output bytes.
        #[arg(long, default_value_t = Encoding::Hex)]
        encoding: Encoding,
        /// Write the output to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the types declared by a schema document.
    Inspect {
        /// Schema document (JSON).
        #[arg(long)]
        schema: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = InspectFormat::Text)]
        format: InspectFormat,
    },
}

#[derive(Args)]
struct Target {
    /// Schema document (JSON).
    #[arg(long)]
    schema: PathBuf,
    /// Name of the declared type to use.
    #[arg(long = "type")]
    type_name: String,
}

#[derive(Args)]
struct LimitArgs {
    /// Maximum nesting depth.
    #[arg(long)]
    max_depth: Option<usize>,
    /// Maximum string/opaque length in bytes.
    #[arg(long)]
    max_opaque_len: Option<usize>,
    /// Maximum array element count.
    #[arg(long)]
    max_array_len: Option<usize>,
}

impl LimitArgs {
    fn to_limits(&self) -> CodecLimits {
        let defaults = CodecLimits::default();
        CodecLimits {
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            max_opaque_len: self.max_opaque_len.unwrap_or(defaults.max_opaque_len),
            max_array_len: self.max_array_len.unwrap_or(defaults.max_array_len),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeSort {
    Size,
    Name,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Decode {
            input,
            target,
            encoding,
            glob,
            sort,
            limit,
            limits,
        } => {
            let registry = load_schema(&target.schema).context("load schema")?;
            let ty = registry.require(&target.type_name)?;
            let limits = limits.to_limits();
            if input.is_dir() {
                let selection = Selection::new(glob.as_deref(), sort, limit)?;
                for file in selection.apply(list_files(&input)?) {
                    println!("== {} ({} bytes) ==", file.path.display(), file.size);
                    let bytes = fs::read(&file.path)
                        .with_context(|| format!("read input {}", file.path.display()))?;
                    match decode_to_json(ty, &bytes, encoding, &limits) {
                        Ok(json) => print_json(&json)?,
                        Err(err) => println!("error: {err:#}"),
                    }
                }
            } else {
                let bytes = fs::read(&input)
                    .with_context(|| format!("read input {}", input.display()))?;
                print_json(&decode_to_json(ty, &bytes, encoding, &limits)?)?;
            }
        }
        Command::Encode {
            value,
            target,
            encoding,
            output,
        } => {
            let registry = load_schema(&target.schema).context("load schema")?;
            let ty = registry.require(&target.type_name)?;
            let json: serde_json::Value =
                serde_json::from_str(&value).context("parse value json")?;
            let bytes = encode_from_json(ty, &json, encoding)?;
            if let Some(path) = output {
                fs::write(&path, &bytes)
                    .with_context(|| format!("write output {}", path.display()))?;
            } else {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&bytes).context("write stdout")?;
                if encoding != Encoding::Raw {
                    writeln!(stdout).context("write stdout")?;
                }
            }
        }
        Command::Inspect { schema, format } => {
            let registry = load_schema(&schema).context("load schema")?;
            let report = inspect_registry(&registry);
            match format {
                InspectFormat::Text => print!("{}", format_report(&report)),
                InspectFormat::Json => {
                    let json =
                        serde_json::to_string_pretty(&report).context("serialize json")?;
                    println!("{json}");
                }
            }
        }
    }
    Ok(())
}

fn load_schema(path: &Path) -> Result<TypeRegistry> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read schema {}", path.display()))?;
    let registry = SchemaDocument::from_json(&contents)?.resolve()?;
    log::info!("loaded {} types from {}", registry.len(), path.display());
    Ok(registry)
}

fn print_json(json: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(json).context("serialize json")?;
    println!("{text}");
    Ok(())
}

#[derive(Debug)]
struct InputFile {
    path: PathBuf,
    size: u64,
}

fn list_files(dir: &Path) -> Result<Vec<InputFile>> {
    fs::read_dir(dir)
        .with_context(|| format!("read dir {}", dir.display()))?
        .map(|entry| -> Result<Option<InputFile>> {
            let path = entry?.path();
            let metadata = fs::metadata(&path)?;
            Ok(metadata.is_file().then(|| InputFile {
                path,
                size: metadata.len(),
            }))
        })
        .filter_map(Result::transpose)
        .collect()
}

/// Which files of a directory get decoded, and in what order.
struct Selection {
    pattern: Option<Pattern>,
    sort: Option<DecodeSort>,
    limit: Option<usize>,
}

impl Selection {
    fn new(glob: Option<&str>, sort: Option<DecodeSort>, limit: Option<usize>) -> Result<Self> {
        let pattern = glob
            .map(Pattern::new)
            .transpose()
            .context("invalid glob pattern")?;
        Ok(Self {
            pattern,
            sort,
            limit,
        })
    }

    /// A file is kept if the pattern matches its full path or its file name.
    fn accepts(&self, path: &Path) -> bool {
        let Some(pattern) = &self.pattern else {
            return true;
        };
        pattern.matches_path(path)
            || path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name))
    }

    fn apply(&self, mut files: Vec<InputFile>) -> Vec<InputFile> {
        files.retain(|file| self.accepts(&file.path));
        match self.sort {
            Some(DecodeSort::Size) => {
                files.sort_by_key(|file| (std::cmp::Reverse(file.size), file.path.clone()));
            }
            Some(DecodeSort::Name) => files.sort_by(|a, b| a.path.cmp(&b.path)),
            None => {}
        }
        files.truncate(self.limit.unwrap_or(usize::MAX));
        files
    }
}
