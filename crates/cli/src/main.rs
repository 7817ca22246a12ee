//! Pipeline simulator CLI.
//!
//! This binary loads a hex-character program image, runs it on the
//! cycle-accurate core, and reports final registers and statistics. It
//! performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON config file,
//!    and command-line overrides for the cache and predictor.
//! 2. **Execution:** One run to completion or to the cycle cap.
//! 3. **Reporting:** Register dump and statistics on stdout, and an
//!    optional line-oriented log file with the per-cycle pipeline trace.

use clap::{Parser, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use rvpipe_core::config::{CacheKind, Config, PredictorKind};
use rvpipe_core::sim::{RunOutcome, Simulator, loader};
use rvpipe_core::trace::PipelineSnapshot;

/// Cache shapes selectable from the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CacheArg {
    /// No data cache.
    None,
    /// Direct-mapped cache.
    Direct,
    /// Fully-associative cache.
    Full,
    /// N-way set-associative cache.
    SetAssoc,
}

/// Predictors selectable from the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum PredictorArg {
    /// Always predict not-taken.
    NotTaken,
    /// Always predict taken.
    Taken,
    /// Bimodal 2-bit counters.
    Bimodal,
    /// Global-history GShare.
    Gshare,
    /// Tournament of bimodal and GShare.
    Tournament,
}

#[derive(Parser, Debug)]
#[command(
    name = "rvpipe",
    author,
    version,
    about = "Cycle-accurate RV32IMF(+C) five-stage pipeline simulator",
    long_about = "Run a hex-character program image on the cycle-accurate core.\n\n\
        The program file contains whitespace-separated two-character hex bytes\n\
        in program order, little-endian within each instruction word.\n\n\
        Examples:\n  \
        rvpipe prog.hex\n  \
        rvpipe prog.hex --debug --log run.log\n  \
        rvpipe prog.hex --predictor bimodal --cache direct --cache-size 1024"
)]
struct Cli {
    /// Program image of whitespace-separated hex bytes.
    instruction_file: PathBuf,

    /// Verbose per-stage diagnostics.
    #[arg(long)]
    debug: bool,

    /// Write a per-cycle trace and final statistics to this file.
    #[arg(long, value_name = "path")]
    log: Option<PathBuf>,

    /// JSON configuration file; command-line flags override it.
    #[arg(long, value_name = "path")]
    config: Option<PathBuf>,

    /// Branch predictor.
    #[arg(long, value_enum)]
    predictor: Option<PredictorArg>,

    /// Data cache shape.
    #[arg(long, value_enum)]
    cache: Option<CacheArg>,

    /// Total cache size in bytes.
    #[arg(long, value_name = "bytes")]
    cache_size: Option<u32>,

    /// Cache line size in bytes.
    #[arg(long, value_name = "bytes")]
    line_size: Option<u32>,

    /// Associativity for the set-associative cache.
    #[arg(long, value_name = "n")]
    ways: Option<u32>,

    /// Cycle cap overriding the configured default.
    #[arg(long, value_name = "n")]
    cycles: Option<u64>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = build_config(&cli);

    let program = match loader::load_program(&cli.instruction_file) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(-1);
        }
    };

    let mut sim = Simulator::new(program, &config);
    let outcome = sim.run();

    if outcome == RunOutcome::CycleCapExceeded {
        log::warn!("run terminated by the cycle cap");
    }

    println!("\n=== Final Results ===");
    println!("Total cycles: {}", sim.cpu.stats.cycles);
    sim.cpu.regs.dump();
    println!();
    sim.cpu.stats.print();

    if let Some(path) = &cli.log {
        if let Err(e) = write_log(path, &sim) {
            eprintln!("error: cannot write log file: {}", e);
            process::exit(1);
        }
    }
}

/// Builds the effective configuration from defaults, the optional JSON
/// file, and command-line overrides (highest precedence).
fn build_config(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("error: cannot read config file: {}", e);
                process::exit(1);
            });
            serde_json::from_str(&text).unwrap_or_else(|e| {
                eprintln!("error: invalid config file: {}", e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    config.general.debug |= cli.debug;
    if let Some(cap) = cli.cycles {
        config.general.cycle_cap = cap;
    }
    if let Some(kind) = cli.predictor {
        config.predictor.kind = match kind {
            PredictorArg::NotTaken => PredictorKind::StaticNotTaken,
            PredictorArg::Taken => PredictorKind::StaticTaken,
            PredictorArg::Bimodal => PredictorKind::Bimodal,
            PredictorArg::Gshare => PredictorKind::GShare,
            PredictorArg::Tournament => PredictorKind::Tournament,
        };
    }
    if let Some(kind) = cli.cache {
        config.cache.kind = match kind {
            CacheArg::None => CacheKind::None,
            CacheArg::Direct => CacheKind::DirectMapped,
            CacheArg::Full => CacheKind::FullyAssociative,
            CacheArg::SetAssoc => CacheKind::SetAssociative,
        };
    }
    if let Some(size) = cli.cache_size {
        config.cache.size_bytes = size;
    }
    if let Some(line) = cli.line_size {
        config.cache.line_bytes = line;
    }
    if let Some(ways) = cli.ways {
        config.cache.ways = ways;
    }

    config
}

/// Rewrites the run log: one line per cycle, then the register-change and
/// memory logs, in human-readable text.
fn write_log(path: &PathBuf, sim: &Simulator) -> std::io::Result<()> {
    let mut out = fs::File::create(path)?;

    writeln!(out, "# rvpipe run log")?;
    writeln!(out, "# cycle | IF/ID | ID/EX | EX/MEM | MEM/WB | marks")?;
    for snap in &sim.cpu.trace.snapshots {
        writeln!(out, "{}", format_snapshot(snap))?;
    }

    writeln!(out)?;
    writeln!(out, "# register changes (cycle, reg, old -> new, pc)")?;
    for rec in &sim.cpu.trace.register_log {
        writeln!(
            out,
            "{:>6}  x{:02}  {:#010x} -> {:#010x}  pc={:#06x}",
            rec.cycle, rec.index, rec.old, rec.new, rec.pc
        )?;
    }

    writeln!(out)?;
    writeln!(out, "# memory accesses (cycle, kind, addr, value, pc, hit)")?;
    for rec in &sim.cpu.trace.memory_log {
        writeln!(
            out,
            "{:>6}  {:5}  {:#010x}  {:#010x}  pc={:#06x}  {}",
            rec.cycle,
            format!("{:?}", rec.kind).to_lowercase(),
            rec.addr,
            rec.value,
            rec.pc,
            match rec.cache_hit {
                Some(true) => "hit",
                Some(false) => "miss",
                None => "-",
            }
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "# cycles={} retired={} cpi={:.4} stalls={} flushes={}",
        sim.cpu.stats.cycles,
        sim.cpu.stats.instructions_retired,
        sim.cpu.stats.cpi(),
        sim.cpu.stats.stalls,
        sim.cpu.stats.flushes,
    )?;

    Ok(())
}

/// Formats one pipeline snapshot as a single log line.
fn format_snapshot(snap: &PipelineSnapshot) -> String {
    let cell = |valid: bool, text: &str| {
        if valid {
            text.to_string()
        } else {
            "-".to_string()
        }
    };
    let mut marks = String::new();
    if snap.stall {
        marks.push_str(" STALL");
    }
    if snap.flush {
        marks.push_str(" FLUSH");
    }
    format!(
        "{:>6} | {:24} | {:24} | {:24} | {:24} |{}",
        snap.cycle,
        cell(snap.if_id.valid, &snap.if_id.disasm),
        cell(snap.id_ex.valid, &snap.id_ex.disasm),
        cell(snap.ex_mem.valid, &snap.ex_mem.disasm),
        cell(snap.mem_wb.valid, &snap.mem_wb.disasm),
        marks
    )
}
